// src/web/types.rs
use crate::search::SearchError;
use crate::types::Listing;
use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::Request;
use thiserror::Error;
use tracing::error;

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobsResponse {
    pub jobs: Vec<Listing>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn with_status(status: Status, message: impl Into<String>) -> status::Custom<Json<Self>> {
        status::Custom(
            status,
            Json(Self {
                error: message.into(),
            }),
        )
    }
}

/// Errors a route can return; rendered as `{ "error": ... }`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            SearchError::Internal(e) => {
                error!("Internal error: {:?}", e);
                ApiError::Internal("Failed to search jobs".to_string())
            }
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = match &self {
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::Internal(_) => Status::InternalServerError,
        };

        ErrorResponse::with_status(status, self.to_string()).respond_to(request)
    }
}
