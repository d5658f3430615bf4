// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use crate::search::SearchService;
use crate::types::SearchRequest;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/jobs-search", data = "<request>")]
pub async fn jobs_search(
    request: Json<SearchRequest>,
    service: &State<SearchService>,
) -> Result<Json<JobsResponse>, ApiError> {
    handlers::jobs_search_handler(request, service).await
}

#[get("/health")]
pub async fn health(service: &State<SearchService>) -> Json<&'static str> {
    handlers::health_handler(service).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> status::Custom<Json<ErrorResponse>> {
    ErrorResponse::with_status(Status::BadRequest, "Invalid request body, expected JSON")
}

#[rocket::catch(422)]
pub fn unprocessable() -> status::Custom<Json<ErrorResponse>> {
    ErrorResponse::with_status(
        Status::BadRequest,
        "Invalid request body: query, location and experience must be strings",
    )
}

#[rocket::catch(404)]
pub fn not_found() -> status::Custom<Json<ErrorResponse>> {
    ErrorResponse::with_status(Status::NotFound, "Not found")
}

#[rocket::catch(500)]
pub fn internal_error() -> status::Custom<Json<ErrorResponse>> {
    ErrorResponse::with_status(Status::InternalServerError, "Internal server error")
}

/// Assemble the application without launching it
pub fn build_rocket(service: SearchService, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(service)
        .register(
            "/api",
            catchers![bad_request, unprocessable, not_found, internal_error],
        )
        .mount("/api", routes![jobs_search, health, options])
}

// Main server start function
pub async fn start_web_server(service: SearchService, port: u16) -> Result<()> {
    info!("Starting ApplyMate job search API on http://0.0.0.0:{}", port);

    let _rocket = build_rocket(service, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
