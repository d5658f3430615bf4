// src/web/handlers/job_search_handlers.rs
use crate::search::SearchService;
use crate::types::SearchRequest;
use crate::web::types::{ApiError, JobsResponse};

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn jobs_search_handler(
    request: Json<SearchRequest>,
    service: &State<SearchService>,
) -> Result<Json<JobsResponse>, ApiError> {
    let request = request.into_inner();

    info!(
        query = request.query.as_deref().unwrap_or(""),
        location = request.location.as_deref().unwrap_or(""),
        experience = request.experience.as_deref().unwrap_or(""),
        "Job search requested"
    );

    let jobs = service.search(request).await?;

    Ok(Json(JobsResponse { jobs }))
}
