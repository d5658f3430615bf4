// src/web/handlers/system_handlers.rs
use crate::search::SearchService;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn health_handler(service: &State<SearchService>) -> Json<&'static str> {
    info!(
        enrichment = service.enrichment_available(),
        "Health check"
    );
    Json("OK")
}
