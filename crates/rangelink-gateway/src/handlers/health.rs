use crate::model::{HealthResponse, WelcomeResponse};
use axum::Json;

pub async fn welcome_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the rangelink URL shortener",
    })
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
