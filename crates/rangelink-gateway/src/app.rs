use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, get_url_handler, health_handler, redirect_handler, welcome_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Static routes win over `/{short_code}`, so the codes `health` and
    /// `shorten` never redirect; they stay reachable under `/v1/urls/`.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(welcome_handler))
            .route("/health", get(health_handler))
            .route("/shorten", post(create_url_handler))
            .route("/v1/urls/{short_code}", get(get_url_handler))
            .route("/{short_code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
