use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, GetUrlResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use tracing::info;

pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUrlRequest>,
) -> Result<Json<CreateUrlResponse>> {
    let code = state.shortener().shorten(&request.url).await?;
    let short_url = code.to_url(state.base_url());

    info!(code = %code, url = %request.url, "shorten request served");

    Ok(Json(CreateUrlResponse {
        original_url: request.url,
        short_code: code.into(),
        short_url,
    }))
}

pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GetUrlResponse>> {
    let original_url = state
        .shortener()
        .resolve(&short_code)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(GetUrlResponse {
        short_code,
        original_url,
    }))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let original_url = state
        .shortener()
        .resolve(&short_code)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Redirect::temporary(&original_url))
}
