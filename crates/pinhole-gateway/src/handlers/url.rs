use crate::error::{ApiError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pinhole_core::Alias;
use tracing::info;

pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let alias = request.alias.map(Alias::new).transpose()?;
    let created = state.shortener().create(&request.url, alias).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            id: created.id,
            alias: created.alias.to_string(),
        }),
    ))
}

pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    // A malformed alias cannot name a mapping, so it reads as a miss.
    let alias = Alias::new(alias).map_err(|_| ApiError::NotFound)?;
    let url = state.shortener().resolve(&alias).await?;

    info!(alias = %alias, to = %url, "short link redirected");
    Ok((StatusCode::FOUND, [(LOCATION, url)]))
}

pub async fn delete_url_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let alias = Alias::new(alias)?;
    state.shortener().delete(&alias).await?;

    Ok(StatusCode::NO_CONTENT)
}
