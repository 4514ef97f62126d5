use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, UrlStatsResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::ShortCode;
use tracing::debug;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;

    let code = state.shortener().create(&request.url).await?;
    let short_url = code.to_url(state.base_url());

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_code: code.to_string(),
            short_url,
        }),
    ))
}

pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Response> {
    let code = parse_code(short_code)?;

    match state.shortener().resolve(&code).await? {
        Some(url) => {
            let location = HeaderValue::try_from(url).map_err(|e| {
                AppError::Internal(format!("stored url for {code} is not a valid header: {e}"))
            })?;
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        None => Err(AppError::NotFound),
    }
}

pub async fn url_stats_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<UrlStatsResponse>> {
    let code = parse_code(short_code)?;

    state
        .shortener()
        .stats(&code)
        .await?
        .map(|record| Json(record.into()))
        .ok_or(AppError::NotFound)
}

/// A code that cannot exist is reported exactly like an unknown one.
fn parse_code(short_code: String) -> Result<ShortCode> {
    ShortCode::parse(short_code).map_err(|e| {
        debug!(error = %e, "rejecting malformed short code");
        AppError::NotFound
    })
}
