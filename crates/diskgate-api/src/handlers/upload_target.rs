//! Upload-target route: one upload per signed token.
//!
//! The token is consumed by an atomic check-and-mark before the byte
//! transfer starts, so a transfer that fails partway still burns the token.
//! Content-type validation runs before the mark: a request rejected for a
//! missing or unsupported type leaves the token usable.

use crate::content_type;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload_token;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
};
use diskgate_core::AppError;
use diskgate_storage::ByteStream;
use futures::TryStreamExt;
use std::sync::Arc;

#[utoipa::path(
    put,
    path = "/upload-target/{token}",
    tag = "upload",
    params(
        ("token" = String, Path, description = "Signed single-use upload token")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "Raw file bytes"),
    responses(
        (status = 201, description = "Stored path of the uploaded file", body = String),
        (status = 400, description = "Missing or unsupported Content-Type", body = ErrorResponse),
        (status = 401, description = "Invalid or expired upload token", body = ErrorResponse),
        (status = 410, description = "Upload token already used", body = ErrorResponse),
        (status = 500, description = "Storage backend failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(token, state, headers, body), fields(operation = "upload_target"))]
pub async fn put_upload_target(
    Path(token): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, String), HttpAppError> {
    let claims = upload_token::verify(&token, state.config.jwt_secret().as_bytes())?;

    if state.admissions.has_been_admitted(&claims) {
        return Err(AppError::AlreadyUsed("Gone.".to_string()).into());
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("No `Content-Type` header provided.".to_string()))?;
    let extension = content_type::resolve(content_type)?;

    // Consume the token before the transfer; a lost race reads as a replay.
    if !state.admissions.try_admit(&claims) {
        return Err(AppError::AlreadyUsed("Gone.".to_string()).into());
    }

    let stream: ByteStream = Box::pin(body.into_data_stream().map_err(std::io::Error::other));
    let stored_path = state.disk.upload(stream, extension).await?;

    tracing::info!(path = %stored_path, "Upload completed");
    Ok((StatusCode::CREATED, stored_path))
}
