//! Browse route: serve a file if present, else list its directory.
//!
//! The listing fallback runs only when the file attempt reports `NotFound`;
//! any other backend failure propagates as a server error instead of
//! masquerading as a missing file. Listings require browse authorization,
//! and an unauthorized path reads the same as an absent one.

use crate::auth;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use diskgate_core::AppError;
use diskgate_storage::StorageError;
use futures::TryStreamExt;
use percent_encoding::percent_decode_str;
use std::sync::Arc;

#[tracing::instrument(skip(state, headers), fields(operation = "browse"))]
pub async fn browse(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let path = percent_decode_str(uri.path())
        .decode_utf8()
        .map_err(|_| AppError::BadRequest("Invalid path encoding".to_string()))?
        .to_string();

    match state.disk.file_link(&path).await {
        Ok(href) => proxy_file(&state, &href).await,
        Err(StorageError::NotFound(_)) => list_directory(&state, &path, &headers).await,
        Err(e) => Err(e.into()),
    }
}

/// Stream file bytes from a backend download link.
async fn proxy_file(state: &AppState, href: &str) -> Result<Response, HttpAppError> {
    let upstream = state
        .http
        .get(href)
        .send()
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    if !upstream.status().is_success() {
        return Err(AppError::Storage(format!(
            "Download link returned {}",
            upstream.status()
        ))
        .into());
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let body_stream = upstream.bytes_stream().map_err(std::io::Error::other);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            AppError::Internal(e.to_string())
        })?;

    Ok(response)
}

/// List a directory for an authorized caller.
async fn list_directory(
    state: &AppState,
    path: &str,
    headers: &HeaderMap,
) -> Result<Response, HttpAppError> {
    if auth::authorize(headers, state.config.jwt_secret().as_bytes()).is_err() {
        return Err(AppError::NotFound("Not found.".to_string()).into());
    }

    match state.disk.dir_list(path).await {
        Ok(mut entries) => {
            let base = if path.ends_with('/') {
                path.to_string()
            } else {
                format!("{}/", path)
            };
            for entry in &mut entries {
                entry.link = Some(format!("{}{}", base, entry.name));
            }
            Ok(Json(entries).into_response())
        }
        Err(StorageError::NotFound(_)) => {
            Err(AppError::NotFound("Not found.".to_string()).into())
        }
        Err(e) => Err(e.into()),
    }
}
