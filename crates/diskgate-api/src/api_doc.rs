//! OpenAPI documentation.

use crate::error;
use crate::handlers;
use diskgate_core::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Diskgate API",
        version = "0.1.0",
        description = "Public file-store gateway: browsing, streaming download, directory listing, and uploads via short-lived single-use signed tokens."
    ),
    paths(
        handlers::status::get_status,
        handlers::upload_target::put_upload_target,
    ),
    components(schemas(
        error::ErrorResponse,
        models::DiskStatus,
        models::DirEntry,
        models::EntryKind,
    )),
    tags(
        (name = "status", description = "Backend status"),
        (name = "upload", description = "Single-use token uploads")
    )
)]
pub struct ApiDoc;
