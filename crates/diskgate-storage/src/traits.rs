//! Storage abstraction trait
//!
//! This module defines the Disk trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use diskgate_core::models::{DirEntry, DiskStatus};
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Stream of file bytes flowing to or from a backend.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Storage backend abstraction
///
/// The gateway talks to the remote file store exclusively through this
/// trait: status, file link resolution, directory listing, and upload.
/// `NotFound` is a distinct outcome, not a generic failure - the browse
/// path falls back to a directory listing only on `NotFound`.
#[async_trait]
pub trait Disk: Send + Sync {
    /// Aggregated status of the backing store
    async fn status(&self) -> StorageResult<DiskStatus>;

    /// Resolve a file path to a downloadable URI.
    ///
    /// Returns `NotFound` when the path does not name an existing file.
    async fn file_link(&self, path: &str) -> StorageResult<String>;

    /// List a directory.
    ///
    /// Returns `NotFound` when the path does not exist or is not a directory.
    async fn dir_list(&self, path: &str) -> StorageResult<Vec<DirEntry>>;

    /// Upload a byte stream and return the final stored path.
    ///
    /// The backend chooses the stored name; callers only supply the
    /// filesystem extension resolved from the request content type.
    async fn upload(&self, content: ByteStream, extension: &str) -> StorageResult<String>;
}
