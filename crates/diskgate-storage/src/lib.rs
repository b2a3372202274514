//! Diskgate Storage Library
//!
//! This crate provides the storage-backend abstraction consumed by the
//! gateway. It includes the Disk trait and implementations for the remote
//! multi-account disk REST API and an in-memory store.
//!
//! # Stored path format
//!
//! Uploaded files land at `/{random-hex}.{extension}` regardless of backend,
//! so a stored path returned from an upload can always be fed back to
//! `file_link` for retrieval.

pub mod factory;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-remote")]
pub mod remote;
pub mod traits;

// Re-export commonly used types
pub use diskgate_core::StorageBackend;
pub use factory::create_disk;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryDisk;
#[cfg(feature = "storage-remote")]
pub use remote::RemoteDisk;
pub use traits::{ByteStream, Disk, StorageError, StorageResult};
