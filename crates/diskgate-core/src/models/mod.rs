//! Domain models

pub mod disk;
pub mod upload_target;

pub use disk::{DirEntry, DiskStatus, EntryKind};
pub use upload_target::UploadTargetClaims;
