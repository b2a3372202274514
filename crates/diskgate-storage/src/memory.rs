//! In-memory storage backend.
//!
//! Keeps files in a process-local map. Used for development without a disk
//! account and for integration tests; carries a couple of test hooks (upload
//! call counter, injectable upload failure) so gateway tests can observe
//! exactly how often the backend was reached.

use crate::traits::{ByteStream, Disk, StorageError, StorageResult};
use async_trait::async_trait;
use diskgate_core::models::{DirEntry, DiskStatus, EntryKind};
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

const MEMORY_CAPACITY_BYTES: u64 = 1024 * 1024 * 1024;

/// In-memory disk implementation.
#[derive(Clone, Default)]
pub struct MemoryDisk {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    upload_calls: Arc<AtomicUsize>,
    fail_uploads: Arc<AtomicBool>,
}

impl MemoryDisk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file at an explicit path.
    pub fn insert_file(&self, path: impl Into<String>, data: Vec<u8>) {
        self.files
            .lock()
            .expect("memory disk lock poisoned")
            .insert(path.into(), data);
    }

    /// Number of times `upload` was invoked (including failed uploads).
    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent uploads fail after consuming the stream.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files
            .lock()
            .expect("memory disk lock poisoned")
            .contains_key(path)
    }
}

#[async_trait]
impl Disk for MemoryDisk {
    async fn status(&self) -> StorageResult<DiskStatus> {
        let used_space: u64 = self
            .files
            .lock()
            .expect("memory disk lock poisoned")
            .values()
            .map(|data| data.len() as u64)
            .sum();
        Ok(DiskStatus {
            total_space: MEMORY_CAPACITY_BYTES,
            used_space,
            free_space: MEMORY_CAPACITY_BYTES.saturating_sub(used_space),
        })
    }

    async fn file_link(&self, path: &str) -> StorageResult<String> {
        let files = self.files.lock().expect("memory disk lock poisoned");
        if files.contains_key(path) {
            Ok(format!("memory://{}", path.trim_start_matches('/')))
        } else {
            Err(StorageError::NotFound(format!("No such file: {}", path)))
        }
    }

    async fn dir_list(&self, path: &str) -> StorageResult<Vec<DirEntry>> {
        let files = self.files.lock().expect("memory disk lock poisoned");
        let prefix = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{}/", path)
        };

        let mut entries: Vec<DirEntry> = Vec::new();
        let mut seen_dirs: Vec<String> = Vec::new();
        for (stored_path, data) in files.iter() {
            let Some(rest) = stored_path.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                // Direct child file
                None => entries.push(DirEntry {
                    name: rest.to_string(),
                    kind: EntryKind::File,
                    size: Some(data.len() as u64),
                    link: None,
                }),
                // Nested file implies a child directory
                Some((dir, _)) => {
                    if !seen_dirs.iter().any(|d| d == dir) {
                        seen_dirs.push(dir.to_string());
                        entries.push(DirEntry {
                            name: dir.to_string(),
                            kind: EntryKind::Dir,
                            size: None,
                            link: None,
                        });
                    }
                }
            }
        }

        if entries.is_empty() && path.trim_matches('/') != "" {
            return Err(StorageError::NotFound(format!(
                "No such directory: {}",
                path
            )));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn upload(&self, mut content: ByteStream, extension: &str) -> StorageResult<String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);

        let mut data = Vec::new();
        while let Some(chunk) = content.next().await {
            data.extend_from_slice(&chunk?);
        }

        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "Simulated upload failure".to_string(),
            ));
        }

        let stored_path = format!("/{}.{}", Uuid::new_v4().simple(), extension);
        self.files
            .lock()
            .expect("memory disk lock poisoned")
            .insert(stored_path.clone(), data);
        Ok(stored_path)
    }
}
