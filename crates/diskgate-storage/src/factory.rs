#[cfg(feature = "storage-memory")]
use crate::MemoryDisk;
#[cfg(feature = "storage-remote")]
use crate::RemoteDisk;
use crate::{Disk, StorageBackend, StorageError, StorageResult};
use diskgate_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub fn create_disk(config: &Config) -> StorageResult<Arc<dyn Disk>> {
    let backend = config.storage_backend().unwrap_or(StorageBackend::Remote);

    match backend {
        #[cfg(feature = "storage-remote")]
        StorageBackend::Remote => {
            let tokens = config.token_list().to_vec();
            if tokens.is_empty() {
                return Err(StorageError::ConfigError(
                    "TOKEN_LIST not configured".to_string(),
                ));
            }
            let disk = RemoteDisk::new(config.disk_api_base_url(), tokens)?;
            Ok(Arc::new(disk))
        }

        #[cfg(not(feature = "storage-remote"))]
        StorageBackend::Remote => Err(StorageError::ConfigError(
            "Remote storage backend not available (storage-remote feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => Ok(Arc::new(MemoryDisk::new())),

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)".to_string(),
        )),
    }
}
