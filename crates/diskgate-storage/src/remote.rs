//! Remote disk REST backend.
//!
//! Talks to a cloud disk HTTP API (one OAuth token per account). Reads try
//! each account in order; uploads go to the account with the most free
//! space. Upstream 404s map to `StorageError::NotFound`, everything else to
//! `BackendError`.

use crate::traits::{ByteStream, Disk, StorageError, StorageResult};
use async_trait::async_trait;
use diskgate_core::models::{DirEntry, DiskStatus, EntryKind};
use serde::Deserialize;
use uuid::Uuid;

const DIR_LIST_LIMIT: u32 = 1000;

/// Remote disk storage over the cloud disk REST API.
#[derive(Clone)]
pub struct RemoteDisk {
    client: reqwest::Client,
    base_url: String,
    tokens: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DiskInfoResponse {
    total_space: u64,
    used_space: u64,
}

#[derive(Debug, Deserialize)]
struct LinkResponse {
    href: String,
}

#[derive(Debug, Deserialize)]
struct ResourceResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedResponse>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedResponse {
    items: Vec<ResourceItem>,
}

#[derive(Debug, Deserialize)]
struct ResourceItem {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    size: Option<u64>,
}

impl RemoteDisk {
    /// Create a new RemoteDisk instance
    ///
    /// # Arguments
    /// * `base_url` - Disk API base URL (injectable for tests)
    /// * `tokens` - One OAuth token per storage account
    pub fn new(base_url: impl Into<String>, tokens: Vec<String>) -> StorageResult<Self> {
        if tokens.is_empty() {
            return Err(StorageError::ConfigError(
                "At least one storage account token is required".to_string(),
            ));
        }
        Ok(RemoteDisk {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn auth_value(token: &str) -> String {
        format!("OAuth {}", token)
    }

    async fn account_status(&self, token: &str) -> StorageResult<DiskInfoResponse> {
        let response = self
            .client
            .get(format!("{}/v1/disk", self.base_url))
            .header("Authorization", Self::auth_value(token))
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::BackendError(format!(
                "Disk API returned {} for status request",
                response.status()
            )));
        }

        response
            .json::<DiskInfoResponse>()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }

    /// Fetch a `{href}` link resource for one account; 404 maps to NotFound.
    async fn fetch_link(&self, token: &str, url: &str) -> StorageResult<String> {
        let response = self
            .client
            .get(url)
            .header("Authorization", Self::auth_value(token))
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        match response.status().as_u16() {
            404 => Err(StorageError::NotFound(format!("No such resource: {}", url))),
            s if (200..300).contains(&s) => Ok(response
                .json::<LinkResponse>()
                .await
                .map_err(|e| StorageError::BackendError(e.to_string()))?
                .href),
            s => Err(StorageError::BackendError(format!(
                "Disk API returned {} for link request",
                s
            ))),
        }
    }

    /// Pick the token of the account with the most free space.
    async fn token_with_most_free_space(&self) -> StorageResult<&str> {
        let mut best: Option<(&str, u64)> = None;
        for token in &self.tokens {
            let info = self.account_status(token).await?;
            let free = info.total_space.saturating_sub(info.used_space);
            if best.map(|(_, f)| free > f).unwrap_or(true) {
                best = Some((token, free));
            }
        }
        best.map(|(t, _)| t)
            .ok_or_else(|| StorageError::ConfigError("No storage accounts configured".to_string()))
    }
}

#[async_trait]
impl Disk for RemoteDisk {
    async fn status(&self) -> StorageResult<DiskStatus> {
        let mut total_space = 0u64;
        let mut used_space = 0u64;
        for token in &self.tokens {
            let info = self.account_status(token).await?;
            total_space += info.total_space;
            used_space += info.used_space;
        }
        Ok(DiskStatus {
            total_space,
            used_space,
            free_space: total_space.saturating_sub(used_space),
        })
    }

    async fn file_link(&self, path: &str) -> StorageResult<String> {
        let mut backend_failure: Option<StorageError> = None;
        for token in &self.tokens {
            let url = format!(
                "{}/v1/disk/resources/download?path={}",
                self.base_url,
                urlencoding::encode(path)
            );
            match self.fetch_link(token, &url).await {
                Ok(href) => return Ok(href),
                Err(StorageError::NotFound(_)) => continue,
                Err(e) => backend_failure = Some(e),
            }
        }
        Err(backend_failure
            .unwrap_or_else(|| StorageError::NotFound(format!("No such file: {}", path))))
    }

    async fn dir_list(&self, path: &str) -> StorageResult<Vec<DirEntry>> {
        let mut entries: Vec<DirEntry> = Vec::new();
        let mut found = false;
        let mut backend_failure: Option<StorageError> = None;

        for token in &self.tokens {
            let url = format!(
                "{}/v1/disk/resources?path={}&limit={}",
                self.base_url,
                urlencoding::encode(path),
                DIR_LIST_LIMIT
            );
            let response = match self
                .client
                .get(&url)
                .header("Authorization", Self::auth_value(token))
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    backend_failure = Some(StorageError::BackendError(e.to_string()));
                    continue;
                }
            };

            match response.status().as_u16() {
                404 => continue,
                s if (200..300).contains(&s) => {
                    let resource = response
                        .json::<ResourceResponse>()
                        .await
                        .map_err(|e| StorageError::BackendError(e.to_string()))?;
                    found = true;
                    if let Some(embedded) = resource.embedded {
                        entries.extend(embedded.items.into_iter().map(|item| DirEntry {
                            name: item.name,
                            kind: if item.kind == "dir" {
                                EntryKind::Dir
                            } else {
                                EntryKind::File
                            },
                            size: item.size,
                            link: None,
                        }));
                    }
                }
                s => {
                    backend_failure = Some(StorageError::BackendError(format!(
                        "Disk API returned {} for listing request",
                        s
                    )));
                }
            }
        }

        if !found {
            return Err(backend_failure
                .unwrap_or_else(|| StorageError::NotFound(format!("No such directory: {}", path))));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn upload(&self, content: ByteStream, extension: &str) -> StorageResult<String> {
        let token = self.token_with_most_free_space().await?;
        let stored_path = format!("/{}.{}", Uuid::new_v4().simple(), extension);

        let href = self
            .fetch_link(
                token,
                &format!(
                    "{}/v1/disk/resources/upload?path={}&overwrite=false",
                    self.base_url,
                    urlencoding::encode(&stored_path)
                ),
            )
            .await
            .map_err(|e| match e {
                StorageError::NotFound(msg) => StorageError::UploadFailed(msg),
                other => other,
            })?;

        let response = self
            .client
            .put(&href)
            .header("Authorization", Self::auth_value(token))
            .body(reqwest::Body::wrap_stream(content))
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::UploadFailed(format!(
                "Disk API returned {} for upload",
                response.status()
            )));
        }

        tracing::debug!(path = %stored_path, "Uploaded file to remote disk");
        Ok(stored_path)
    }
}
