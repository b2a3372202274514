use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregated disk status across all storage accounts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiskStatus {
    /// Total capacity in bytes
    pub total_space: u64,
    /// Used bytes
    pub used_space: u64,
    /// Free bytes
    pub free_space: u64,
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Size in bytes; directories have none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Browse link for this entry, filled in by the gateway
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_entry_serialization_shape() {
        let entry = DirEntry {
            name: "photo.png".to_string(),
            kind: EntryKind::File,
            size: Some(1024),
            link: Some("/pics/photo.png".to_string()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["size"], 1024);
        assert_eq!(json["link"], "/pics/photo.png");
    }

    #[test]
    fn test_dir_entry_omits_missing_size() {
        let entry = DirEntry {
            name: "pics".to_string(),
            kind: EntryKind::Dir,
            size: None,
            link: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("size").is_none());
    }

    #[test]
    fn test_free_space_arithmetic() {
        let status = DiskStatus {
            total_space: 100,
            used_space: 40,
            free_space: 60,
        };
        assert_eq!(status.total_space - status.used_space, status.free_space);
    }
}
