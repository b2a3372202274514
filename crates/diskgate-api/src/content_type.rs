//! Content-type to file-extension resolution.
//!
//! Exact string match over a finite set of recognized MIME types; anything
//! else is rejected rather than guessed. No wildcard or prefix matching, so
//! `image/png; charset=binary` does not resolve.

use diskgate_core::AppError;

/// Map an inbound MIME type to a storage file extension.
pub fn resolve(content_type: &str) -> Result<&'static str, AppError> {
    match content_type {
        "image/png" => Ok("png"),
        "image/jpeg" => Ok("jpg"),
        "image/gif" => Ok("gif"),
        "image/webp" => Ok("webp"),
        "image/svg+xml" => Ok("svg"),
        "text/plain" => Ok("txt"),
        "application/json" => Ok("json"),
        "application/pdf" => Ok("pdf"),
        "application/zip" => Ok("zip"),
        "video/mp4" => Ok("mp4"),
        "audio/mpeg" => Ok("mp3"),
        other => Err(AppError::InvalidInput(format!(
            "Unsupported content type: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_resolve() {
        assert_eq!(resolve("image/png").unwrap(), "png");
        assert_eq!(resolve("image/jpeg").unwrap(), "jpg");
        assert_eq!(resolve("application/pdf").unwrap(), "pdf");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(matches!(
            resolve("image/unknown-x"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_no_prefix_or_parameter_matching() {
        assert!(resolve("image/png; charset=binary").is_err());
        assert!(resolve("image/*").is_err());
        assert!(resolve("IMAGE/PNG").is_err());
    }
}
