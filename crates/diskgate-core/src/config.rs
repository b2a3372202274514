//! Configuration module
//!
//! Gateway configuration loaded from environment variables (with `.env`
//! support via dotenvy). `TOKEN_LIST` holds the backend credential set as a
//! JSON array; it is opaque to the gateway and handed to the storage backend.

use std::env;

use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 1024 * 1024 * 1024; // 1 GiB
const DEFAULT_DISK_API_BASE_URL: &str = "https://cloud-api.yandex.net";

/// Gateway configuration.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    /// Backend credential set (one OAuth token per storage account).
    pub token_list: Vec<String>,
    pub environment: String,
    pub max_upload_size_bytes: usize,
    pub storage_backend: Option<StorageBackend>,
    pub disk_api_base_url: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<GatewayConfig>);

impl Config {
    fn inner(&self) -> &GatewayConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = GatewayConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    // Convenience getters
    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().cors_origins
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().jwt_secret
    }

    pub fn token_list(&self) -> &[String] {
        &self.inner().token_list
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.inner().storage_backend
    }

    pub fn disk_api_base_url(&self) -> &str {
        &self.inner().disk_api_base_url
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let token_list = match env::var("TOKEN_LIST") {
            Ok(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .map_err(|e| anyhow::anyhow!("TOKEN_LIST must be a JSON array of strings: {}", e))?,
            Err(_) => Vec::new(),
        };

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .map(|s| {
                s.parse::<StorageBackend>()
                    .map_err(|e| anyhow::anyhow!(e))
            })
            .transpose()?;

        Ok(GatewayConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for upload tokens"))?,
            token_list,
            environment,
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_BYTES.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_BYTES),
            storage_backend,
            disk_api_base_url: env::var("DISK_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DISK_API_BASE_URL.to_string()),
        })
    }
}
