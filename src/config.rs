//! Configuration management for the asset editor server
//!
//! Settings come from an optional `config.toml`, layered with environment
//! overrides (`ASSET_EDITOR__PORT=8080`, `ASSET_EDITOR__UPLOAD_DIR=/srv/uploads`).

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Image slots the site layout references by name.
pub const DEFAULT_ALLOWED_IMAGES: [&str; 11] = [
    "banner1.jpg",
    "banner2.jpg",
    "banner3.jpg",
    "about.jpg",
    "nia.jpg",
    "sarah.jpg",
    "mara.jpg",
    "hillary.jpg",
    "radha.jpg",
    "christian.jpg",
    "ameen.jpg",
];

const ENV_PREFIX: &str = "ASSET_EDITOR";

/// Complete server configuration, loaded once at startup
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Directory holding captions and images, served under `/uploads`
    pub upload_dir: String,

    /// Prefix used to build the URLs returned by uploads
    pub public_base_url: String,

    /// Maximum request body size for uploads, in MB
    pub max_upload_size_mb: u64,

    /// Fixed image slot names accepted by standalone image uploads and deletes
    pub allowed_images: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            upload_dir: "./Uploads".to_string(),
            public_base_url: "http://localhost:5000".to_string(),
            max_upload_size_mb: 20,
            allowed_images: DEFAULT_ALLOWED_IMAGES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `./config.toml` with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file stem (extension optional).
    ///
    /// A missing file is not an error: every key has a default.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("upload_dir", defaults.upload_dir)?
            .set_default("public_base_url", defaults.public_base_url)?
            .set_default("max_upload_size_mb", defaults.max_upload_size_mb as i64)?
            .set_default("allowed_images", defaults.allowed_images)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.upload_dir.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "upload_dir cannot be empty".into(),
            ));
        }

        if self.max_upload_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_upload_size_mb must be greater than 0".into(),
            ));
        }

        if self.allowed_images.is_empty() {
            return Err(config::ConfigError::Message(
                "allowed_images cannot be empty".into(),
            ));
        }

        for name in &self.allowed_images {
            let is_plain_jpg = name.ends_with(".jpg")
                && name.len() > ".jpg".len()
                && !name.contains(['/', '\\'])
                && !name.contains("..");
            if !is_plain_jpg || name.to_lowercase() != *name {
                return Err(config::ConfigError::Message(format!(
                    "allowed_images entry '{name}' must be a lower-case .jpg file name"
                )));
            }
        }

        Ok(())
    }

    /// Bind address and port as a socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn upload_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.upload_dir)
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize).saturating_mul(1024 * 1024)
    }

    /// Public URL for a stored file
    pub fn public_url(&self, filename: &str) -> String {
        format!(
            "{}/uploads/{}",
            self.public_base_url.trim_end_matches('/'),
            filename
        )
    }
}
