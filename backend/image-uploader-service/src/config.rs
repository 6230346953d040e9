/// Configuration management for image-uploader-service
///
/// Loads configuration from environment variables with sensible defaults.
use crate::models::UploadMode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown UPLOAD_MODE: {0} (expected passthrough, thumbnail or dimensions)")]
    UnknownMode(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub upload: UploadConfig,
    pub s3: S3Config,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

/// Pipeline settings shared by every invocation
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub mode: UploadMode,
    /// Edge length of the square thumbnail in `thumbnail` mode
    pub thumbnail_size: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Largest `h` or `w` a caller may request
    pub max_dimension: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            mode: UploadMode::Dimensions,
            thumbnail_size: 96,
            jpeg_quality: 75,
            max_dimension: 4096,
        }
    }
}

#[derive(Clone, Debug)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub endpoint: Option<String>,
    /// Overrides the virtual-hosted S3 address in response URLs
    pub public_base_url: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: "boon-image-uploader-service".to_string(),
            region: "ap-south-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            public_base_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let upload_defaults = UploadConfig::default();
        let s3_defaults = S3Config::default();

        let mode = match std::env::var("UPLOAD_MODE") {
            Ok(raw) => raw
                .parse::<UploadMode>()
                .map_err(|_| ConfigError::UnknownMode(raw))?,
            Err(_) => upload_defaults.mode,
        };

        let thumbnail_size = parse_var("THUMBNAIL_SIZE", upload_defaults.thumbnail_size)?;
        if thumbnail_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "THUMBNAIL_SIZE",
                value: thumbnail_size.to_string(),
            });
        }

        Ok(Config {
            app: AppConfig {
                host: std::env::var("LOCAL_SERVER_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("LOCAL_SERVER_PORT", 8080)?,
            },
            upload: UploadConfig {
                mode,
                thumbnail_size,
                jpeg_quality: parse_var::<u8>("JPEG_QUALITY", upload_defaults.jpeg_quality)?
                    .clamp(1, 100),
                max_dimension: parse_var("MAX_DIMENSION", upload_defaults.max_dimension)?,
            },
            s3: S3Config {
                bucket: std::env::var("S3_BUCKET").unwrap_or(s3_defaults.bucket),
                region: std::env::var("AWS_REGION").unwrap_or(s3_defaults.region),
                access_key_id: std::env::var("AWS_ACCESS_KEY_ID").ok(),
                secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").ok(),
                endpoint: std::env::var("S3_ENDPOINT").ok(),
                public_base_url: std::env::var("PUBLIC_BASE_URL").ok(),
            },
        })
    }
}

/// Parse an optional numeric variable, rejecting values that are set but malformed
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
