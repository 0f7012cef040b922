//! Configuration module
//!
//! Server, storage, gateway and pipeline settings. Bucket, region, gateway name and
//! stage are all read from the environment.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::time::Duration;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 5000;
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_GATEWAY_NAME: &str = "JahnaviAPIGateway";
const DEFAULT_GATEWAY_STAGE: &str = "prod";
const MAX_FILE_SIZE_MB: usize = 16;
const STORAGE_TIMEOUT_SECS: u64 = 60;
const CONTROL_PLANE_TIMEOUT_SECS: u64 = 10;
const PROCESSING_TIMEOUT_SECS: u64 = 120;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// How the upload handler reaches the processing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// Upload and forward within the same request.
    Direct,
    /// Upload, then redirect to `/process_file/{filename}` which forwards.
    Deferred,
}

impl PipelineMode {
    pub fn default_allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            PipelineMode::Direct => &["png", "jpg", "jpeg", "gif"],
            PipelineMode::Deferred => &["png", "jpg", "jpeg"],
        }
    }

    pub fn default_processing_path(&self) -> &'static str {
        match self {
            PipelineMode::Direct => "/rekognition-polly",
            PipelineMode::Deferred => "/textract-polly",
        }
    }
}

impl FromStr for PipelineMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(PipelineMode::Direct),
            "deferred" => Ok(PipelineMode::Deferred),
            _ => Err(anyhow::anyhow!(
                "Invalid pipeline mode: {} (expected 'direct' or 'deferred')",
                s
            )),
        }
    }
}

impl Display for PipelineMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PipelineMode::Direct => write!(f, "direct"),
            PipelineMode::Deferred => write!(f, "deferred"),
        }
    }
}

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub http_concurrency_limit: usize,
    /// `compact` or `json`
    pub log_format: String,
}

/// Upload pipeline configuration
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub base: BaseConfig,
    pub mode: PipelineMode,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub bucket: String,
    pub region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, LocalStack, etc.)
    pub local_storage_path: Option<String>,
    // Gateway configuration
    pub gateway_name: String,
    pub gateway_stage: String,
    pub gateway_base_url: Option<String>,
    pub gateway_follow_pages: bool,
    // Upload validation and forwarding
    pub allowed_extensions: Vec<String>,
    pub processing_path: String,
    pub max_file_size_bytes: usize,
    // Outbound call timeouts
    pub storage_timeout_secs: u64,
    pub control_plane_timeout_secs: u64,
    pub processing_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PipelineConfig>);

impl Config {
    fn as_pipeline(&self) -> &PipelineConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_pipeline().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = PipelineConfig::from_vars(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_pipeline().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_pipeline().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_pipeline().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_pipeline().base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.as_pipeline().base.log_format
    }

    pub fn mode(&self) -> PipelineMode {
        self.as_pipeline().mode
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_pipeline().storage_backend
    }

    pub fn bucket(&self) -> &str {
        &self.as_pipeline().bucket
    }

    pub fn region(&self) -> &str {
        &self.as_pipeline().region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_pipeline().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_pipeline().local_storage_path.as_deref()
    }

    pub fn gateway_name(&self) -> &str {
        &self.as_pipeline().gateway_name
    }

    pub fn gateway_stage(&self) -> &str {
        &self.as_pipeline().gateway_stage
    }

    pub fn gateway_base_url(&self) -> Option<&str> {
        self.as_pipeline().gateway_base_url.as_deref()
    }

    pub fn gateway_follow_pages(&self) -> bool {
        self.as_pipeline().gateway_follow_pages
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.as_pipeline().allowed_extensions
    }

    pub fn processing_path(&self) -> &str {
        &self.as_pipeline().processing_path
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_pipeline().max_file_size_bytes
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.as_pipeline().storage_timeout_secs)
    }

    pub fn control_plane_timeout(&self) -> Duration {
        Duration::from_secs(self.as_pipeline().control_plane_timeout_secs)
    }

    pub fn processing_timeout(&self) -> Duration {
        Duration::from_secs(self.as_pipeline().processing_timeout_secs)
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl PipelineConfig {
    /// Build configuration from a variable lookup (the process environment in production).
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            environment,
            http_concurrency_limit: parse_or(var("HTTP_CONCURRENCY_LIMIT"), HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_format: var("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        let mode = match var("PIPELINE_MODE") {
            Some(mode) => mode.parse()?,
            None => PipelineMode::Direct,
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => StorageBackend::S3,
        };

        let allowed_extensions = match var("ALLOWED_EXTENSIONS") {
            Some(list) => split_list(&list),
            None => mode
                .default_allowed_extensions()
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        };

        let processing_path = var("PROCESSING_PATH")
            .map(|path| path.trim().to_string())
            .unwrap_or_else(|| mode.default_processing_path().to_string());

        let config = PipelineConfig {
            base,
            mode,
            storage_backend,
            bucket: var("S3_BUCKET").unwrap_or_default().trim().to_string(),
            region: var("AWS_REGION")
                .or_else(|| var("S3_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_endpoint: var("S3_ENDPOINT").filter(|s| !s.is_empty()),
            local_storage_path: var("LOCAL_STORAGE_PATH").filter(|s| !s.is_empty()),
            gateway_name: var("GATEWAY_NAME").unwrap_or_else(|| DEFAULT_GATEWAY_NAME.to_string()),
            gateway_stage: var("GATEWAY_STAGE")
                .unwrap_or_else(|| DEFAULT_GATEWAY_STAGE.to_string()),
            gateway_base_url: var("GATEWAY_BASE_URL").filter(|s| !s.is_empty()),
            gateway_follow_pages: parse_or(
                var("GATEWAY_FOLLOW_PAGES").map(|s| s.to_lowercase()),
                true,
            ),
            allowed_extensions,
            processing_path,
            max_file_size_bytes: parse_or(var("MAX_FILE_SIZE_MB"), MAX_FILE_SIZE_MB)
                .checked_mul(1024 * 1024)
                .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large"))?,
            storage_timeout_secs: parse_or(var("STORAGE_TIMEOUT_SECS"), STORAGE_TIMEOUT_SECS),
            control_plane_timeout_secs: parse_or(
                var("CONTROL_PLANE_TIMEOUT_SECS"),
                CONTROL_PLANE_TIMEOUT_SECS,
            ),
            processing_timeout_secs: parse_or(
                var("PROCESSING_TIMEOUT_SECS"),
                PROCESSING_TIMEOUT_SECS,
            ),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.bucket.is_empty() {
            return Err(anyhow::anyhow!(
                "S3_BUCKET must be set; it is both the storage target and the processing payload bucket"
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must contain at least one extension"
            ));
        }

        if !self.processing_path.starts_with('/') {
            return Err(anyhow::anyhow!(
                "PROCESSING_PATH must start with '/' (got '{}')",
                self.processing_path
            ));
        }

        if self.gateway_name.trim().is_empty() || self.gateway_stage.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "GATEWAY_NAME and GATEWAY_STAGE must not be empty"
            ));
        }

        if self.base.log_format != "compact" && self.base.log_format != "json" {
            return Err(anyhow::anyhow!(
                "LOG_FORMAT must be 'compact' or 'json' (got '{}')",
                self.base.log_format
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }

        for (name, secs) in [
            ("STORAGE_TIMEOUT_SECS", self.storage_timeout_secs),
            ("CONTROL_PLANE_TIMEOUT_SECS", self.control_plane_timeout_secs),
            ("PROCESSING_TIMEOUT_SECS", self.processing_timeout_secs),
        ] {
            if secs == 0 {
                return Err(anyhow::anyhow!("{} must be greater than zero", name));
            }
        }

        match self.storage_backend {
            StorageBackend::S3 => {}
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
