use std::env;
use std::path::PathBuf;
use anyhow::{Result, Context};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub upload_dir: PathBuf,
    pub max_file_size_mb: usize,
    pub cors_max_age_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            upload_dir: PathBuf::from("uploads"),
            max_file_size_mb: 16,
            cors_max_age_seconds: 86400,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let defaults = Config::default();

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: {}", defaults.server_host);
                defaults.server_host.clone()
            }),
            server_port: Self::parse_env_var("SERVER_PORT", defaults.server_port)
                .context("Failed to parse SERVER_PORT")?,
            upload_dir: env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or_else(|_| {
                info!("UPLOAD_DIR not set, using default: {}", defaults.upload_dir.display());
                defaults.upload_dir.clone()
            }),
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", defaults.max_file_size_mb)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            cors_max_age_seconds: Self::parse_env_var("CORS_MAX_AGE_SECONDS", defaults.cors_max_age_seconds)
                .context("Failed to parse CORS_MAX_AGE_SECONDS")?,
        };

        config.validate()?;

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_file_size_mb.checked_mul(1024 * 1024).is_none() {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB is too large"));
        }
        if self.upload_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR must not be empty"));
        }
        Ok(())
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
