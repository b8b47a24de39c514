//! Configuration module
//!
//! Settings are read once at startup from the process environment (after
//! loading an optional `.env` file) and passed explicitly to the components
//! that need them.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_HOST, DEFAULT_MAX_IMAGE_PIXELS, DEFAULT_MAX_UPLOAD_SIZE_MB, DEFAULT_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

const HTTP_CONCURRENCY_LIMIT: usize = 256;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub environment: String,
    /// Flat directory holding every stored image.
    pub image_directory: PathBuf,
    pub cors_origins: Vec<String>,
    /// Upper bound on `width * height` accepted at upload time.
    pub max_image_pixels: u64,
    pub max_upload_size_mb: usize,
    pub request_timeout_secs: u64,
    pub http_concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let debug = lookup("DEBUG")
            .map(|raw| parse_bool(&raw))
            .transpose()
            .map_err(|_| anyhow::anyhow!("DEBUG must be true or false"))?
            .unwrap_or(false);

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let image_directory = lookup("IMAGE_DIRECTORY")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("IMAGE_DIRECTORY must be set"))?;

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => vec![format!("http://{}", host), format!("http://{}:{}", host, port)],
        };

        let max_image_pixels = lookup("MAX_IMAGE_PIXELS")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_IMAGE_PIXELS);

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        let request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let http_concurrency_limit = lookup("HTTP_CONCURRENCY_LIMIT")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(HTTP_CONCURRENCY_LIMIT);

        Ok(Config {
            host,
            port,
            debug,
            environment,
            image_directory,
            cors_origins,
            max_image_pixels,
            max_upload_size_mb,
            request_timeout_secs,
            http_concurrency_limit,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.image_directory.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("IMAGE_DIRECTORY cannot be empty"));
        }

        if self.max_image_pixels == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_PIXELS must be greater than 0"));
        }

        if self.max_upload_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "REQUEST_TIMEOUT_SECS must be greater than 0"
            ));
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!(
                "HTTP_CONCURRENCY_LIMIT must be greater than 0"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_mb * 1024 * 1024
    }
}

fn parse_bool(raw: &str) -> Result<bool, ()> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(()),
    }
}
