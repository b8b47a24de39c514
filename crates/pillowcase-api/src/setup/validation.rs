//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use axum::http::HeaderValue;
use pillowcase_core::Config;

/// Validate critical configuration values
///
/// Fails fast on limits that would reject every request and on CORS origins
/// that cannot be sent as a header.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    for origin in config.cors_origins.iter().filter(|o| o.as_str() != "*") {
        if origin.parse::<HeaderValue>().is_err() {
            return Err(anyhow::anyhow!(
                "CORS origin '{}' is not a valid header value",
                origin
            ));
        }
    }

    if config.is_production() && config.debug {
        tracing::warn!("DEBUG is enabled in production - error details stay hidden");
    }

    if config.max_image_pixels > u32::MAX as u64 {
        tracing::warn!(
            max_image_pixels = config.max_image_pixels,
            "MAX_IMAGE_PIXELS is very high - decoding such images may exhaust memory"
        );
    }

    Ok(())
}
