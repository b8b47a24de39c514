use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "pillowcase=info,pillowcase_api=info,pillowcase_storage=info,pillowcase_processing=info,tower_http=info";
const DEBUG_FILTER: &str = "pillowcase=debug,pillowcase_api=debug,pillowcase_storage=debug,pillowcase_processing=debug,tower_http=debug";

/// Initialize console tracing.
///
/// `RUST_LOG` wins when set; otherwise the filter is chosen by `debug_enabled`.
pub fn init_telemetry(debug_enabled: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let default_filter = if debug_enabled { DEBUG_FILTER } else { DEFAULT_FILTER };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(console_fmt)
        .try_init()?;

    tracing::info!(debug_enabled, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_cover_every_crate() {
        for target in ["pillowcase_api", "pillowcase_storage", "pillowcase_processing"] {
            assert!(DEFAULT_FILTER.contains(&format!("{}=info", target)));
            assert!(DEBUG_FILTER.contains(&format!("{}=debug", target)));
        }
    }

    #[test]
    fn test_init_telemetry_twice_reports_error() {
        // the global subscriber can only be installed once per process
        let _ = init_telemetry(true);
        assert!(init_telemetry(false).is_err());
    }
}
