use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Builds the `tracing_subscriber::EnvFilter` directive string for a
/// `LoggingConfig`: the base level first, then one `target=level` directive
/// per entry in `event_logging`, the same layering `chronx-wallet`'s
/// `"warn,chronx_wallet=info"` string expresses by hand.
fn filter_directives(logging: &LoggingConfig) -> String {
    let mut directives = vec![logging.level.as_str().to_string()];
    for (event, level) in &logging.event_logging {
        directives.push(format!("{event}={}", level.as_str()));
    }
    directives.join(",")
}

/// Initializes the global `tracing` subscriber from `OriginalsConfig`'s
/// logging settings. A no-op (fully quiet) filter is installed when logging
/// is disabled, so downstream `tracing::info!`/`warn!` call sites never need
/// to branch on `enable_logging` themselves.
///
/// Must be called at most once per process; a second call returns an error
/// rather than panicking, since library consumers may share a process with
/// other `tracing` users.
pub fn init_tracing(enable_logging: bool, logging: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let directives = if enable_logging { filter_directives(logging) } else { "off".to_string() };
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use std::collections::HashMap;

    #[test]
    fn directives_combine_base_level_and_event_overrides() {
        let mut event_logging = HashMap::new();
        event_logging.insert("asset_migrated".to_string(), LogLevel::Debug);
        let logging = LoggingConfig { level: LogLevel::Warn, event_logging, ..LoggingConfig::default() };
        let directives = filter_directives(&logging);
        assert!(directives.starts_with("warn"));
        assert!(directives.contains("asset_migrated=debug"));
    }
}
