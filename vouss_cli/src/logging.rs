use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a level name.
///
/// Both the CLI and the core library log at the same level.
pub fn default_directive(level: &str) -> color_eyre::Result<String> {
    let level: LevelFilter = level.parse().map_err(|_| {
        color_eyre::eyre::eyre!(
            "unknown log level '{level}' (try error, warn, info, debug, trace, off)"
        )
    })?;
    let level = level.to_string().to_lowercase();
    Ok(format!("vouss_cli={level},vouss_core={level}"))
}

/// Initialize logging to stderr so stdout stays clean for tables and JSON.
///
/// The level can be controlled via the `level` parameter or the `RUST_LOG`
/// environment variable, which wins when set.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let default_filter = default_directive(level)?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::debug!(filter = %default_filter, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("warn").unwrap(), "vouss_cli=warn,vouss_core=warn");
        assert_eq!(default_directive("DEBUG").unwrap(), "vouss_cli=debug,vouss_core=debug");
        assert!(default_directive("loud").is_err());
    }
}
