use storefront_core::config::{AppConfig, LoadOptions, LogFormat, LoggingConfig};
use tracing::Level;

type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global subscriber from the effective configuration.
///
/// Commands report configuration errors themselves, so a config that fails to
/// load leaves logging off instead of aborting here.
pub fn init_from_env() {
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        if let Err(error) = init(&config.logging) {
            eprintln!("storefront: logging disabled, subscriber install failed: {error}");
        }
    }
}

/// Logs go to stderr; stdout carries rendered pages and command payloads.
pub fn init(config: &LoggingConfig) -> Result<(), InitError> {
    let log_level = config.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}
