pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    Config, ConfigValidationError, DebugConfig, JmaConfig, ValidationResult,
    REGION_CODE_PLACEHOLDER,
};
pub use error::{AppError, ConfigError, NetworkError, ParseError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Log lines go to stderr so that rendered forecasts on stdout stay readable.
/// Verbosity follows `RUST_LOG`, defaulting to `info`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Tenki core initialized");
    Ok(())
}
