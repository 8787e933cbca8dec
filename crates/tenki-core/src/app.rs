use std::path::Path;

use crate::Config;

/// Application lifecycle: owns the loaded configuration.
pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance from the user's config file (or defaults).
    pub fn new() -> Self {
        Self::from_file(&Config::default_path())
    }

    /// Create an application instance from the config file at `path`.
    ///
    /// An unreadable or invalid file is logged and replaced by defaults.
    pub fn from_file(path: &Path) -> Self {
        let config = match Config::load_validated_from(path) {
            Ok((config, validation)) => {
                tracing::debug!(
                    "Configuration loaded from {} ({} warnings)",
                    config.config_dir.display(),
                    validation.warnings.len()
                );
                config
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring config file {}: {} ({})",
                    path.display(),
                    e,
                    e.user_message()
                );
                Config::default()
            }
        };
        Self::with_config(config)
    }

    /// Create an application instance around an already-built configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) {
        tracing::info!("Shutting down application");
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config_keeps_settings() {
        let mut config = Config::default();
        config.debug.dump_enabled = false;
        let app = App::with_config(config);
        assert!(!app.config().debug.dump_enabled);
    }

    #[test]
    fn test_reads_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[debug]\ndump_enabled = false\n").unwrap();

        let app = App::from_file(&path);
        assert!(!app.config().debug.dump_enabled);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[jma\narea_url = ").unwrap();

        let app = App::from_file(&path);
        let defaults = Config::default();
        assert_eq!(app.config().jma.area_url, defaults.jma.area_url);
        assert!(app.config().validate().is_valid());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[jma]\narea_url = \"ftp://example.test/area.json\"\nrequest_timeout_secs = 0\n",
        )
        .unwrap();

        let app = App::from_file(&path);
        assert_eq!(app.config().jma.request_timeout_secs, None);
        assert!(app.config().jma.area_url.starts_with("https://"));
    }
}
