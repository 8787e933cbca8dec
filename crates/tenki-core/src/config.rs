use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Placeholder substituted with the region code in the forecast URL template.
pub const REGION_CODE_PLACEHOLDER: &str = "{code}";

const DEFAULT_AREA_URL: &str = "https://www.jma.go.jp/bosai/common/const/area.json";
const DEFAULT_FORECAST_URL_TEMPLATE: &str =
    "https://www.jma.go.jp/bosai/forecast/data/forecast/{code}.json";
const DEFAULT_DUMP_FILE: &str = "forecast_dump.json";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the config file is looked up in (not read from the file)
    #[serde(skip, default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Weather API endpoints
    #[serde(default)]
    pub jma: JmaConfig,

    /// Debug dump settings
    #[serde(default)]
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JmaConfig {
    /// Region catalog endpoint
    #[serde(default = "default_area_url")]
    pub area_url: String,

    /// Forecast endpoint, `{code}` is replaced with the region code
    #[serde(default = "default_forecast_url_template")]
    pub forecast_url_template: String,

    /// Request timeout. Unset means the HTTP client's own default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_area_url() -> String {
    DEFAULT_AREA_URL.to_string()
}

fn default_forecast_url_template() -> String {
    DEFAULT_FORECAST_URL_TEMPLATE.to_string()
}

impl Default for JmaConfig {
    fn default() -> Self {
        Self {
            area_url: default_area_url(),
            forecast_url_template: default_forecast_url_template(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Allow writing the raw forecast document on request
    #[serde(default = "default_dump_enabled")]
    pub dump_enabled: bool,

    /// File the raw forecast document is written to
    #[serde(default = "default_dump_file")]
    pub dump_file: PathBuf,
}

fn default_dump_enabled() -> bool {
    true
}

fn default_dump_file() -> PathBuf {
    PathBuf::from(DEFAULT_DUMP_FILE)
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            dump_enabled: default_dump_enabled(),
            dump_file: default_dump_file(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tenki")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            jma: JmaConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Config {
    /// `config.toml` in the user config directory
    pub fn default_path() -> PathBuf {
        default_config_dir().join("config.toml")
    }

    /// Load configuration from an explicit file path.
    ///
    /// A missing file is not an error: defaults are used and nothing is
    /// written back to disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        if let Some(parent) = path.parent() {
            config.config_dir = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load configuration from `path` and validate it
    ///
    /// Warnings are logged; validation errors fail the load.
    pub fn load_validated_from(path: &Path) -> Result<(Self, ValidationResult), ConfigError> {
        let config =
            Self::load_from(path).map_err(|e| ConfigError::ParseError(format!("{:#}", e)))?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_url(&self.jma.area_url, "jma.area_url", &mut result);

        let template = &self.jma.forecast_url_template;
        if !template.contains(REGION_CODE_PLACEHOLDER) {
            result.add_error(
                "jma.forecast_url_template",
                format!("Template must contain {}", REGION_CODE_PLACEHOLDER),
            );
        }
        // Validate with a representative code so the placeholder braces don't trip the parser
        Self::validate_url(
            &template.replace(REGION_CODE_PLACEHOLDER, "130000"),
            "jma.forecast_url_template",
            &mut result,
        );

        match self.jma.request_timeout_secs {
            Some(0) => result.add_error(
                "jma.request_timeout_secs",
                "Timeout must be greater than 0 (omit it to use the client default)",
            ),
            Some(secs) if secs > 300 => result.add_warning(
                "jma.request_timeout_secs",
                "Request timeout is unusually long (>300s)",
            ),
            _ => {}
        }

        if self.debug.dump_file.as_os_str().is_empty() {
            result.add_error("debug.dump_file", "Dump file path must not be empty");
        } else if self.debug.dump_file.is_dir() {
            result.add_error(
                "debug.dump_file",
                format!("Path is a directory: {}", self.debug.dump_file.display()),
            );
        }

        result
    }

    fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }
}
