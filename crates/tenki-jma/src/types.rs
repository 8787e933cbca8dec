use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Upper bound on extracted days: today plus three.
pub const MAX_FORECAST_DAYS: usize = 4;

/// Text shown in place of a value that could not be read.
pub const UNAVAILABLE: &str = "unavailable";

/// Provider-defined identifier of a forecast region (e.g. `130000` for Tokyo).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The decoded forecast response, untouched.
///
/// Only the extractor looks inside; everything else passes it around or
/// dumps it for debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawForecastDocument(serde_json::Value);

impl RawForecastDocument {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// A single forecast value, or the sentinel when it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Value(String),
    Unavailable,
}

impl Reading {
    pub fn as_option(&self) -> Option<&str> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable => None,
        }
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_option().unwrap_or(UNAVAILABLE))
    }
}

/// Weather categories derived from JMA three-digit weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rain,
    Snow,
    #[default]
    Unknown,
}

impl WeatherCondition {
    /// Classify a JMA weather code by its leading digit.
    ///
    /// 1xx sunny, 2xx cloudy, 3xx rain, 4xx snow. Transitions such as
    /// "sunny then rain" (`102`) are classified by the first condition.
    pub fn from_jma_code(code: &str) -> Self {
        let code = code.trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Unknown;
        }
        match code.as_bytes()[0] {
            b'1' => Self::Sunny,
            b'2' => Self::Cloudy,
            b'3' => Self::Rain,
            b'4' => Self::Snow,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Unknown => "Unknown",
        }
    }

    /// Short glyph for text displays
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Sunny => "☀",
            Self::Cloudy => "☁",
            Self::Rain => "☂",
            Self::Snow => "❄",
            Self::Unknown => "?",
        }
    }
}

/// One day of the short-term forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub weather: Reading,
    pub wind: Reading,
    pub max_temperature: Reading,
    pub min_temperature: Reading,
    pub weather_code: Option<String>,
}

impl DayForecast {
    pub fn condition(&self) -> WeatherCondition {
        self.weather_code
            .as_deref()
            .map(WeatherCondition::from_jma_code)
            .unwrap_or_default()
    }
}

/// Day records plus the document headers shown alongside them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub publishing_office: Option<String>,
    pub report_datetime: Option<DateTime<FixedOffset>>,
    pub area_name: Option<String>,
    pub days: Vec<DayForecast>,
}
