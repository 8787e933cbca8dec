//! Turns a raw forecast document into at most [`MAX_FORECAST_DAYS`] day records.
//!
//! Only the first element of the top-level array is read: it is the short-term
//! forecast block. Later elements hold the weekly forecast at a different
//! cadence.
//!
//! The first `timeSeries` entry supplies dates, weather and wind, all indexed by
//! day. Temperatures live in whichever entry's first area carries `temps`, as a
//! flat list interleaved per day: even offsets are minimums, odd offsets are
//! maximums. The interleaving is the provider's undocumented convention; if it
//! ever changes, `min_temperature`/`max_temperature` below are what break.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::Value;

use crate::error::JmaError;
use crate::types::{DayForecast, ForecastReport, RawForecastDocument, Reading, MAX_FORECAST_DAYS};

/// Extract the day records from a forecast document.
///
/// A structurally broken document fails as a whole; values that are merely
/// missing for a given day become [`Reading::Unavailable`].
pub fn extract(doc: &RawForecastDocument) -> Result<Vec<DayForecast>, JmaError> {
    extract_report(doc).map(|report| report.days)
}

/// Extract the day records together with the document headers.
pub fn extract_report(doc: &RawForecastDocument) -> Result<ForecastReport, JmaError> {
    let block = doc
        .as_value()
        .as_array()
        .ok_or_else(|| JmaError::shape("forecast document is not an array"))?
        .first()
        .ok_or_else(|| JmaError::shape("forecast document is empty"))?;

    let series = array_field(block, "timeSeries")?;
    let primary = series
        .first()
        .ok_or_else(|| JmaError::shape("timeSeries is empty"))?;

    let dates = array_field(primary, "timeDefines")?;
    let area = array_field(primary, "areas")?
        .first()
        .ok_or_else(|| JmaError::shape("first timeSeries has no areas"))?;
    let weathers = array_field(area, "weathers")?;
    let winds = array_field(area, "winds")?;
    let codes = area.get("weatherCodes").and_then(Value::as_array);

    let temps = find_temps(series)?;
    if temps.is_none() {
        tracing::debug!("No temperature series in forecast block");
    }

    let days = dates
        .iter()
        .take(MAX_FORECAST_DAYS)
        .enumerate()
        .map(|(i, raw_date)| -> Result<DayForecast, JmaError> {
            Ok(DayForecast {
                date: parse_date(raw_date)?,
                weather: text_reading(weathers.get(i), "weathers")?,
                wind: text_reading(winds.get(i), "winds")?,
                max_temperature: temperature(temps, 2 * i + 1),
                min_temperature: temperature(temps, 2 * i),
                weather_code: codes
                    .and_then(|c| c.get(i))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastReport {
        publishing_office: block
            .get("publishingOffice")
            .and_then(Value::as_str)
            .map(str::to_string),
        report_datetime: block
            .get("reportDatetime")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok()),
        area_name: area
            .get("area")
            .and_then(|a| a.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        days,
    })
}

fn array_field<'a>(value: &'a Value, key: &str) -> Result<&'a [Value], JmaError> {
    value
        .get(key)
        .ok_or_else(|| JmaError::shape(format!("missing `{}`", key)))?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| JmaError::shape(format!("`{}` is not an array", key)))
}

/// The `temps` list of the first entry whose first area has one.
fn find_temps(series: &[Value]) -> Result<Option<&[Value]>, JmaError> {
    let found = series.iter().find_map(|entry| {
        entry
            .get("areas")?
            .as_array()?
            .first()?
            .get("temps")
    });

    match found {
        None => Ok(None),
        Some(temps) => temps
            .as_array()
            .map(|t| Some(t.as_slice()))
            .ok_or_else(|| JmaError::shape("`temps` is not an array")),
    }
}

fn parse_date(value: &Value) -> Result<NaiveDate, JmaError> {
    let raw = value
        .as_str()
        .ok_or_else(|| JmaError::shape("timeDefines entry is not a string"))?;

    DateTime::<FixedOffset>::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            raw.get(..10)
                .ok_or(())
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| ()))
        })
        .map_err(|_| JmaError::shape(format!("unreadable date `{}`", raw)))
}

/// Weather/wind text for one day. Out of range or null is unavailable, a
/// non-string value means the document is not what we expect.
fn text_reading(value: Option<&Value>, key: &str) -> Result<Reading, JmaError> {
    match value {
        None | Some(Value::Null) => Ok(Reading::Unavailable),
        Some(Value::String(s)) => Ok(Reading::Value(s.clone())),
        Some(other) => Err(JmaError::shape(format!(
            "`{}` entry is not a string: {}",
            key, other
        ))),
    }
}

/// Temperature at a flat offset. Every lookup failure falls back to unavailable,
/// including the empty strings the provider emits for periods already past.
fn temperature(temps: Option<&[Value]>, offset: usize) -> Reading {
    match temps.and_then(|t| t.get(offset)) {
        Some(Value::String(s)) if !s.trim().is_empty() => Reading::Value(s.trim().to_string()),
        Some(Value::Number(n)) => Reading::Value(n.to_string()),
        _ => Reading::Unavailable,
    }
}
