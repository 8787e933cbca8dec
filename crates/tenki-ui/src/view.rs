//! Plain-text rendering of the region list and the forecast area.

use std::fmt::Write;

use tenki_jma::{DayForecast, Reading, Region, RegionCatalog};

use crate::state::{Display, ForecastView, FORECAST_UNAVAILABLE, PARSE_ERROR_OCCURRED};

/// Label for a region as shown in the list, e.g. `東京都 (Tokyo)`.
pub fn region_label(region: &Region) -> String {
    match &region.en_name {
        Some(en) if !en.is_empty() => format!("{} ({})", region.name, en),
        _ => region.name.clone(),
    }
}

/// The selectable region list, optionally narrowed by a name filter.
///
/// Numbers are catalog positions (1-based) so they stay valid across filters.
pub fn render_regions(catalog: &RegionCatalog, filter: Option<&str>) -> String {
    if catalog.is_empty() {
        return "No regions available.\n".to_string();
    }

    let mut out = String::new();
    let mut shown = 0;
    for (index, region) in catalog.search(filter.unwrap_or("")) {
        let _ = writeln!(
            out,
            "{:>4}. {}  {}",
            index + 1,
            region.code,
            region_label(region)
        );
        shown += 1;
    }

    if shown == 0 {
        if let Some(filter) = filter {
            let _ = writeln!(out, "No regions match \"{}\".", filter.trim());
        }
    }
    out
}

/// The forecast area for the current display state.
pub fn render_display(display: &Display) -> String {
    match display {
        Display::Idle => "Select a region to see its forecast.\n".to_string(),
        Display::Forecast(view) => render_forecast(view),
        Display::Unavailable { region, hint } => {
            format!("{}: {}\n  {}\n", region_label(region), FORECAST_UNAVAILABLE, hint)
        }
        Display::ParseError { region, hint } => {
            format!("{}: {}\n  {}\n", region_label(region), PARSE_ERROR_OCCURRED, hint)
        }
    }
}

fn render_forecast(view: &ForecastView) -> String {
    let report = &view.report;
    let mut out = String::new();

    let _ = writeln!(out, "Region: {}", region_label(&view.region));
    if let Some(area) = &report.area_name {
        let _ = writeln!(out, "Area: {}", area);
    }
    // The catalog's office name stands in when the document omits its publisher
    let office = report
        .publishing_office
        .as_deref()
        .or(view.region.office_name.as_deref());
    match (&report.report_datetime, office) {
        (Some(at), Some(office)) => {
            let _ = writeln!(out, "Reported: {} by {}", at.format("%Y-%m-%d %H:%M"), office);
        }
        (Some(at), None) => {
            let _ = writeln!(out, "Reported: {}", at.format("%Y-%m-%d %H:%M"));
        }
        (None, Some(office)) => {
            let _ = writeln!(out, "Reported by {}", office);
        }
        (None, None) => {}
    }

    if report.days.is_empty() {
        let _ = writeln!(out, "\nNo forecast days published.");
        return out;
    }

    for day in &report.days {
        out.push('\n');
        out.push_str(&render_day(day));
    }
    out
}

fn render_day(day: &DayForecast) -> String {
    let condition = day.condition();
    format!(
        "{} ({})  {} {}  {}\n  Wind: {}\n  High: {}  Low: {}\n",
        day.date.format("%Y-%m-%d"),
        day.date.format("%a"),
        condition.icon_name(),
        condition.description(),
        day.weather,
        day.wind,
        temperature(&day.max_temperature),
        temperature(&day.min_temperature),
    )
}

fn temperature(reading: &Reading) -> String {
    match reading {
        Reading::Value(v) => format!("{}°C", v),
        Reading::Unavailable => reading.to_string(),
    }
}
