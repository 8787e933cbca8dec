use tenki_jma::{
    extract_report, FailureKind, ForecastReport, JmaError, RawForecastDocument, Region,
    RegionCatalog,
};

use crate::error_mapping::app_error;

/// Shown when the forecast could not be fetched.
pub const FORECAST_UNAVAILABLE: &str = "forecast unavailable";

/// Shown when the forecast was fetched but could not be read.
pub const PARSE_ERROR_OCCURRED: &str = "parse error occurred";

/// Identifies one region selection. Later selections get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SelectionTicket(u64);

/// A successfully extracted forecast and the region it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub region: Region,
    pub report: ForecastReport,
}

/// What the forecast area currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Display {
    /// Nothing selected yet
    #[default]
    Idle,
    Forecast(ForecastView),
    /// Fetch failed; `hint` is a user-facing explanation
    Unavailable { region: Region, hint: &'static str },
    /// Fetched but unreadable
    ParseError { region: Region, hint: &'static str },
}

/// Result of handling one selection, to be applied to [`AppState`].
#[derive(Debug, Clone)]
pub struct RenderInstruction {
    pub ticket: SelectionTicket,
    pub display: Display,
    /// Raw document kept for the debug dump, if one was received
    pub document: Option<RawForecastDocument>,
}

/// Everything the presentation owns.
#[derive(Debug, Default)]
pub struct AppState {
    catalog: RegionCatalog,
    latest: SelectionTicket,
    display: Display,
    last_document: Option<RawForecastDocument>,
}

impl AppState {
    pub fn new(catalog: RegionCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Raw document of the most recently applied selection
    pub fn last_document(&self) -> Option<&RawForecastDocument> {
        self.last_document.as_ref()
    }

    /// Register a new selection. Results for any earlier ticket become stale.
    pub fn begin_selection(&mut self) -> SelectionTicket {
        self.latest = SelectionTicket(self.latest.0 + 1);
        self.latest
    }

    /// Apply an instruction if it belongs to the latest selection.
    ///
    /// Returns false (and changes nothing) for stale instructions.
    pub fn apply(&mut self, instruction: RenderInstruction) -> bool {
        if instruction.ticket != self.latest {
            tracing::debug!(
                "Discarding stale forecast (ticket {:?}, latest {:?})",
                instruction.ticket,
                self.latest
            );
            return false;
        }

        self.display = instruction.display;
        self.last_document = instruction.document;
        true
    }
}

/// Turn the outcome of a forecast fetch into a render instruction.
///
/// Failures are logged here and replaced by fallback displays.
pub fn on_forecast(
    ticket: SelectionTicket,
    region: &Region,
    outcome: Result<RawForecastDocument, JmaError>,
) -> RenderInstruction {
    let (display, document) = match outcome {
        Ok(doc) => match extract_report(&doc) {
            Ok(report) => {
                tracing::info!(
                    "Forecast for {} ({}): {} days",
                    region.name,
                    region.code,
                    report.days.len()
                );
                (
                    Display::Forecast(ForecastView {
                        region: region.clone(),
                        report,
                    }),
                    Some(doc),
                )
            }
            Err(e) => {
                tracing::warn!("Failed to read forecast for {}: {}", region.code, e);
                (failure_display(region, e), Some(doc))
            }
        },
        Err(e) => {
            match e.status() {
                Some(status) => tracing::error!(
                    "Forecast for {} answered with HTTP {}: {}",
                    region.code,
                    status,
                    e
                ),
                None => tracing::error!("Failed to fetch forecast for {}: {}", region.code, e),
            }
            (failure_display(region, e), None)
        }
    };

    RenderInstruction {
        ticket,
        display,
        document,
    }
}

fn failure_display(region: &Region, error: JmaError) -> Display {
    let kind = error.kind();
    let hint = app_error(error).user_message();
    let region = region.clone();
    match kind {
        FailureKind::Network => Display::Unavailable { region, hint },
        FailureKind::Parse => Display::ParseError { region, hint },
    }
}
