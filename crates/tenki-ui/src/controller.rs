//! Event handlers connecting the JMA client to the application state.

use std::path::PathBuf;

use tenki_core::DebugConfig;
use tenki_jma::{write_dump, JmaClient, Region, RegionCatalog};

use crate::error_mapping::app_error;
use crate::state::{on_forecast, AppState, RenderInstruction, SelectionTicket};

/// Load the region catalog. On failure the error is logged and the catalog is
/// empty, leaving nothing to select.
pub async fn load_catalog(client: &JmaClient) -> RegionCatalog {
    match client.load_regions().await {
        Ok(catalog) => catalog,
        Err(e) => {
            let err = app_error(e);
            tracing::error!("Failed to load region catalog: {} ({})", err, err.user_message());
            RegionCatalog::default()
        }
    }
}

/// Fetch and extract the forecast for a selection started with
/// [`AppState::begin_selection`].
///
/// Holds no borrow of the state, so several fetches may be in flight; the
/// instruction of any but the latest ticket is dropped by [`AppState::apply`].
pub async fn fetch_selection(
    client: &JmaClient,
    ticket: SelectionTicket,
    region: Region,
) -> RenderInstruction {
    tracing::debug!("Fetching {} ({}) for {:?}", region.name, region.code, ticket);
    let outcome = client.fetch_forecast(&region.code).await;
    on_forecast(ticket, &region, outcome)
}

/// Select `region` and wait for its forecast.
///
/// Returns whether the result was applied.
pub async fn select_region(state: &mut AppState, client: &JmaClient, region: Region) -> bool {
    let ticket = state.begin_selection();
    let instruction = fetch_selection(client, ticket, region).await;
    state.apply(instruction)
}

/// Outcome of a debug dump request
#[derive(Debug, PartialEq, Eq)]
pub enum DumpOutcome {
    Written(PathBuf),
    NothingSelected,
    Disabled,
    /// Logged only; nothing is shown to the user
    Failed,
}

/// Write the raw document of the last selection to the configured dump file.
pub fn dump_last(state: &AppState, config: &DebugConfig) -> DumpOutcome {
    if !config.dump_enabled {
        return DumpOutcome::Disabled;
    }

    let Some(doc) = state.last_document() else {
        return DumpOutcome::NothingSelected;
    };

    let path = &config.dump_file;
    match write_dump(path, doc) {
        Ok(()) => DumpOutcome::Written(path.clone()),
        Err(e) => {
            tracing::warn!("Failed to write forecast dump to {}: {}", path.display(), e);
            DumpOutcome::Failed
        }
    }
}
