use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use tenki_jma::{JmaClient, JmaEndpoints};
use tenki_ui::{load_catalog, AppState, Terminal};

fn main() -> Result<()> {
    // Initialize core
    tenki_core::init()?;

    // A broken config file is logged and replaced by defaults
    let mut app = tenki_core::App::new();
    let config = app.config().clone();

    tracing::info!("Tenki started");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let endpoints = JmaEndpoints::from(&config.jma);
    tracing::debug!(
        "Catalog: {}, forecasts: {}",
        endpoints.area_url,
        endpoints.forecast_url_template
    );
    let client = JmaClient::new(
        endpoints,
        config.jma.request_timeout_secs.map(Duration::from_secs),
    )
    .context("Failed to build HTTP client")?;

    // An unreachable catalog is not fatal: the list is just empty
    let mut state = AppState::new(runtime.block_on(load_catalog(&client)));

    let stdin = io::stdin();
    Terminal::new(&runtime, &client, &config.debug, stdin.lock(), io::stdout())
        .run(&mut state)
        .context("Terminal I/O failed")?;

    app.shutdown();

    Ok(())
}
