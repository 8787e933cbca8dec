//! Text presentation for Tenki.
//!
//! `AppState` holds everything on screen. Event handlers never touch it in
//! place: they produce a `RenderInstruction` which the state accepts or, when
//! a newer selection has been made since, discards.

pub mod command;
pub mod controller;
pub mod error_mapping;
pub mod state;
pub mod terminal;
pub mod view;

pub use command::{Command, Resolution};
pub use controller::{dump_last, fetch_selection, load_catalog, select_region, DumpOutcome};
pub use state::{on_forecast, AppState, Display, ForecastView, RenderInstruction, SelectionTicket};
pub use terminal::Terminal;
