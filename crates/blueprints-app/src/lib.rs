//! Blueprints Application
//!
//! The native viewer shell: windowing, the egui search panel and the
//! display dialog drawing the selected blueprint with Vello.

mod app;
mod ui;

pub use app::{App, AppConfig, DEFAULT_DIRECTORY_URL, DIRECTORY_URL_ENV};
pub use ui::{ModalLayout, UiAction, UiState, render_ui};
