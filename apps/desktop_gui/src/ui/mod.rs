//! UI layer for desktop GUI: app shell and custom widgets.

pub mod app;
pub mod widgets;

pub use app::FlamesGuiApp;
