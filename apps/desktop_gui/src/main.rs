use std::sync::Arc;

use clap::Parser;
use client_core::{load_settings, Controllers, MissingScoringTransport};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::FlamesGuiApp;

#[derive(Parser, Debug)]
#[command(name = "flames-gui", about = "FLAMES and zodiac compatibility, on the desktop")]
struct StartupConfig {
    /// Scoring server base url; overrides flames.toml and environment.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let startup = StartupConfig::parse();

    let mut settings = load_settings();
    if let Some(server_url) = startup.server_url {
        settings.server_url = server_url;
    }
    let controllers = match Controllers::connect(&settings) {
        Ok(controllers) => controllers,
        Err(err) => {
            tracing::error!(error = %err, "invalid scoring server settings; submissions will fail");
            Controllers::new(&settings, Arc::new(MissingScoringTransport))
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(controllers.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FLAMES")
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([380.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "FLAMES",
        options,
        Box::new(move |_cc| Ok(Box::new(FlamesGuiApp::new(controllers, cmd_tx, ui_rx)))),
    )
}
