//! StarDrift: a desktop shell for the ledger-backed space exploration game

use eframe::egui;

mod api;
mod app;
mod session_bridge;
mod state;
mod ui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting StarDrift");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("StarDrift")
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "StarDrift",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    )
}
