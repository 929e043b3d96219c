#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod controller;
mod error;
mod io;
mod model;
mod ui;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = config::LabSettings::load();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting AI Learning Lab");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("AI Learning Lab"),
        ..Default::default()
    };

    eframe::run_native(
        "AI Learning Lab",
        options,
        Box::new(|cc| Ok(Box::new(app::LabApp::new(cc, settings)))),
    )
}
