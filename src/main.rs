mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use app::EcosystemChartsApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path on the command line, opened at startup.
    let mut state = AppState::default();
    if let Some(path) = std::env::args().nth(1) {
        ui::panels::load_into(&mut state, Path::new(&path), ui::panels::Target::Dataset);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ecosystem Charts",
        options,
        Box::new(|_cc| Ok(Box::new(EcosystemChartsApp::with_state(state)))),
    )
}
