mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::AtlasApp;
use config::AtlasConfig;
use data::loader;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AtlasConfig::default();

    // Dataset loading is fatal on failure: there is no partial-load mode.
    let dataset = match loader::load_data(&config) {
        Ok(set) => set,
        Err(e) => {
            log::error!("failed to load neighborhood data: {e}");
            std::process::exit(1);
        }
    };
    let parks = match loader::load_parks(&config.parks_path) {
        Ok(parks) => parks,
        Err(e) => {
            log::error!("failed to load park data: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded {} neighborhoods and {} parks",
        dataset.len(),
        parks.len()
    );

    let state = AppState::new(&config, dataset, parks);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cambridge Atlas – Neighborhood Choropleth",
        options,
        Box::new(move |_cc| Ok(Box::new(AtlasApp::new(state)))),
    )
}
