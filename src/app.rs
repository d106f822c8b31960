use eframe::egui;

use crate::state::AppState;
use crate::ui::{map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AtlasApp {
    pub state: AppState,
}

impl AtlasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: metric / exclusion / overlay controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: choropleth map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            map::choropleth_map(ui, &self.state);
        });
    }
}
