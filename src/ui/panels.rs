use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – metric, exclusion, and overlay controls
// ---------------------------------------------------------------------------

/// Render the control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // Clone what we need so we can mutate state inside the loops.
    let columns = state.metric_columns.clone();
    let names = state.all_names.clone();
    let selected_metric = state.selected_metric.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Metric selector ----
            ui.strong("Color by");
            egui::ComboBox::from_id_salt("metric")
                .selected_text(&selected_metric)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &columns {
                        if ui.selectable_label(selected_metric == *col, col).clicked() {
                            state.set_metric(col.clone());
                        }
                    }
                });
            ui.separator();

            // ---- Exclusion multi-select ----
            let n_excluded = state.excluded.len();
            let header_text = format!("Exclude from color scale  ({n_excluded}/{})", names.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("exclusions")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.exclude_all();
                        }
                        if ui.small_button("None").clicked() {
                            state.exclude_none();
                        }
                    });

                    for name in &names {
                        let mut checked = state.excluded.contains(name);
                        if ui.checkbox(&mut checked, name).changed() {
                            state.toggle_excluded(name);
                        }
                    }
                });
            ui.separator();

            // ---- Park overlay toggle ----
            ui.checkbox(&mut state.show_parks, "Show parks");
            ui.separator();

            // ---- Ramp legend ----
            ui.strong("Scale");
            ui.horizontal(|ui: &mut Ui| {
                swatch(ui, state, state.ramp.min);
                ui.label(format!("{}", state.ramp.min));
            });
            ui.horizontal(|ui: &mut Ui| {
                swatch(ui, state, state.ramp.max);
                ui.label(format!("{}", state.ramp.max));
            });
        });
}

/// Small filled rectangle showing the ramp color at `value`.
fn swatch(ui: &mut Ui, state: &AppState, value: f64) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 12.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 2.0, state.ramp.color_for(value));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Cambridge Neighborhoods – Home Prices & Local Opinions");
        ui.separator();
        ui.label(format!(
            "{} neighborhoods, {} excluded",
            state.dataset.len(),
            state.excluded.len()
        ));
        ui.separator();
        ui.label(format!(
            "{}: {} – {}",
            state.selected_metric, state.ramp.min, state.ramp.max
        ));
    });
}
