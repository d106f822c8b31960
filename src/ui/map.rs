use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points, Polygon};

use crate::color::style_for;
use crate::config::VOTES_COLUMN;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Choropleth map (central panel)
// ---------------------------------------------------------------------------

/// Vertical stretch so a degree of longitude and a degree of latitude render
/// roughly square at Cambridge's latitude (1 / cos 42.4° ≈ 1.35).
const LAT_ASPECT: f32 = 1.35;

/// Render the neighborhood polygons and the optional park overlay.
pub fn choropleth_map(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("The boundary file contains no neighborhoods");
        });
        return;
    }

    let mut pointer = None;

    let response = Plot::new("choropleth")
        .legend(Legend::default())
        .data_aspect(LAT_ASPECT)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for feature in &state.dataset.features {
                let style = style_for(
                    feature,
                    &state.selected_metric,
                    &state.excluded,
                    &state.ramp,
                );
                for ring in &feature.rings {
                    let points = PlotPoints::from(ring.clone());
                    let polygon = Polygon::new(points)
                        .fill_color(style.fill)
                        .stroke(style.stroke)
                        .allow_hover(false);
                    plot_ui.polygon(polygon);
                }
            }

            if state.show_parks && !state.parks.is_empty() {
                let points: PlotPoints =
                    state.parks.iter().map(|p| [p.lon, p.lat]).collect();
                plot_ui.points(
                    Points::new(points)
                        .shape(MarkerShape::Diamond)
                        .radius(5.0)
                        .color(Color32::DARK_GREEN)
                        .name("Parks"),
                );
            }

            pointer = plot_ui.pointer_coordinate();
        });

    // Hover tooltip: neighborhood name, the selected metric's raw value,
    // and the vote count.
    if let Some(pos) = pointer {
        if let Some(feature) = state.dataset.feature_at(pos.x, pos.y) {
            response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
                ui.strong(&feature.name);
                ui.label(format!(
                    "{}: {}",
                    state.selected_metric,
                    feature.properties.display_text(&state.selected_metric)
                ));
                ui.label(format!(
                    "{VOTES_COLUMN}: {}",
                    feature.properties.display_text(VOTES_COLUMN)
                ));
            });
        }
    }
}
