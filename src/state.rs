use std::collections::BTreeSet;

use crate::color::ColorRamp;
use crate::config::AtlasConfig;
use crate::data::model::{NeighborhoodSet, ParkFeature};
use crate::data::range::compute_range;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The dataset is loaded once
/// in `main` and never mutated; everything derived from the controls (range,
/// ramp) is recomputed through [`AppState::rebuild_ramp`].
pub struct AppState {
    /// Merged neighborhood collection.
    pub dataset: NeighborhoodSet,

    /// Park overlay points.
    pub parks: Vec<ParkFeature>,

    /// Columns offered in the metric selector, in display order.
    pub metric_columns: Vec<String>,

    /// All neighborhood names, sorted (drives the exclusion list).
    pub all_names: Vec<String>,

    /// Currently selected metric column.
    pub selected_metric: String,

    /// Neighborhoods excluded from the color scale (still rendered).
    pub excluded: BTreeSet<String>,

    /// Whether park markers are drawn.
    pub show_parks: bool,

    /// Active color ramp, anchored at the current metric range.
    pub ramp: ColorRamp,
}

impl AppState {
    pub fn new(config: &AtlasConfig, dataset: NeighborhoodSet, parks: Vec<ParkFeature>) -> Self {
        let all_names = dataset.sorted_names();
        let selected_metric = config
            .metric_columns
            .first()
            .cloned()
            .unwrap_or_default();
        let excluded = BTreeSet::new();
        let (min, max) = compute_range(&dataset.features, &selected_metric, &excluded);

        Self {
            dataset,
            parks,
            metric_columns: config.metric_columns.clone(),
            all_names,
            selected_metric,
            excluded,
            show_parks: false,
            ramp: ColorRamp::new(min, max),
        }
    }

    /// Recompute the metric range and rebuild the ramp. Called after every
    /// change to the selected metric or the exclusion set.
    pub fn rebuild_ramp(&mut self) {
        let (min, max) = compute_range(&self.dataset.features, &self.selected_metric, &self.excluded);
        self.ramp = ColorRamp::new(min, max);
    }

    /// Select a metric column and rebuild the ramp.
    pub fn set_metric(&mut self, metric: String) {
        self.selected_metric = metric;
        self.rebuild_ramp();
    }

    /// Toggle one neighborhood in the exclusion set.
    pub fn toggle_excluded(&mut self, name: &str) {
        if !self.excluded.remove(name) {
            self.excluded.insert(name.to_string());
        }
        self.rebuild_ramp();
    }

    /// Exclude every neighborhood from the color scale.
    pub fn exclude_all(&mut self) {
        self.excluded = self.all_names.iter().cloned().collect();
        self.rebuild_ramp();
    }

    /// Clear the exclusion set.
    pub fn exclude_none(&mut self) {
        self.excluded.clear();
        self.rebuild_ramp();
    }
}
