use std::collections::BTreeSet;

use eframe::egui::{Color32, Stroke};
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::NeighborhoodFeature;

// ---------------------------------------------------------------------------
// Color ramp: metric value → fill color
// ---------------------------------------------------------------------------

/// Light ramp endpoint (#f7fbff).
const LIGHT_STOP: (u8, u8, u8) = (0xf7, 0xfb, 0xff);
/// Dark ramp endpoint (#08306b).
const DARK_STOP: (u8, u8, u8) = (0x08, 0x30, 0x6b);

fn stop(rgb: (u8, u8, u8)) -> LinSrgb<f32> {
    Srgb::new(
        rgb.0 as f32 / 255.0,
        rgb.1 as f32 / 255.0,
        rgb.2 as f32 / 255.0,
    )
    .into_linear()
}

/// Two-stop linear color ramp anchored at the current metric range.
///
/// Rebuilt whenever the selected metric or the exclusion set changes, since
/// both move `(min, max)`.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    low: LinSrgb<f32>,
    high: LinSrgb<f32>,
    pub min: f64,
    pub max: f64,
}

impl ColorRamp {
    pub fn new(min: f64, max: f64) -> Self {
        ColorRamp {
            low: stop(LIGHT_STOP),
            high: stop(DARK_STOP),
            min,
            max,
        }
    }

    /// Interpolate between the two stops in linear RGB. Values are clamped
    /// to the range; a degenerate range maps everything to the light stop.
    pub fn color_for(&self, value: f64) -> Color32 {
        let t = if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mixed = self.low.mix(self.high, t as f32);
        let srgb: Srgb<u8> = Srgb::from_linear(mixed);
        Color32::from_rgb(srgb.red, srgb.green, srgb.blue)
    }
}

// ---------------------------------------------------------------------------
// Per-feature style resolution
// ---------------------------------------------------------------------------

/// Resolved polygon style for one neighborhood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStyle {
    pub fill: Color32,
    pub stroke: Stroke,
}

/// Flat neutral fill for excluded neighborhoods, distinguishable from any
/// point on the ramp.
fn excluded_style() -> RegionStyle {
    RegionStyle {
        fill: Color32::from_rgba_unmultiplied(211, 211, 211, 128),
        stroke: Stroke::new(1.0, Color32::BLACK),
    }
}

/// Style for one feature: the fixed neutral style when excluded, otherwise
/// the ramp color of its coerced metric value at 80% opacity.
pub fn style_for(
    feature: &NeighborhoodFeature,
    metric: &str,
    excluded: &BTreeSet<String>,
    ramp: &ColorRamp,
) -> RegionStyle {
    if excluded.contains(&feature.name) {
        return excluded_style();
    }
    let value = feature.properties.metric_number(metric);
    let color = ramp.color_for(value);
    RegionStyle {
        fill: Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 204),
        stroke: Stroke::new(1.0, Color32::BLACK),
    }
}
