use std::collections::BTreeSet;

use super::model::NeighborhoodFeature;

// ---------------------------------------------------------------------------
// Metric range over the non-excluded neighborhoods
// ---------------------------------------------------------------------------

/// Fallback bounds when every neighborhood is excluded (or there are none),
/// keeping the color scale well-defined.
pub const FALLBACK_RANGE: (f64, f64) = (0.0, 1.0);

/// Compute `(min, max)` of the metric over the neighborhoods not in
/// `excluded`. Metric reads go through the bag's coercion policy, so a
/// missing or non-numeric value contributes `0.0`.
///
/// This is deliberately not the global range: excluding a neighborhood
/// reshapes the scale the others are judged against, which is how a user
/// drops an outlier from the gradient without removing it from the map.
pub fn compute_range(
    features: &[NeighborhoodFeature],
    metric: &str,
    excluded: &BTreeSet<String>,
) -> (f64, f64) {
    let mut bounds: Option<(f64, f64)> = None;

    for feature in features {
        if excluded.contains(&feature.name) {
            continue;
        }
        let value = feature.properties.metric_number(metric);
        bounds = Some(match bounds {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }

    bounds.unwrap_or(FALLBACK_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::model::{PropertyBag, PropertyValue};

    fn feature(name: &str, value: &str) -> NeighborhoodFeature {
        let mut properties = PropertyBag::default();
        properties.insert("It's quiet", PropertyValue::Text(value.to_string()));
        NeighborhoodFeature {
            name: name.to_string(),
            rings: Vec::new(),
            properties,
        }
    }

    #[test]
    fn range_over_included_values() {
        let features = vec![
            feature("Agassiz", "3"),
            feature("Riverside", "7"),
            feature("Wellington-Harrington", "1"),
        ];
        let excluded = BTreeSet::new();
        assert_eq!(compute_range(&features, "It's quiet", &excluded), (1.0, 7.0));
    }

    #[test]
    fn exclusion_reshapes_the_scale() {
        let features = vec![
            feature("Agassiz", "3"),
            feature("Riverside", "7"),
            feature("Wellington-Harrington", "1"),
        ];
        let excluded: BTreeSet<String> = ["Riverside".to_string()].into();
        assert_eq!(compute_range(&features, "It's quiet", &excluded), (1.0, 3.0));
    }

    #[test]
    fn all_excluded_falls_back_to_unit_range() {
        let features = vec![feature("Agassiz", "3"), feature("Riverside", "7")];
        let excluded: BTreeSet<String> =
            ["Agassiz".to_string(), "Riverside".to_string()].into();
        assert_eq!(
            compute_range(&features, "It's quiet", &excluded),
            FALLBACK_RANGE
        );
    }

    #[test]
    fn no_features_falls_back_to_unit_range() {
        assert_eq!(compute_range(&[], "It's quiet", &BTreeSet::new()), FALLBACK_RANGE);
    }

    #[test]
    fn missing_metric_counts_as_zero() {
        let features = vec![feature("Agassiz", "5"), feature("Riverside", "7")];
        let excluded = BTreeSet::new();
        assert_eq!(compute_range(&features, "Parking is easy", &excluded), (0.0, 0.0));
    }
}
