use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// PropertyValue – a single cell in a feature's property bag
// ---------------------------------------------------------------------------

/// A typed property value. Survey columns stay as `Text` (the source CSV is
/// string-valued); the merged home price is stored as `Number`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{s}"),
            PropertyValue::Number(v) => write!(f, "{v}"),
        }
    }
}

impl PropertyValue {
    /// Interpret the value as an `f64` for color mapping.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(v) => Some(*v),
            PropertyValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

// ---------------------------------------------------------------------------
// PropertyBag – merged feature properties with an explicit coercion policy
// ---------------------------------------------------------------------------

/// Ordered property map. Metric reads go through [`PropertyBag::metric_number`],
/// which encodes the tolerance policy: a missing key or a value that fails
/// numeric coercion yields `0.0`, never an error. The map always renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    entries: BTreeMap<String, PropertyValue>,
}

impl PropertyBag {
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// The metric value as a number, `0.0` on a missing key or coercion failure.
    pub fn metric_number(&self, key: &str) -> f64 {
        self.get(key).and_then(PropertyValue::as_f64).unwrap_or(0.0)
    }

    /// The raw value rendered as display text, `"0"` when absent.
    pub fn display_text(&self, key: &str) -> String {
        self.get(key)
            .map(PropertyValue::to_string)
            .unwrap_or_else(|| "0".to_string())
    }
}

// ---------------------------------------------------------------------------
// NeighborhoodFeature – one boundary polygon with merged properties
// ---------------------------------------------------------------------------

/// A neighborhood boundary (one GeoJSON feature after the merge).
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodFeature {
    /// Trimmed `NAME` property; the sole join key against both CSV tables.
    pub name: String,
    /// Exterior rings in `[lon, lat]` order. One ring per polygon part
    /// (MultiPolygon features contribute several).
    pub rings: Vec<Vec<[f64; 2]>>,
    /// Boundary properties plus merged survey columns and home price.
    pub properties: PropertyBag,
}

impl NeighborhoodFeature {
    /// Even-odd point-in-polygon test over all rings, used for hover
    /// tooltips on the map.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.rings.iter().any(|ring| point_in_ring(ring, lon, lat))
    }
}

fn point_in_ring(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// ---------------------------------------------------------------------------
// NeighborhoodSet – the complete merged collection
// ---------------------------------------------------------------------------

/// The fully merged feature collection. Immutable after load; rebuilt from
/// the source files on each application run.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodSet {
    pub features: Vec<NeighborhoodFeature>,
}

impl NeighborhoodSet {
    /// All neighborhood names, sorted lexicographically (drives the
    /// exclusion multi-select).
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.features.iter().map(|f| f.name.clone()).collect();
        names.sort();
        names
    }

    /// The first feature whose polygon contains the given point, if any.
    pub fn feature_at(&self, lon: f64, lat: f64) -> Option<&NeighborhoodFeature> {
        self.features.iter().find(|f| f.contains(lon, lat))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ParkFeature – one point of the optional overlay
// ---------------------------------------------------------------------------

/// A park location (GeoJSON point feature, `LOCATION` property).
#[derive(Debug, Clone, PartialEq)]
pub struct ParkFeature {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]
    }

    #[test]
    fn point_in_ring_interior_and_exterior() {
        let ring = square();
        assert!(point_in_ring(&ring, 1.0, 1.0));
        assert!(!point_in_ring(&ring, 3.0, 1.0));
        assert!(!point_in_ring(&ring, -0.5, 0.5));
    }

    #[test]
    fn contains_checks_every_ring() {
        let far = vec![
            [10.0, 10.0],
            [12.0, 10.0],
            [12.0, 12.0],
            [10.0, 12.0],
            [10.0, 10.0],
        ];
        let feature = NeighborhoodFeature {
            name: "Riverside".to_string(),
            rings: vec![square(), far],
            properties: PropertyBag::default(),
        };
        assert!(feature.contains(1.0, 1.0));
        assert!(feature.contains(11.0, 11.0));
        assert!(!feature.contains(5.0, 5.0));
    }

    #[test]
    fn metric_number_coercion_policy() {
        let mut bag = PropertyBag::default();
        bag.insert("It's quiet", PropertyValue::Text("8".to_string()));
        bag.insert("Neighbors are friendly", PropertyValue::Text("n/a".to_string()));
        bag.insert("Median 2024 Home Price", PropertyValue::Number(950_000.0));

        assert_eq!(bag.metric_number("It's quiet"), 8.0);
        assert_eq!(bag.metric_number("Neighbors are friendly"), 0.0);
        assert_eq!(bag.metric_number("Median 2024 Home Price"), 950_000.0);
        assert_eq!(bag.metric_number("no such column"), 0.0);
    }

    #[test]
    fn display_text_defaults_to_zero() {
        let mut bag = PropertyBag::default();
        bag.insert("votes", PropertyValue::Text("132".to_string()));
        assert_eq!(bag.display_text("votes"), "132");
        assert_eq!(bag.display_text("missing"), "0");
    }
}
