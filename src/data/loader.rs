use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use geojson::{GeoJson, Value as GeoValue};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::config::{AtlasConfig, PRICE_COLUMN};

use super::model::{NeighborhoodFeature, NeighborhoodSet, ParkFeature, PropertyBag, PropertyValue};

/// Join-key column in both CSV tables.
const NEIGHBORHOOD_KEY: &str = "Neighborhood";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal dataset loading failure. There is no partial-load mode: any missing
/// or malformed source file aborts the whole load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl LoadError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn parse(path: &Path, message: impl Into<String>) -> Self {
        LoadError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and merge the three neighborhood datasets:
///
/// 1. Boundary polygons from GeoJSON (`NAME` property per feature).
/// 2. Survey table, keyed by trimmed `Neighborhood`.
/// 3. Price table, keyed by trimmed `Neighborhood` with surrounding quotes
///    stripped.
///
/// Every non-key survey column is copied into the matching feature's bag as
/// text, overwriting a boundary property of the same name. The home price is
/// always set as a number: the parsed value when the row matches and parses,
/// `0.0` otherwise.
pub fn load_data(config: &AtlasConfig) -> Result<NeighborhoodSet, LoadError> {
    let mut features = load_boundaries(&config.boundary_path)?;
    let survey = load_table(&config.survey_path, false)?;
    let prices = load_table(&config.price_path, true)?;

    for feature in &mut features {
        if let Some(row) = survey.get(&feature.name) {
            for (col, val) in row {
                if col != NEIGHBORHOOD_KEY {
                    feature
                        .properties
                        .insert(col.clone(), PropertyValue::Text(val.clone()));
                }
            }
        }

        let price = prices
            .get(&feature.name)
            .and_then(|row| row.get(PRICE_COLUMN))
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        feature
            .properties
            .insert(PRICE_COLUMN, PropertyValue::Number(price));
    }

    log::info!(
        "merged {} neighborhoods ({} survey rows, {} price rows)",
        features.len(),
        survey.len(),
        prices.len()
    );

    Ok(NeighborhoodSet { features })
}

/// Load the park overlay: a GeoJSON point collection with a `LOCATION`
/// property per feature. Features without a point geometry or a location
/// name carry nothing renderable and are skipped.
pub fn load_parks(path: &Path) -> Result<Vec<ParkFeature>, LoadError> {
    let collection = read_feature_collection(path)?;

    let mut parks = Vec::new();
    for feature in collection.features {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        let GeoValue::Point(position) = geometry.value else {
            continue;
        };
        if position.len() < 2 {
            continue;
        }
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get("LOCATION"))
            .and_then(JsonValue::as_str);
        let Some(name) = name else {
            continue;
        };
        parks.push(ParkFeature {
            name: name.to_string(),
            lon: position[0],
            lat: position[1],
        });
    }

    Ok(parks)
}

// ---------------------------------------------------------------------------
// GeoJSON boundary loader
// ---------------------------------------------------------------------------

fn load_boundaries(path: &Path) -> Result<Vec<NeighborhoodFeature>, LoadError> {
    let collection = read_feature_collection(path)?;

    let mut features = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.into_iter().enumerate() {
        let props = feature.properties.unwrap_or_default();
        let name = props
            .get("NAME")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                LoadError::parse(path, format!("feature {i} has no string NAME property"))
            })?
            .trim()
            .to_string();

        let rings = feature
            .geometry
            .map(|g| exterior_rings(&g.value))
            .unwrap_or_default();

        let mut properties = PropertyBag::default();
        for (key, value) in &props {
            properties.insert(key.clone(), json_to_property(value));
        }

        features.push(NeighborhoodFeature {
            name,
            rings,
            properties,
        });
    }

    Ok(features)
}

fn read_feature_collection(path: &Path) -> Result<geojson::FeatureCollection, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let geojson = GeoJson::from_reader(BufReader::new(file))
        .map_err(|e| LoadError::parse(path, e.to_string()))?;
    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        other => Err(LoadError::parse(
            path,
            format!("expected a FeatureCollection, got {}", geojson_kind(&other)),
        )),
    }
}

fn geojson_kind(geojson: &GeoJson) -> &'static str {
    match geojson {
        GeoJson::Geometry(_) => "a bare Geometry",
        GeoJson::Feature(_) => "a single Feature",
        GeoJson::FeatureCollection(_) => "a FeatureCollection",
    }
}

/// Exterior rings of a Polygon or MultiPolygon as `[lon, lat]` points.
/// Other geometry types have no fillable area and yield no rings.
fn exterior_rings(value: &GeoValue) -> Vec<Vec<[f64; 2]>> {
    match value {
        GeoValue::Polygon(polygon) => {
            polygon.first().map(|ring| ring_points(ring)).into_iter().collect()
        }
        GeoValue::MultiPolygon(parts) => parts
            .iter()
            .filter_map(|p| p.first())
            .map(|ring| ring_points(ring))
            .collect(),
        _ => Vec::new(),
    }
}

fn ring_points(ring: &[Vec<f64>]) -> Vec<[f64; 2]> {
    ring.iter()
        .filter(|pos| pos.len() >= 2)
        .map(|pos| [pos[0], pos[1]])
        .collect()
}

fn json_to_property(value: &JsonValue) -> PropertyValue {
    match value {
        JsonValue::String(s) => PropertyValue::Text(s.clone()),
        JsonValue::Number(n) => match n.as_f64() {
            Some(v) => PropertyValue::Number(v),
            None => PropertyValue::Text(n.to_string()),
        },
        other => PropertyValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV table loader
// ---------------------------------------------------------------------------

type TableRow = BTreeMap<String, String>;

/// Read a CSV table into a map keyed by trimmed neighborhood name. The price
/// table additionally strips surrounding quote characters from the key.
fn load_table(path: &Path, strip_quotes: bool) -> Result<BTreeMap<String, TableRow>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = BTreeMap::new();
    for (row_no, result) in reader.deserialize::<TableRow>().enumerate() {
        let row = result.map_err(|e| LoadError::parse(path, format!("row {row_no}: {e}")))?;
        let raw = row.get(NEIGHBORHOOD_KEY).ok_or_else(|| {
            LoadError::parse(path, format!("row {row_no}: missing '{NEIGHBORHOOD_KEY}' column"))
        })?;
        let mut key = raw.trim();
        if strip_quotes {
            key = key.trim_matches('"');
        }
        rows.insert(key.to_string(), row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "NAME": "Riverside", "votes": "old" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-71.11, 42.36], [-71.10, 42.36], [-71.10, 42.37], [-71.11, 42.36]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "NAME": " Agassiz " },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[-71.12, 42.38], [-71.11, 42.38], [-71.11, 42.39], [-71.12, 42.38]]],
                        [[[-71.13, 42.38], [-71.12, 42.38], [-71.12, 42.39], [-71.13, 42.38]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "NAME": "Strawberry Hill" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-71.15, 42.37], [-71.14, 42.37], [-71.14, 42.38], [-71.15, 42.37]]]
                }
            }
        ]
    }"#;

    const SURVEY: &str = "Neighborhood,It's quiet,votes\n\
                          Riverside,8,132\n\
                          Agassiz,6,57\n";

    // The Riverside key parses to the literal `"Riverside"` (quotes kept),
    // exercising the quote-stripping side of the join.
    const PRICES: &str = "Neighborhood,Median 2024 Home Price\n\
                          \"\"\"Riverside\"\"\",950000\n\
                          Agassiz,not a number\n";

    const PARKS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "LOCATION": "Dana Park" },
                "geometry": { "type": "Point", "coordinates": [-71.107, 42.362] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [-71.12, 42.37] }
            }
        ]
    }"#;

    fn write_fixtures(tag: &str) -> AtlasConfig {
        let dir = std::env::temp_dir().join(format!("cambridge-atlas-test-{tag}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("boundaries.geojson"), BOUNDARIES).unwrap();
        fs::write(dir.join("locals_say.csv"), SURVEY).unwrap();
        fs::write(dir.join("prices.csv"), PRICES).unwrap();
        fs::write(dir.join("parks.geojson"), PARKS).unwrap();

        AtlasConfig {
            boundary_path: dir.join("boundaries.geojson"),
            survey_path: dir.join("locals_say.csv"),
            price_path: dir.join("prices.csv"),
            parks_path: dir.join("parks.geojson"),
            ..AtlasConfig::default()
        }
    }

    #[test]
    fn merges_survey_and_price_rows() {
        let config = write_fixtures("merge");
        let set = load_data(&config).unwrap();

        let riverside = set
            .features
            .iter()
            .find(|f| f.name == "Riverside")
            .unwrap();
        assert_eq!(
            riverside.properties.get("It's quiet"),
            Some(&PropertyValue::Text("8".to_string()))
        );
        assert_eq!(
            riverside.properties.get(PRICE_COLUMN),
            Some(&PropertyValue::Number(950_000.0))
        );
        // Survey column wins over the pre-existing boundary property.
        assert_eq!(
            riverside.properties.get("votes"),
            Some(&PropertyValue::Text("132".to_string()))
        );
    }

    #[test]
    fn boundary_names_are_trimmed_before_the_join() {
        let config = write_fixtures("trim");
        let set = load_data(&config).unwrap();

        let agassiz = set.features.iter().find(|f| f.name == "Agassiz").unwrap();
        assert_eq!(
            agassiz.properties.get("It's quiet"),
            Some(&PropertyValue::Text("6".to_string()))
        );
        assert_eq!(agassiz.rings.len(), 2);
    }

    #[test]
    fn unparseable_or_missing_price_defaults_to_zero() {
        let config = write_fixtures("price-default");
        let set = load_data(&config).unwrap();

        // "not a number" fails coercion.
        let agassiz = set.features.iter().find(|f| f.name == "Agassiz").unwrap();
        assert_eq!(
            agassiz.properties.get(PRICE_COLUMN),
            Some(&PropertyValue::Number(0.0))
        );

        // No survey or price row at all: boundary properties only, price 0.
        let hill = set
            .features
            .iter()
            .find(|f| f.name == "Strawberry Hill")
            .unwrap();
        assert_eq!(hill.properties.get("It's quiet"), None);
        assert_eq!(
            hill.properties.get(PRICE_COLUMN),
            Some(&PropertyValue::Number(0.0))
        );
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let config = write_fixtures("idempotent");
        let first = load_data(&config).unwrap();
        let second = load_data(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut config = write_fixtures("missing");
        config.survey_path = config.survey_path.with_file_name("nope.csv");
        match load_data(&config) {
            Err(LoadError::Io { path, .. }) => assert!(path.ends_with("nope.csv")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_boundary_file_is_a_parse_error() {
        let config = write_fixtures("malformed");
        fs::write(&config.boundary_path, "{ not geojson").unwrap();
        assert!(matches!(
            load_data(&config),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn parks_load_with_location_and_coordinates() {
        let config = write_fixtures("parks");
        let parks = load_parks(&config.parks_path).unwrap();
        assert_eq!(
            parks,
            vec![ParkFeature {
                name: "Dana Park".to_string(),
                lon: -71.107,
                lat: 42.362,
            }]
        );
    }
}
