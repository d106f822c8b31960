use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Column holding the median home price in the price table (and, after the
/// merge, on each feature).
pub const PRICE_COLUMN: &str = "Median 2024 Home Price";

/// Column holding the survey response count.
pub const VOTES_COLUMN: &str = "votes";

/// Dataset paths and the metric-column enumeration, passed into the loader
/// and the UI instead of living as process-wide constants.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// Neighborhood boundary polygons (GeoJSON, `NAME` property per feature).
    pub boundary_path: PathBuf,
    /// Survey table (CSV, keyed by `Neighborhood`).
    pub survey_path: PathBuf,
    /// Home price table (CSV, keyed by `Neighborhood`).
    pub price_path: PathBuf,
    /// Park locations (GeoJSON points, `LOCATION` property per feature).
    pub parks_path: PathBuf,
    /// Columns offered in the metric selector, in display order.
    pub metric_columns: Vec<String>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        let metric_columns = [
            "It's dog friendly",
            "It's walkable to restaurants",
            "There are sidewalks",
            "Streets are well-lit",
            "It's walkable to grocery stores",
            "People would walk alone at night",
            "Kids play outside",
            "There's holiday spirit",
            "Neighbors are friendly",
            "Parking is easy",
            "They plan to stay for at least 5 years",
            "It's quiet",
            "There are community events",
            "There's wildlife",
            "Car is needed",
            "Yards are well-kept",
            PRICE_COLUMN,
            VOTES_COLUMN,
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            boundary_path: PathBuf::from("data/BOUNDARY_CDDNeighborhoods.geojson"),
            survey_path: PathBuf::from("data/locals_say.csv"),
            price_path: PathBuf::from("data/prices.csv"),
            parks_path: PathBuf::from("data/parks.geojson"),
            metric_columns,
        }
    }
}
