use std::f64::consts::TAU;
use std::fs;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::Value as JsonValue;

/// Demo dataset generator: writes a boundary GeoJSON, the two CSV tables,
/// and a park GeoJSON under `data/` so the viewer runs out of the box.

const CENTER: [f64; 2] = [-71.1106, 42.3736];

const NEIGHBORHOODS: [&str; 13] = [
    "Agassiz",
    "Area 2/MIT",
    "Cambridge Highlands",
    "Cambridgeport",
    "East Cambridge",
    "Mid-Cambridge",
    "Neighborhood Nine",
    "North Cambridge",
    "Riverside",
    "Strawberry Hill",
    "The Port",
    "Wellington-Harrington",
    "West Cambridge",
];

const SURVEY_COLUMNS: [&str; 16] = [
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
];

const PARKS: [&str; 6] = [
    "Dana Park",
    "Danehy Park",
    "Fresh Pond Reservation",
    "Hoyt Field",
    "Magazine Beach",
    "Raymond Park",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    fn range_i64(&mut self, low: i64, high: i64) -> i64 {
        low + (self.next_f64() * (high - low) as f64) as i64
    }
}

/// One pie-slice polygon per neighborhood around the city center, with a
/// jittered outer arc. Crude, but shaped enough to exercise the viewer.
fn wedge_ring(rng: &mut SimpleRng, index: usize, count: usize) -> Vec<Vec<f64>> {
    let [cx, cy] = CENTER;
    let a0 = TAU * index as f64 / count as f64;
    let a1 = TAU * (index + 1) as f64 / count as f64;
    let arc_steps = 6;

    let mut ring = vec![vec![cx, cy]];
    for k in 0..=arc_steps {
        let a = a0 + (a1 - a0) * k as f64 / arc_steps as f64;
        let r = rng.range_f64(0.011, 0.016);
        // Longitude stretched so the wedges come out roughly round on screen.
        ring.push(vec![cx + r * a.cos() * 1.35, cy + r * a.sin()]);
    }
    ring.push(vec![cx, cy]);
    ring
}

fn boundary_collection(rng: &mut SimpleRng) -> FeatureCollection {
    let features = NEIGHBORHOODS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut properties = JsonObject::new();
            properties.insert("NAME".to_string(), JsonValue::String(name.to_string()));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Polygon(vec![wedge_ring(
                    rng,
                    i,
                    NEIGHBORHOODS.len(),
                )]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn park_collection(rng: &mut SimpleRng) -> FeatureCollection {
    let [cx, cy] = CENTER;
    let features = PARKS
        .iter()
        .map(|name| {
            let a = rng.range_f64(0.0, TAU);
            let r = rng.range_f64(0.002, 0.012);
            let mut properties = JsonObject::new();
            properties.insert("LOCATION".to_string(), JsonValue::String(name.to_string()));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    cx + r * a.cos() * 1.35,
                    cy + r * a.sin(),
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn write_survey_csv(rng: &mut SimpleRng, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating survey CSV")?;

    let mut header = vec!["Neighborhood"];
    header.extend(SURVEY_COLUMNS);
    header.push("votes");
    writer.write_record(&header)?;

    for name in NEIGHBORHOODS {
        let mut record = vec![name.to_string()];
        for _ in SURVEY_COLUMNS {
            // Percentage of respondents agreeing with the statement.
            record.push(rng.range_i64(25, 98).to_string());
        }
        record.push(rng.range_i64(20, 250).to_string());
        writer.write_record(&record)?;
    }

    writer.flush().context("writing survey CSV")?;
    Ok(())
}

fn write_price_csv(rng: &mut SimpleRng, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating price CSV")?;
    writer.write_record(["Neighborhood", "Median 2024 Home Price"])?;

    for name in NEIGHBORHOODS {
        // One neighborhood is deliberately missing so the viewer's
        // price-defaults-to-zero path has something to chew on.
        if name == "Cambridge Highlands" {
            continue;
        }
        // Quote-wrapped key, as in the real price table.
        writer.write_record([
            format!("\"{name}\""),
            rng.range_i64(700_000, 1_600_000).to_string(),
        ])?;
    }

    writer.flush().context("writing price CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    fs::create_dir_all("data").context("creating data directory")?;

    let boundaries = GeoJson::from(boundary_collection(&mut rng));
    fs::write("data/BOUNDARY_CDDNeighborhoods.geojson", boundaries.to_string())
        .context("writing boundary GeoJSON")?;

    write_survey_csv(&mut rng, "data/locals_say.csv")?;
    write_price_csv(&mut rng, "data/prices.csv")?;

    let parks = GeoJson::from(park_collection(&mut rng));
    fs::write("data/parks.geojson", parks.to_string()).context("writing park GeoJSON")?;

    println!(
        "Wrote {} neighborhoods and {} parks under data/",
        NEIGHBORHOODS.len(),
        PARKS.len()
    );
    Ok(())
}
