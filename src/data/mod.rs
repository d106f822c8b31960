/// Data layer: core types, loading/merging, and range computation.
///
/// Architecture:
/// ```text
///  .geojson boundaries      .csv survey        .csv prices
///        │                      │                  │
///        └──────────────────────┼──────────────────┘
///                               ▼
///                         ┌──────────┐
///                         │  loader   │  join by trimmed name
///                         └──────────┘
///                               │
///                               ▼
///                      ┌────────────────┐
///                      │ NeighborhoodSet │  merged property bags
///                      └────────────────┘
///                               │
///                               ▼
///                         ┌──────────┐
///                         │  range    │  (min, max) minus exclusions
///                         └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod range;
