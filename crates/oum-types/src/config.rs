use serde::{Deserialize, Serialize};

/// Geographic bounding box, serialized as `[west, south, east, north]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Almaty city limits.
    pub const fn almaty() -> Self {
        Self::new(76.7, 43.0, 77.2, 43.4)
    }
}

impl From<[f64; 4]> for Bounds {
    fn from([west, south, east, north]: [f64; 4]) -> Self {
        Self::new(west, south, east, north)
    }
}

impl From<Bounds> for [f64; 4] {
    fn from(b: Bounds) -> Self {
        [b.west, b.south, b.east, b.north]
    }
}

/// Settings consumed by the drawing page. The feature store never reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    /// Lowest zoom level at which drawing is enabled.
    pub draw_zoom_min: u8,
    /// Highest zoom level at which drawing is enabled.
    pub draw_zoom_max: u8,
    /// Area the map is restricted to.
    pub bounds: Bounds,
    /// Token for the tile provider. Empty when not configured.
    pub api_token: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            draw_zoom_min: 14,
            draw_zoom_max: 20,
            bounds: Bounds::almaty(),
            api_token: String::new(),
        }
    }
}
