use std::path::PathBuf;

use clap::Parser;

use march_core::constants::DEFAULT_MAX_SPACING_M;
use march_core::enums::VegetationType;

/// Plan a vehicle march over an HGT elevation tile.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// March plan JSON: route, control points, halts and series.
    #[arg(long, env = "MARCH_PLAN")]
    pub plan: PathBuf,

    /// SRTM/NASADEM `.hgt` tile covering the route.
    #[arg(long, env = "MARCH_HGT")]
    pub hgt: PathBuf,

    /// NDVI tile in HGT layout (index × 10000) for land cover classification.
    #[arg(long, env = "MARCH_NDVI")]
    pub ndvi: Option<PathBuf>,

    /// Where to write the schedule JSON (`-` for stdout).
    #[arg(short, long, env = "MARCH_OUTPUT", default_value = "march.json")]
    pub output: PathBuf,

    /// H-hour as `HH:MM`; overrides the plan's value.
    #[arg(long, env = "MARCH_H_HOUR")]
    pub h_hour: Option<String>,

    /// Maximum distance between route samples (meters).
    #[arg(long, env = "MARCH_MAX_SPACING", default_value_t = DEFAULT_MAX_SPACING_M)]
    pub max_spacing: f64,

    /// Terrain lookups in flight at once.
    #[arg(long, env = "MARCH_CONCURRENCY", default_value_t = 8)]
    pub concurrency: usize,

    /// Land cover assumed where no NDVI data exists (e.g. `grass_or_shrub`).
    #[arg(long, env = "MARCH_VEGETATION", value_parser = parse_vegetation)]
    pub vegetation: Option<VegetationType>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "MARCH_JSON_LOGS")]
    pub json_logs: bool,
}

/// Accepts the snake_case names used in plan files.
fn parse_vegetation(text: &str) -> Result<VegetationType, String> {
    serde_json::from_value(serde_json::Value::String(text.to_string()))
        .map_err(|_| format!("unknown vegetation class '{text}'"))
}
