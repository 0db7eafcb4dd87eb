//! SRTM/NASADEM HGT tile loader.
//!
//! HGT files are flat arrays of big-endian i16 elevation values
//! covering 1° × 1° tiles. The filename encodes the SW corner
//! coordinates (e.g., S35W059.hgt). Void samples are kept as voids so
//! route sampling reports them as holes instead of inventing terrain.
//!
//! NDVI tiles share the layout, holding the index × 10000.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use march_core::constants::NDVI_RAW_SCALE;

use crate::grid::{GridHeader, TerrainGrid};

/// Void value in HGT files (no data).
pub const HGT_VOID: i16 = -32768;

#[derive(Error, Debug)]
pub enum HgtError {
    #[error("cannot parse HGT coordinates from filename '{0}'")]
    BadFilename(String),

    #[error("unexpected HGT size: {0} bytes (expected 25934402 or 2884802)")]
    BadSize(usize),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parse an HGT filename to extract the SW corner coordinates.
/// Format: `N25E056.hgt` or `S10W045.hgt`
pub fn parse_hgt_filename(filename: &str) -> Option<(f64, f64)> {
    let name = filename
        .strip_suffix(".hgt")
        .or_else(|| filename.strip_suffix(".HGT"))?;

    if name.len() < 7 || !name.is_ascii() {
        return None;
    }

    let lat_sign = match &name[0..1] {
        "N" | "n" => 1.0,
        "S" | "s" => -1.0,
        _ => return None,
    };
    let lat: f64 = name[1..3].parse().ok()?;

    let lng_sign = match &name[3..4] {
        "E" | "e" => 1.0,
        "W" | "w" => -1.0,
        _ => return None,
    };
    let lng: f64 = name[4..7].parse().ok()?;

    Some((lat * lat_sign, lng * lng_sign))
}

/// Grid side and cell size (arc-seconds) for a byte count.
/// 1 arc-second: 3601 × 3601 samples; 3 arc-second: 1201 × 1201.
fn grid_size_from_byte_count(byte_count: usize) -> Option<(u32, f64)> {
    match byte_count {
        n if n == 3601 * 3601 * 2 => Some((3601, 1.0)),
        n if n == 1201 * 1201 * 2 => Some((1201, 3.0)),
        _ => None,
    }
}

/// Decode big-endian i16 samples.
fn decode_be_i16(data: &[u8]) -> Vec<i16> {
    data.chunks_exact(2)
        .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

/// Parse raw HGT bytes into a grid anchored at the given SW corner.
pub fn parse_hgt_bytes(data: &[u8], origin_lat: f64, origin_lng: f64) -> Result<TerrainGrid, HgtError> {
    let (side, cell_size) = grid_size_from_byte_count(data.len()).ok_or(HgtError::BadSize(data.len()))?;

    let header = GridHeader {
        origin_lat,
        origin_lng,
        cell_size,
        width: side,
        height: side,
        void_value: Some(HGT_VOID),
        scale: 1.0,
    };

    Ok(TerrainGrid::new(header, decode_be_i16(data)))
}

/// Load a single HGT file into a TerrainGrid.
pub fn load_hgt(path: &Path) -> Result<TerrainGrid, HgtError> {
    let filename = path.file_name().and_then(|f| f.to_str()).unwrap_or_default();

    let (origin_lat, origin_lng) =
        parse_hgt_filename(filename).ok_or_else(|| HgtError::BadFilename(filename.to_string()))?;

    let data = std::fs::read(path).map_err(|source| HgtError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_hgt_bytes(&data, origin_lat, origin_lng)?;

    debug!(
        file = filename,
        side = grid.header.width,
        voids = grid.void_count(),
        "loaded HGT tile"
    );

    Ok(grid)
}

fn into_ndvi(mut grid: TerrainGrid) -> TerrainGrid {
    grid.header.scale = NDVI_RAW_SCALE;
    grid
}

/// Parse raw NDVI tile bytes; grid values come out as NDVI in [-1, 1].
pub fn parse_ndvi_bytes(data: &[u8], origin_lat: f64, origin_lng: f64) -> Result<TerrainGrid, HgtError> {
    parse_hgt_bytes(data, origin_lat, origin_lng).map(into_ndvi)
}

/// Load an NDVI tile named like its HGT counterpart (e.g. S35W059.hgt).
pub fn load_ndvi(path: &Path) -> Result<TerrainGrid, HgtError> {
    load_hgt(path).map(into_ndvi)
}
