//! TerrainGrid: a geographic raster of i16 samples with bilinear queries.
//!
//! Used for elevation (meters, scale 1.0) and for NDVI rasters stored as
//! scaled integers (scale 0.0001).

use march_core::types::GeoPoint;

/// Raster georeferencing and encoding.
#[derive(Debug, Clone)]
pub struct GridHeader {
    /// Southwest corner latitude (degrees).
    pub origin_lat: f64,
    /// Southwest corner longitude (degrees).
    pub origin_lng: f64,
    /// Arc-seconds per grid cell.
    pub cell_size: f64,
    /// Number of columns (west to east).
    pub width: u32,
    /// Number of rows (north to south).
    pub height: u32,
    /// Raw value marking missing data, if the source has one.
    pub void_value: Option<i16>,
    /// Multiplier from raw value to physical value.
    pub scale: f64,
}

impl GridHeader {
    /// North edge latitude (degrees).
    pub fn north_lat(&self) -> f64 {
        self.origin_lat + (self.height as f64 * self.cell_size) / 3600.0
    }

    /// East edge longitude (degrees).
    pub fn east_lng(&self) -> f64 {
        self.origin_lng + (self.width as f64 * self.cell_size) / 3600.0
    }
}

/// Loaded raster with geographic queries.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    pub header: GridHeader,
    /// Raw values, row-major (north-to-south, west-to-east).
    values: Vec<i16>,
}

impl TerrainGrid {
    pub fn new(header: GridHeader, values: Vec<i16>) -> Self {
        debug_assert_eq!(values.len(), header.width as usize * header.height as usize);
        Self { header, values }
    }

    /// Fractional (row, col) of a coordinate, or None outside the grid.
    fn geo_to_grid(&self, point: GeoPoint) -> Option<(f64, f64)> {
        let h = &self.header;

        let col = (point.lng - h.origin_lng) * 3600.0 / h.cell_size;
        // Row 0 is the north edge
        let row = (h.north_lat() - point.lat) * 3600.0 / h.cell_size;

        if col < 0.0 || row < 0.0 || col >= h.width as f64 || row >= h.height as f64 {
            return None;
        }

        Some((row, col))
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        self.geo_to_grid(point).is_some()
    }

    /// Raw value at integer coordinates, None for voids.
    fn raw(&self, row: usize, col: usize) -> Option<f64> {
        let w = self.header.width as usize;
        let v = *self.values.get(row * w + col)?;
        if self.header.void_value == Some(v) {
            return None;
        }
        Some(v as f64)
    }

    /// Physical value at a coordinate with bilinear interpolation.
    ///
    /// Returns None outside the grid or when any contributing cell is void.
    pub fn value_at(&self, point: GeoPoint) -> Option<f64> {
        let (row, col) = self.geo_to_grid(point)?;

        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.header.height as usize - 1);
        let c1 = (c0 + 1).min(self.header.width as usize - 1);

        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let top = self.raw(r0, c0)? * (1.0 - fc) + self.raw(r0, c1)? * fc;
        let bot = self.raw(r1, c0)? * (1.0 - fc) + self.raw(r1, c1)? * fc;

        Some((top * (1.0 - fr) + bot * fr) * self.header.scale)
    }

    /// Count of void cells.
    pub fn void_count(&self) -> usize {
        match self.header.void_value {
            Some(void) => self.values.iter().filter(|&&v| v == void).count(),
            None => 0,
        }
    }
}
