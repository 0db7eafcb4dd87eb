//! The terrain lookup seam: one coordinate in, elevation and land cover out.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use march_core::enums::VegetationType;
use march_core::types::GeoPoint;

/// Terrain at one coordinate. A missing elevation is a hole, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TerrainSample {
    pub elevation: Option<f64>,
    pub vegetation: Option<VegetationType>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("no terrain data at ({lat:.5}, {lng:.5})")]
    NoData { lat: f64, lng: f64 },

    #[error("terrain service unavailable: {0}")]
    Unavailable(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

impl SampleError {
    /// Missing coverage will not appear on retry; everything else might clear.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SampleError::NoData { .. })
    }
}

/// Async source of per-point terrain data.
pub trait TerrainSampler: Send + Sync {
    fn sample(&self, point: GeoPoint) -> impl Future<Output = Result<TerrainSample, SampleError>> + Send;
}
