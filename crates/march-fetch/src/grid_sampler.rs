//! Terrain sampler backed by in-memory rasters (HGT elevation, optional NDVI).

use std::future::Future;

use futures::future;

use march_core::enums::VegetationType;
use march_core::types::GeoPoint;
use march_terrain::grid::TerrainGrid;

use crate::sampler::{SampleError, TerrainSample, TerrainSampler};

/// Samples an elevation grid and classifies land cover from an NDVI grid.
///
/// Without NDVI coverage the fallback vegetation, if any, is reported.
#[derive(Debug, Clone)]
pub struct GridSampler {
    elevation: TerrainGrid,
    ndvi: Option<TerrainGrid>,
    fallback_vegetation: Option<VegetationType>,
}

impl GridSampler {
    pub fn new(elevation: TerrainGrid) -> Self {
        Self {
            elevation,
            ndvi: None,
            fallback_vegetation: None,
        }
    }

    pub fn with_ndvi(mut self, ndvi: TerrainGrid) -> Self {
        self.ndvi = Some(ndvi);
        self
    }

    pub fn with_fallback_vegetation(mut self, vegetation: VegetationType) -> Self {
        self.fallback_vegetation = Some(vegetation);
        self
    }

    /// Synchronous lookup. Points off the elevation grid have no data;
    /// void cells come back as a sample without elevation.
    pub fn lookup(&self, point: GeoPoint) -> Result<TerrainSample, SampleError> {
        if !self.elevation.contains(point) {
            return Err(SampleError::NoData {
                lat: point.lat,
                lng: point.lng,
            });
        }

        let vegetation = self
            .ndvi
            .as_ref()
            .and_then(|grid| grid.value_at(point))
            .map(VegetationType::from_ndvi)
            .or(self.fallback_vegetation);

        Ok(TerrainSample {
            elevation: self.elevation.value_at(point),
            vegetation,
        })
    }
}

impl TerrainSampler for GridSampler {
    fn sample(&self, point: GeoPoint) -> impl Future<Output = Result<TerrainSample, SampleError>> + Send {
        future::ready(self.lookup(point))
    }
}
