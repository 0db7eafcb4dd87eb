//! Terrain acquisition for march routes.
//!
//! The async boundary of the planner: per-point elevation and land cover
//! lookups behind the `TerrainSampler` trait, fetched in bounded batches
//! with retries. The output feeds `march_terrain::build_route`.

pub mod batch;
pub mod grid_sampler;
pub mod sampler;

pub use batch::{fetch_samples, FetchConfig, FetchOutcome};
pub use grid_sampler::GridSampler;
pub use sampler::{SampleError, TerrainSample, TerrainSampler};
