//! Terrain and route geometry for march planning.
//!
//! Geographic projection and great-circle distance, elevation grids
//! and HGT tiles, the slope/vegetation cost model, route profiling,
//! and control point projection.

pub use march_core as core;

pub mod control;
pub mod cost;
pub mod grid;
pub mod hgt;
pub mod profile;
pub mod projection;

// Re-export key types for convenience.
pub use control::{place_control_points, project_onto_route, RouteProjection};
pub use cost::{terrain_factor, Impassable};
pub use grid::{GridHeader, TerrainGrid};
pub use profile::build_route;
pub use projection::{densify, haversine, GeoProjection};
