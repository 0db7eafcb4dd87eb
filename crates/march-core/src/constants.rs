//! Planning constants and terrain factor tables.

// --- Geodesy ---

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (nearly constant across the globe).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

// --- Route quality ---

/// Adjacent-sample elevation change above which a jump is flagged (meters).
pub const ANOMALOUS_JUMP_M: f64 = 50.0;

/// Share of originally valid samples below which the route is flagged (percent).
pub const MIN_VALID_PERCENT: f64 = 80.0;

/// Default spacing used when densifying a drawn route before sampling (meters).
pub const DEFAULT_MAX_SPACING_M: f64 = 100.0;

// --- Slope factors ---

/// Slope magnitude (percent) at and above which a segment cannot be marched.
pub const IMPASSABLE_SLOPE_PERCENT: f64 = 40.0;

/// Ascent speed-penalty table: (threshold percent, factor).
/// The factor of the largest threshold not exceeding |slope| applies.
#[rustfmt::skip]
pub const ASCENT_SLOPE_FACTORS: [(f64, f64); 39] = [
    (1.0, 1.01), (2.0, 1.02), (3.0, 1.03), (4.0, 1.04), (5.0, 1.05),
    (6.0, 1.07), (7.0, 1.09), (8.0, 1.11), (9.0, 1.13), (10.0, 1.15),
    (11.0, 1.18), (12.0, 1.21), (13.0, 1.24), (14.0, 1.27), (15.0, 1.30),
    (16.0, 1.34), (17.0, 1.38), (18.0, 1.42), (19.0, 1.46), (20.0, 1.50),
    (21.0, 1.55), (22.0, 1.60), (23.0, 1.65), (24.0, 1.70), (25.0, 1.75),
    (26.0, 1.81), (27.0, 1.87), (28.0, 1.93), (29.0, 1.99), (30.0, 2.05),
    (31.0, 2.12), (32.0, 2.19), (33.0, 2.26), (34.0, 2.33), (35.0, 2.40),
    (36.0, 2.48), (37.0, 2.56), (38.0, 2.64), (39.0, 2.72),
];

/// Descent speed-factor table: (threshold percent, factor).
#[rustfmt::skip]
pub const DESCENT_SLOPE_FACTORS: [(f64, f64); 39] = [
    (1.0, 0.99), (2.0, 0.98), (3.0, 0.97), (4.0, 0.96), (5.0, 0.95),
    (6.0, 0.94), (7.0, 0.93), (8.0, 0.92), (9.0, 0.91), (10.0, 0.90),
    (11.0, 0.89), (12.0, 0.88), (13.0, 0.87), (14.0, 0.86), (15.0, 0.85),
    (16.0, 0.84), (17.0, 0.83), (18.0, 0.82), (19.0, 0.81), (20.0, 0.80),
    (21.0, 0.79), (22.0, 0.78), (23.0, 0.77), (24.0, 0.76), (25.0, 0.75),
    (26.0, 0.74), (27.0, 0.73), (28.0, 0.72), (29.0, 0.71), (30.0, 0.70),
    (31.0, 0.69), (32.0, 0.68), (33.0, 0.67), (34.0, 0.66), (35.0, 0.65),
    (36.0, 0.64), (37.0, 0.63), (38.0, 0.62), (39.0, 0.61),
];

// --- Vegetation factors ---

pub const VEGETATION_FACTOR_BARE_GROUND: f64 = 1.0;
pub const VEGETATION_FACTOR_SPARSE: f64 = 1.05;
pub const VEGETATION_FACTOR_GRASS_SHRUB: f64 = 1.1;
pub const VEGETATION_FACTOR_LIGHT_FOREST: f64 = 1.5;

/// Largest vegetation factor of any passable class.
pub const MAX_VEGETATION_FACTOR: f64 = VEGETATION_FACTOR_LIGHT_FOREST;

/// Largest slope factor in either table.
pub const MAX_SLOPE_FACTOR: f64 = 2.72;

// --- NDVI classification bounds (upper, exclusive) ---

pub const NDVI_WATER_MAX: f64 = -0.1;
pub const NDVI_BARE_MAX: f64 = 0.1;
pub const NDVI_SPARSE_MAX: f64 = 0.3;
pub const NDVI_GRASS_MAX: f64 = 0.6;
pub const NDVI_LIGHT_FOREST_MAX: f64 = 0.8;

/// NDVI tiles store the index as i16 scaled by 10000.
pub const NDVI_RAW_SCALE: f64 = 0.0001;

// --- Plan defaults ---

/// Default minutes of movement between halts.
pub const DEFAULT_HALT_INTERVAL_MIN: f64 = 45.0;

/// Default halt duration in minutes.
pub const DEFAULT_HALT_DURATION_MIN: f64 = 10.0;

/// Default vehicles per column when none is configured.
pub const DEFAULT_VEHICLE_COUNT: u32 = 10;

/// Default intervehicular distance (meters).
pub const DEFAULT_INTERVEHICULAR_M: f64 = 50.0;

/// Default march speed (km/h).
pub const DEFAULT_MARCH_SPEED_KMH: f64 = 25.0;

// --- Report observations ---

/// Slope magnitude (percent) reported as steep.
pub const STEEP_SLOPE_PERCENT: f64 = 20.0;

/// Terrain factor above which a point is reported as difficult terrain.
pub const DIFFICULT_TERRAIN_FACTOR: f64 = 1.5;
