/// Data source identifiers stamped onto flattened observation tables
pub const SOURCE_SWE: &str = "SWE";
pub const SOURCE_PRECIP: &str = "Precipitation";

/// Measurement units for SWE and precipitation values
pub const UNITS_MM: &str = "mm";

/// Coordinate reference systems
pub const CRS_WGS84: &str = "EPSG:4326";
pub const CRS_METRIC_BUFFER: &str = "EPSG:3763";

/// Metric buffering
pub const METERS_PER_KM: f64 = 1000.0;
pub const BUFFER_CIRCLE_SEGMENTS: usize = 32;

/// Default column/variable names
pub const STATION_DIM: &str = "station_id";
pub const TIME_DIM: &str = "time";
pub const BASIN_ID_FIELD: &str = "Station_ID";
