use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Variable '{0}' not found in dataset")]
    MissingVariable(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Cannot decode time axis: {0}")]
    InvalidTimeUnits(String),

    #[error("Coordinate systems must match: '{left}' vs '{right}'")]
    CrsMismatch { left: String, right: String },

    #[error("Basin '{basin_id}' not found in basin collection")]
    BasinNotFound { basin_id: String },

    #[error("Station '{station_id}' not found")]
    StationNotFound { station_id: String },

    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    #[error("Station '{station_id}' has conflicting coordinates across records")]
    AmbiguousCoordinates { station_id: String },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Dimension mismatch: {0}")]
    ShapeMismatch(String),
}
