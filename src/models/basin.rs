use geo::MultiPolygon;

use crate::error::{PrepError, Result};
use crate::models::crs::Crs;

/// One drainage basin polygon with its identifier.
///
/// The identifier comes from the shapefile's `Station_ID` attribute (basins
/// are named after their gauging station in the source data).
#[derive(Debug, Clone, PartialEq)]
pub struct Basin {
    pub basin_id: String,
    pub geometry: MultiPolygon<f64>,
}

impl Basin {
    pub fn new(basin_id: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            basin_id: basin_id.into(),
            geometry,
        }
    }
}

/// Basin polygon collection with its coordinate reference system tag.
/// Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct BasinCollection {
    pub basins: Vec<Basin>,
    pub crs: Crs,
}

impl BasinCollection {
    pub fn new(basins: Vec<Basin>, crs: Crs) -> Self {
        Self { basins, crs }
    }

    pub fn len(&self) -> usize {
        self.basins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basins.is_empty()
    }

    /// First basin with the requested id. Missing basins are an explicit
    /// error rather than an index panic.
    pub fn find(&self, basin_id: &str) -> Result<&Basin> {
        self.basins
            .iter()
            .find(|b| b.basin_id == basin_id)
            .ok_or_else(|| PrepError::BasinNotFound {
                basin_id: basin_id.to_string(),
            })
    }
}
