use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};
use crate::utils::constants::{CRS_METRIC_BUFFER, CRS_WGS84};

/// Coordinate reference system tag attached to geospatial collections.
///
/// Stored as an EPSG-style authority string. Operations that combine two
/// collections require their tags to be identical; a mismatch is a hard
/// error, never silently reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crs(String);

impl Crs {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Geographic WGS84, the default for station coordinates.
    pub fn wgs84() -> Self {
        Self(CRS_WGS84.to_string())
    }

    /// The fixed meter-based reference used for metric buffering.
    pub fn metric_buffer() -> Self {
        Self(CRS_METRIC_BUFFER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wgs84(&self) -> bool {
        self.0 == CRS_WGS84
    }

    /// Fail unless `self` and `other` are the same reference system.
    pub fn ensure_matches(&self, other: &Crs) -> Result<()> {
        if self != other {
            return Err(PrepError::CrsMismatch {
                left: self.0.clone(),
                right: other.0.clone(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
