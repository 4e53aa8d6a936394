use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Replacement coordinates for one station.
///
/// Field names mirror the CSV headers of the externally supplied
/// correction tables (`station_id`, `New_Lat`, `New_Lon`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateUpdate {
    pub station_id: String,
    #[serde(rename = "New_Lat")]
    pub new_lat: f64,
    #[serde(rename = "New_Lon")]
    pub new_lon: f64,
}

/// Table mapping station id to replacement latitude/longitude.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateUpdateTable {
    pub updates: Vec<CoordinateUpdate>,
}

impl CoordinateUpdateTable {
    pub fn new(updates: Vec<CoordinateUpdate>) -> Self {
        Self { updates }
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Lookup map from station id to (lat, lon). Later rows win on
    /// duplicate ids.
    pub fn lookup(&self) -> HashMap<&str, (f64, f64)> {
        self.updates
            .iter()
            .map(|u| (u.station_id.as_str(), (u.new_lat, u.new_lon)))
            .collect()
    }
}
