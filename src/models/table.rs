use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One (station, time) observation in a flattened table.
///
/// Coordinate and metadata columns are optional: a table produced straight
/// from a gridded dataset carries coordinates but no `data_source`/`units`
/// stamp, a daily-resampled table carries neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub station_id: String,
    pub time: NaiveDateTime,
    pub value: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub elevation: Option<f64>,
    pub data_source: Option<String>,
    pub units: Option<String>,
}

impl ObservationRecord {
    pub fn new(station_id: impl Into<String>, time: NaiveDateTime, value: Option<f64>) -> Self {
        Self {
            station_id: station_id.into(),
            time,
            value,
            lat: None,
            lon: None,
            elevation: None,
            data_source: None,
            units: None,
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn is_missing(&self) -> bool {
        match self.value {
            None => true,
            Some(v) => v.is_nan(),
        }
    }
}

/// Row-oriented observation table, one row per (station, time) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationTable {
    pub records: Vec<ObservationRecord>,
}

impl ObservationTable {
    pub fn new(records: Vec<ObservationRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct station ids in first-appearance order.
    pub fn station_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut ids = Vec::new();
        for record in &self.records {
            if seen.insert(record.station_id.clone()) {
                ids.push(record.station_id.clone());
            }
        }
        ids
    }

    /// Rows belonging to one station, in table order.
    pub fn station_records(&self, station_id: &str) -> Vec<&ObservationRecord> {
        self.records
            .iter()
            .filter(|r| r.station_id == station_id)
            .collect()
    }
}
