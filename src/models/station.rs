use geo::Point;
use validator::Validate;

use crate::models::crs::Crs;

/// One station with its point geometry.
///
/// Exactly one `Point` per record; collections of stations never mix
/// geometry types.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct StationPoint {
    pub station_id: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    pub elevation: Option<f64>,

    /// Basin annotation set by basin extraction.
    pub basin: Option<String>,

    pub geometry: Point<f64>,
}

impl StationPoint {
    pub fn new(station_id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            station_id: station_id.into(),
            lat,
            lon,
            elevation: None,
            basin: None,
            geometry: Point::new(lon, lat),
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }
}

/// Station point collection with its coordinate reference system tag.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPoints {
    pub records: Vec<StationPoint>,
    pub crs: Crs,
}

impl StationPoints {
    pub fn new(records: Vec<StationPoint>, crs: Crs) -> Self {
        Self { records, crs }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn station_ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.station_id.as_str()).collect()
    }
}
