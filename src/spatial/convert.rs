use validator::Validate;

use crate::error::{PrepError, Result};
use crate::models::{Crs, ObservationTable, StationPoint, StationPoints};

/// Build a station point collection from a flat table, one Point per row.
///
/// Every row must carry both coordinate columns; a row with either missing
/// fails before any geometry is built. Coordinates outside valid ranges
/// fail record validation.
pub fn convert_to_station_points(table: &ObservationTable, crs: Crs) -> Result<StationPoints> {
    let mut records = Vec::with_capacity(table.len());

    for row in &table.records {
        let lat = row
            .lat
            .filter(|v| v.is_finite())
            .ok_or_else(|| PrepError::MissingColumn("lat".to_string()))?;
        let lon = row
            .lon
            .filter(|v| v.is_finite())
            .ok_or_else(|| PrepError::MissingColumn("lon".to_string()))?;

        let mut station = StationPoint::new(row.station_id.clone(), lat, lon);
        station.elevation = row.elevation;
        station.validate()?;
        records.push(station);
    }

    Ok(StationPoints::new(records, crs))
}
