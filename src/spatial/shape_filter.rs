use geo::{Contains, Point};
use tracing::warn;

use crate::error::{PrepError, Result};
use crate::models::{BasinCollection, GriddedDataset, ObservationTable};
use crate::utils::progress::{self, ProgressReporter};

/// Keep only the stations of a dataset whose location lies within a
/// reference shape, returning all rows of every retained station.
///
/// The test is per-station all-or-nothing against the first geometry of the
/// shape collection, using each station's representative coordinates. A
/// station whose rows disagree on coordinates is an explicit error instead
/// of silently trusting the first record.
pub fn filter_data_within_shape(
    dataset: &GriddedDataset,
    shape: &BasinCollection,
    progress: Option<&ProgressReporter>,
) -> Result<ObservationTable> {
    let reference = shape
        .basins
        .first()
        .ok_or_else(|| PrepError::EmptyCollection("shape collection".to_string()))?;
    if shape.len() > 1 {
        warn!(
            n_features = shape.len(),
            "shape collection has multiple features; testing against the first"
        );
    }

    let table = dataset.to_table();
    let station_ids = table.station_ids();

    let mut retained = Vec::new();
    for station_id in &station_ids {
        let rows = table.station_records(station_id);

        let first = rows[0];
        let (lat, lon) = match (first.lat, first.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Err(PrepError::MissingColumn("lat/lon".to_string())),
        };

        // Reject stations whose records carry conflicting coordinates.
        for row in &rows {
            if row.lat != Some(lat) || row.lon != Some(lon) {
                return Err(PrepError::AmbiguousCoordinates {
                    station_id: station_id.clone(),
                });
            }
        }

        if reference.geometry.contains(&Point::new(lon, lat)) {
            retained.extend(rows.into_iter().cloned());
        }

        progress::advance(progress, 1, &format!("Processed station {station_id}"));
    }

    Ok(ObservationTable::new(retained))
}
