use tracing::debug;

use crate::error::Result;
use crate::models::{CoordinateUpdateTable, GriddedDataset, ObservationTable, StationData};
use crate::utils::progress::{self, ProgressReporter};

/// Overwrite station coordinates from a correction table, in place.
///
/// Stations absent from the table are left untouched. Both representations
/// are updated through `&mut`, so the historical asymmetry between the two
/// variants (table mutated in place, dataset rebuilt and returned) is gone.
pub fn update_coordinates(
    data: &mut StationData,
    updates: &CoordinateUpdateTable,
    progress: Option<&ProgressReporter>,
) -> Result<()> {
    match data {
        StationData::Table(table) => update_table(table, updates, progress),
        StationData::Gridded(dataset) => update_gridded(dataset, updates, progress),
    }
    Ok(())
}

fn update_table(
    table: &mut ObservationTable,
    updates: &CoordinateUpdateTable,
    progress: Option<&ProgressReporter>,
) {
    let lookup = updates.lookup();
    let mut updated = 0usize;

    for record in &mut table.records {
        if let Some(&(lat, lon)) = lookup.get(record.station_id.as_str()) {
            record.lat = Some(lat);
            record.lon = Some(lon);
            updated += 1;
        }
        progress::advance(progress, 1, "Updating coordinates");
    }

    debug!(n_rows = updated, "updated table coordinates");
}

fn update_gridded(
    dataset: &mut GriddedDataset,
    updates: &CoordinateUpdateTable,
    progress: Option<&ProgressReporter>,
) {
    let lookup = updates.lookup();
    let mut updated = 0usize;

    for i in 0..dataset.n_stations() {
        if let Some(&(lat, lon)) = lookup.get(dataset.station_ids[i].as_str()) {
            // 1-D coordinate arrays get the single cell, 2-D arrays the
            // whole second-dimension slice.
            dataset.lat.overwrite(i, lat);
            dataset.lon.overwrite(i, lon);
            updated += 1;
        }
        progress::advance(progress, 1, "Updating coordinates");
    }

    debug!(n_stations = updated, "updated dataset coordinates");
}
