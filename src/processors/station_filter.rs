use std::collections::HashSet;

use crate::error::Result;
use crate::models::{ObservationTable, StationData};
use crate::utils::progress::{self, ProgressReporter};

/// Subset station data to the listed station ids.
///
/// The table path keeps rows whose `station_id` is listed, in table order;
/// the gridded path selects along the station dimension in the requested
/// order and fails on unknown ids. Duplicate ids in the list are not
/// deduplicated beyond what the underlying selection does.
pub fn filter_stations(data: &StationData, stations: &[String]) -> Result<StationData> {
    filter_stations_with_progress(data, stations, None)
}

pub fn filter_stations_with_progress(
    data: &StationData,
    stations: &[String],
    progress: Option<&ProgressReporter>,
) -> Result<StationData> {
    progress::advance(progress, 1, "Filtering stations");
    let filtered = match data {
        StationData::Table(table) => {
            let wanted: HashSet<&str> = stations.iter().map(String::as_str).collect();
            let records = table
                .records
                .iter()
                .filter(|r| wanted.contains(r.station_id.as_str()))
                .cloned()
                .collect();
            StationData::Table(ObservationTable::new(records))
        }
        StationData::Gridded(dataset) => StationData::Gridded(dataset.select_stations(stations)?),
    };

    progress::advance(progress, 1, "Returning filtered data");
    Ok(filtered)
}
