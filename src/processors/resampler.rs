use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::error::Result;
use crate::models::{ObservationRecord, ObservationTable};
use crate::utils::progress::{self, ProgressReporter};

/// Resample an hourly observation table to daily granularity.
///
/// Per station, each calendar day's value is the arithmetic mean of that
/// day's non-missing observations; a day whose observations are all missing
/// yields a missing daily value. Only days present in the input appear, so
/// the output row count per station equals the station's number of distinct
/// calendar days. Times are naive; no timezone handling.
pub fn convert_hourly_to_daily(
    table: &ObservationTable,
    progress: Option<&ProgressReporter>,
) -> Result<ObservationTable> {
    let station_ids = table.station_ids();
    let mut daily = Vec::new();

    for station_id in &station_ids {
        let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

        for record in table.station_records(station_id) {
            let day = record.time.date();
            let bucket = buckets.entry(day).or_insert((0.0, 0));
            if let Some(v) = record.value.filter(|v| !v.is_nan()) {
                bucket.0 += v;
                bucket.1 += 1;
            }
        }

        for (day, (sum, count)) in buckets {
            let value = if count > 0 {
                Some(sum / count as f64)
            } else {
                None
            };
            daily.push(ObservationRecord::new(
                station_id.clone(),
                day.and_time(NaiveTime::MIN),
                value,
            ));
        }

        progress::advance(progress, 1, &format!("Resampled station {station_id}"));
    }

    debug!(
        n_stations = station_ids.len(),
        n_rows = daily.len(),
        "resampled hourly data to daily"
    );
    Ok(ObservationTable::new(daily))
}
