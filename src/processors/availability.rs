use crate::error::{PrepError, Result};
use crate::models::GriddedDataset;
use crate::utils::progress::{self, ProgressReporter};

/// Per-station share of non-missing observations, in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityReport {
    pub station_ids: Vec<String>,
    pub percent: Vec<f64>,
}

impl AvailabilityReport {
    pub fn for_station(&self, station_id: &str) -> Option<f64> {
        self.station_ids
            .iter()
            .position(|id| id == station_id)
            .map(|i| self.percent[i])
    }
}

/// Assess data availability per station over the time dimension:
/// `non_missing / n_times * 100`.
///
/// The time axis itself is assumed gap-free; only values are missing. An
/// empty time dimension is an explicit error rather than a division by
/// zero.
pub fn assess_data_availability(
    dataset: &GriddedDataset,
    progress: Option<&ProgressReporter>,
) -> Result<AvailabilityReport> {
    let total_times = dataset.n_times();
    if total_times == 0 {
        return Err(PrepError::EmptyCollection("time dimension".to_string()));
    }

    progress::advance(progress, 1, "Counting non-missing values");
    let counts: Vec<usize> = (0..dataset.n_stations())
        .map(|s| {
            dataset
                .values
                .column(s)
                .iter()
                .filter(|v| !v.is_nan())
                .count()
        })
        .collect();

    progress::advance(progress, 1, "Calculating availability percentages");
    let percent = counts
        .iter()
        .map(|&c| c as f64 / total_times as f64 * 100.0)
        .collect();

    progress::advance(progress, 1, "Finalizing report");
    Ok(AvailabilityReport {
        station_ids: dataset.station_ids.clone(),
        percent,
    })
}
