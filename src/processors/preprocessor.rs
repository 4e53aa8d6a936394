use tracing::debug;

use crate::error::Result;
use crate::models::{GriddedDataset, ObservationTable};
use crate::utils::constants::{SOURCE_PRECIP, SOURCE_SWE, UNITS_MM};
use crate::utils::progress::{self, ProgressReporter};

/// Flatten a SWE dataset into an observation table and stamp its metadata
/// columns (`data_source = "SWE"`, `units = "mm"`) on every row.
pub fn preprocess_swe(
    dataset: &GriddedDataset,
    progress: Option<&ProgressReporter>,
) -> Result<ObservationTable> {
    flatten_with_metadata(dataset, SOURCE_SWE, progress)
}

/// Flatten a precipitation dataset into an observation table and stamp its
/// metadata columns (`data_source = "Precipitation"`, `units = "mm"`).
///
/// The time axis is already decoded to date-times at load, so no further
/// normalization is needed; rows come out in chronological order.
pub fn preprocess_precip(
    dataset: &GriddedDataset,
    progress: Option<&ProgressReporter>,
) -> Result<ObservationTable> {
    flatten_with_metadata(dataset, SOURCE_PRECIP, progress)
}

fn flatten_with_metadata(
    dataset: &GriddedDataset,
    source: &str,
    progress: Option<&ProgressReporter>,
) -> Result<ObservationTable> {
    progress::advance(progress, 1, "Converting to table");
    let mut table = dataset.to_table();

    progress::advance(progress, 1, "Adding metadata");
    for record in &mut table.records {
        record.data_source = Some(source.to_string());
        record.units = Some(UNITS_MM.to_string());
    }

    progress::advance(progress, 1, "Finalizing preprocessing");
    debug!(
        source,
        n_rows = table.len(),
        n_stations = dataset.n_stations(),
        "flattened dataset"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoordinateArray;
    use chrono::NaiveDate;
    use ndarray::array;

    fn dataset() -> GriddedDataset {
        let times = (1..=2)
            .map(|d| {
                NaiveDate::from_ymd_opt(2020, 1, d)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            })
            .collect();
        GriddedDataset::new(
            "snw",
            vec!["A".to_string(), "B".to_string()],
            times,
            array![[1.0, f64::NAN], [2.0, 20.0]],
            CoordinateArray::OneDim(array![51.0, 52.0]),
            CoordinateArray::OneDim(array![-114.0, -115.0]),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_swe_metadata_on_every_row() {
        let table = preprocess_swe(&dataset(), None).unwrap();

        assert_eq!(table.len(), 4);
        for record in &table.records {
            assert_eq!(record.data_source.as_deref(), Some("SWE"));
            assert_eq!(record.units.as_deref(), Some("mm"));
        }
    }

    #[test]
    fn test_precip_metadata_on_every_row() {
        let table = preprocess_precip(&dataset(), None).unwrap();

        for record in &table.records {
            assert_eq!(record.data_source.as_deref(), Some("Precipitation"));
            assert_eq!(record.units.as_deref(), Some("mm"));
        }
    }

    #[test]
    fn test_coordinates_materialized_and_missing_rows_kept() {
        let table = preprocess_swe(&dataset(), None).unwrap();

        let b_rows = table.station_records("B");
        assert_eq!(b_rows.len(), 2);
        assert_eq!(b_rows[0].lat, Some(52.0));
        assert!(b_rows[0].is_missing());
        assert_eq!(b_rows[1].value, Some(20.0));
    }

    #[test]
    fn test_silent_reporter_does_not_change_output() {
        let reporter = crate::utils::ProgressReporter::new(3, "Preprocessing SWE", true);
        let with_reporter = preprocess_swe(&dataset(), Some(&reporter)).unwrap();
        let without = preprocess_swe(&dataset(), None).unwrap();
        assert_eq!(with_reporter, without);
    }

    #[test]
    fn test_rows_in_chronological_order() {
        let table = preprocess_precip(&dataset(), None).unwrap();
        for pair in table.station_records("A").windows(2) {
            assert!(pair[0].time < pair[1].time);
        }
    }
}
