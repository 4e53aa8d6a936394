use chrono::NaiveDateTime;
use ndarray::{Array1, Array2};

use crate::error::{PrepError, Result};
use crate::models::table::{ObservationRecord, ObservationTable};

/// Per-station coordinate values, either one value per station or a full
/// station x second-dimension slab (e.g. per-year relocations).
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateArray {
    OneDim(Array1<f64>),
    TwoDim(Array2<f64>),
}

impl CoordinateArray {
    pub fn n_stations(&self) -> usize {
        match self {
            CoordinateArray::OneDim(a) => a.len(),
            CoordinateArray::TwoDim(a) => a.nrows(),
        }
    }

    /// Representative value for one station: the single cell for 1-D
    /// arrays, the first column for 2-D arrays.
    pub fn representative(&self, station_index: usize) -> f64 {
        match self {
            CoordinateArray::OneDim(a) => a[station_index],
            CoordinateArray::TwoDim(a) => a[[station_index, 0]],
        }
    }

    /// Overwrite one station's coordinate: a single cell for 1-D arrays,
    /// the entire second-dimension slice for 2-D arrays.
    pub fn overwrite(&mut self, station_index: usize, value: f64) {
        match self {
            CoordinateArray::OneDim(a) => a[station_index] = value,
            CoordinateArray::TwoDim(a) => a.row_mut(station_index).fill(value),
        }
    }

    fn select_rows(&self, indices: &[usize]) -> CoordinateArray {
        match self {
            CoordinateArray::OneDim(a) => {
                CoordinateArray::OneDim(indices.iter().map(|&i| a[i]).collect())
            }
            CoordinateArray::TwoDim(a) => {
                let cols = a.ncols();
                let mut out = Array2::zeros((indices.len(), cols));
                for (row, &i) in indices.iter().enumerate() {
                    out.row_mut(row).assign(&a.row(i));
                }
                CoordinateArray::TwoDim(out)
            }
        }
    }
}

/// Labeled time x station dataset read from NetCDF.
///
/// `values` is laid out `[time, station]`; missing observations are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedDataset {
    pub variable: String,
    pub station_ids: Vec<String>,
    pub times: Vec<NaiveDateTime>,
    pub values: Array2<f64>,
    pub lat: CoordinateArray,
    pub lon: CoordinateArray,
    pub elevation: Option<Array1<f64>>,
}

impl GriddedDataset {
    pub fn new(
        variable: impl Into<String>,
        station_ids: Vec<String>,
        times: Vec<NaiveDateTime>,
        values: Array2<f64>,
        lat: CoordinateArray,
        lon: CoordinateArray,
        elevation: Option<Array1<f64>>,
    ) -> Result<Self> {
        let (n_times, n_stations) = values.dim();
        if times.len() != n_times {
            return Err(PrepError::ShapeMismatch(format!(
                "time axis has {} entries but values have {} rows",
                times.len(),
                n_times
            )));
        }
        if station_ids.len() != n_stations {
            return Err(PrepError::ShapeMismatch(format!(
                "station axis has {} entries but values have {} columns",
                station_ids.len(),
                n_stations
            )));
        }
        for (name, coord) in [("lat", &lat), ("lon", &lon)] {
            if coord.n_stations() != n_stations {
                return Err(PrepError::ShapeMismatch(format!(
                    "{} array covers {} stations, expected {}",
                    name,
                    coord.n_stations(),
                    n_stations
                )));
            }
        }
        if let Some(elev) = &elevation {
            if elev.len() != n_stations {
                return Err(PrepError::ShapeMismatch(format!(
                    "elevation array covers {} stations, expected {}",
                    elev.len(),
                    n_stations
                )));
            }
        }
        Ok(Self {
            variable: variable.into(),
            station_ids,
            times,
            values,
            lat,
            lon,
            elevation,
        })
    }

    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    pub fn n_stations(&self) -> usize {
        self.station_ids.len()
    }

    pub fn station_index(&self, station_id: &str) -> Option<usize> {
        self.station_ids.iter().position(|id| id == station_id)
    }

    pub fn station_lat(&self, station_index: usize) -> f64 {
        self.lat.representative(station_index)
    }

    pub fn station_lon(&self, station_index: usize) -> f64 {
        self.lon.representative(station_index)
    }

    /// Select a subset of stations, in the requested order.
    ///
    /// Unknown ids are an error, mirroring a label-based selection.
    pub fn select_stations(&self, station_ids: &[String]) -> Result<GriddedDataset> {
        let mut indices = Vec::with_capacity(station_ids.len());
        for id in station_ids {
            let idx = self
                .station_index(id)
                .ok_or_else(|| PrepError::StationNotFound {
                    station_id: id.clone(),
                })?;
            indices.push(idx);
        }

        let mut values = Array2::zeros((self.n_times(), indices.len()));
        for (col, &i) in indices.iter().enumerate() {
            values.column_mut(col).assign(&self.values.column(i));
        }

        let elevation = self
            .elevation
            .as_ref()
            .map(|e| indices.iter().map(|&i| e[i]).collect());

        GriddedDataset::new(
            self.variable.clone(),
            station_ids.to_vec(),
            self.times.clone(),
            values,
            self.lat.select_rows(&indices),
            self.lon.select_rows(&indices),
            elevation,
        )
    }

    /// Flatten into a row-per-(time, station) table with coordinate columns
    /// materialized. NaN values become `None` rows, so the row count is
    /// always `n_times * n_stations`.
    pub fn to_table(&self) -> ObservationTable {
        let mut records = Vec::with_capacity(self.n_times() * self.n_stations());
        for (t, time) in self.times.iter().enumerate() {
            for (s, station_id) in self.station_ids.iter().enumerate() {
                let raw = self.values[[t, s]];
                let value = if raw.is_nan() { None } else { Some(raw) };
                let mut record = ObservationRecord::new(station_id.clone(), *time, value)
                    .with_coordinates(self.station_lat(s), self.station_lon(s));
                if let Some(elev) = &self.elevation {
                    record.elevation = Some(elev[s]);
                }
                records.push(record);
            }
        }
        ObservationTable::new(records)
    }
}
