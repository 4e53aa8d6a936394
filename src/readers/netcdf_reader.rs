use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use ndarray::{Array1, Array2};
use tracing::{debug, info};

use crate::error::{PrepError, Result};
use crate::models::{CoordinateArray, GriddedDataset};
use crate::utils::constants::{STATION_DIM, TIME_DIM};

/// Configuration for reading station-dimensioned climate data from NetCDF.
///
/// Use the builder methods (`with_*`) to customise variable names and
/// coordinate aliases. [`ReaderConfig::swe`] and [`ReaderConfig::precip`]
/// supply the names found in the snow-survey and precipitation products.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Aliases to try when looking up the value variable.
    value_aliases: Vec<String>,
    /// NetCDF variable name for the station identifier axis.
    station_var: String,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Aliases to try when looking up station elevation, if present.
    elevation_aliases: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            value_aliases: vec![],
            station_var: STATION_DIM.into(),
            time_var: TIME_DIM.into(),
            lat_aliases: vec!["lat".into(), "latitude".into()],
            lon_aliases: vec!["lon".into(), "longitude".into()],
            elevation_aliases: vec!["elevation".into(), "elev".into(), "z".into()],
        }
    }
}

impl ReaderConfig {
    /// Names used by snow-water-equivalent products.
    pub fn swe() -> Self {
        Self::default().with_value_aliases(["snw", "swe", "SWE"])
    }

    /// Names used by gridded precipitation products.
    pub fn precip() -> Self {
        Self::default().with_value_aliases(["pr", "precip", "precipitation"])
    }

    pub fn with_value_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_station_var(mut self, name: impl Into<String>) -> Self {
        self.station_var = name.into();
        self
    }

    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }
}

/// Load a snow-water-equivalent dataset from a NetCDF file.
pub fn load_swe_data(path: impl AsRef<Path>) -> Result<GriddedDataset> {
    read_dataset(path.as_ref(), &ReaderConfig::swe())
}

/// Load a precipitation dataset from a NetCDF file.
pub fn load_precip_data(path: impl AsRef<Path>) -> Result<GriddedDataset> {
    read_dataset(path.as_ref(), &ReaderConfig::precip())
}

/// Read a time x station dataset from a NetCDF file.
///
/// The value variable is located by alias, reoriented to `[time, station]`
/// if stored the other way around, and its fill values are replaced with
/// NaN. The time axis is decoded from its CF `units` attribute
/// (`"<unit> since <epoch>"`).
pub fn read_dataset(path: &Path, config: &ReaderConfig) -> Result<GriddedDataset> {
    let file = netcdf::open(path)?;

    let alias_refs: Vec<&str> = config.value_aliases.iter().map(String::as_str).collect();
    let (var_name, var) = find_variable(&file, &alias_refs)?;

    let dims = var.dimensions();
    if dims.len() != 2 {
        return Err(PrepError::ShapeMismatch(format!(
            "variable '{}' has {} dimensions, expected 2",
            var_name,
            dims.len()
        )));
    }
    let time_first = dims[0].name() == config.time_var;
    let (rows, cols) = (dims[0].len(), dims[1].len());

    let raw: Vec<f64> = var.get_values(..)?;
    let arr = Array2::from_shape_vec((rows, cols), raw)
        .map_err(|e| PrepError::ShapeMismatch(e.to_string()))?;
    let mut values = if time_first { arr } else { arr.reversed_axes() };

    if let Some(fill) = fill_value(&var) {
        values.mapv_inplace(|v| if v == fill { f64::NAN } else { v });
    }
    let (n_times, n_stations) = values.dim();

    let times = read_time_axis(&file, &config.time_var, n_times)?;
    let station_ids = read_station_ids(&file, &config.station_var, n_stations);

    let lat_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lon_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();
    let lat = read_coordinate(&file, &lat_refs)?;
    let lon = read_coordinate(&file, &lon_refs)?;

    let elevation = config
        .elevation_aliases
        .iter()
        .find_map(|name| file.variable(name))
        .map(|v| v.get_values::<f64, _>(..))
        .transpose()?
        .map(Array1::from_vec);

    info!(
        path = %path.display(),
        variable = var_name,
        n_times,
        n_stations,
        "loaded NetCDF dataset"
    );

    GriddedDataset::new(var_name, station_ids, times, values, lat, lon, elevation)
}

fn find_variable<'f>(
    file: &'f netcdf::File,
    aliases: &[&str],
) -> Result<(String, netcdf::Variable<'f>)> {
    for name in aliases {
        if let Some(var) = file.variable(name) {
            return Ok((name.to_string(), var));
        }
    }
    Err(PrepError::MissingVariable(aliases.join(" | ")))
}

fn fill_value(var: &netcdf::Variable) -> Option<f64> {
    let value = var.attribute("_FillValue")?.value().ok()?;
    numeric_attribute(value)
}

fn numeric_attribute(value: netcdf::AttributeValue) -> Option<f64> {
    use netcdf::AttributeValue::*;
    match value {
        Double(v) => Some(v),
        Float(v) => Some(v as f64),
        Int(v) => Some(v as f64),
        Uint(v) => Some(v as f64),
        Short(v) => Some(v as f64),
        Ushort(v) => Some(v as f64),
        Longlong(v) => Some(v as f64),
        Ulonglong(v) => Some(v as f64),
        Schar(v) => Some(v as f64),
        Uchar(v) => Some(v as f64),
        _ => None,
    }
}

fn read_time_axis(
    file: &netcdf::File,
    time_var: &str,
    expected_len: usize,
) -> Result<Vec<NaiveDateTime>> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| PrepError::MissingVariable(time_var.to_string()))?;

    let units = match var.attribute("units").map(|a| a.value()).transpose()? {
        Some(netcdf::AttributeValue::Str(s)) => s,
        _ => {
            return Err(PrepError::InvalidTimeUnits(format!(
                "time variable '{time_var}' has no string 'units' attribute"
            )))
        }
    };
    let (seconds_per_unit, epoch) = parse_time_units(&units)?;

    let offsets: Vec<f64> = var.get_values(..)?;
    if offsets.len() != expected_len {
        return Err(PrepError::ShapeMismatch(format!(
            "time axis has {} entries, values have {} rows",
            offsets.len(),
            expected_len
        )));
    }

    Ok(offsets
        .iter()
        .map(|&o| epoch + Duration::milliseconds((o * seconds_per_unit * 1000.0).round() as i64))
        .collect())
}

/// Parse a CF time-units string, e.g. `"days since 2000-01-01 00:00:00"`.
///
/// Returns the unit length in seconds and the epoch. Calendars other than
/// the standard proleptic Gregorian are not handled.
fn parse_time_units(units: &str) -> Result<(f64, NaiveDateTime)> {
    let mut parts = units.splitn(3, ' ');
    let (unit, since, epoch_str) = match (parts.next(), parts.next(), parts.next()) {
        (Some(u), Some(s), Some(e)) => (u, s, e.trim()),
        _ => return Err(PrepError::InvalidTimeUnits(units.to_string())),
    };
    if !since.eq_ignore_ascii_case("since") {
        return Err(PrepError::InvalidTimeUnits(units.to_string()));
    }

    let seconds_per_unit = match unit.to_ascii_lowercase().as_str() {
        "second" | "seconds" | "sec" | "secs" | "s" => 1.0,
        "minute" | "minutes" | "min" | "mins" => 60.0,
        "hour" | "hours" | "hr" | "hrs" | "h" => 3600.0,
        "day" | "days" | "d" => 86_400.0,
        _ => return Err(PrepError::InvalidTimeUnits(units.to_string())),
    };

    let epoch = NaiveDateTime::parse_from_str(epoch_str, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(epoch_str, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(epoch_str, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|_| PrepError::InvalidTimeUnits(units.to_string()))?;

    Ok((seconds_per_unit, epoch))
}

/// Station identifiers, read from the station variable when it is numeric.
///
/// Integral values are formatted without a fractional part so ids like
/// `05BB001` stored as numeric codes round-trip cleanly. When the variable
/// is absent or not numeric, positional ids are used instead.
fn read_station_ids(file: &netcdf::File, station_var: &str, n_stations: usize) -> Vec<String> {
    if let Some(var) = file.variable(station_var) {
        if let Ok(raw) = var.get_values::<f64, _>(..) {
            if raw.len() == n_stations {
                return raw.iter().map(|&v| format_station_id(v)).collect();
            }
        }
        debug!(station_var, "station variable unreadable as numeric, using positional ids");
    }
    (0..n_stations).map(|i| i.to_string()).collect()
}

fn format_station_id(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// A coordinate variable, either one value per station or a full
/// station x second-dimension slab.
fn read_coordinate(file: &netcdf::File, aliases: &[&str]) -> Result<CoordinateArray> {
    let (name, var) = find_variable(file, aliases)?;
    let raw: Vec<f64> = var.get_values(..)?;
    let dims = var.dimensions();

    match dims.len() {
        1 => Ok(CoordinateArray::OneDim(Array1::from_vec(raw))),
        2 => {
            let (rows, cols) = (dims[0].len(), dims[1].len());
            let arr = Array2::from_shape_vec((rows, cols), raw)
                .map_err(|e| PrepError::ShapeMismatch(e.to_string()))?;
            Ok(CoordinateArray::TwoDim(arr))
        }
        n => Err(PrepError::ShapeMismatch(format!(
            "coordinate variable '{name}' has {n} dimensions, expected 1 or 2"
        ))),
    }
}
