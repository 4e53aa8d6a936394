pub mod basin;
pub mod coordinate_update;
pub mod crs;
pub mod gridded;
pub mod station;
pub mod table;

pub use basin::{Basin, BasinCollection};
pub use coordinate_update::{CoordinateUpdate, CoordinateUpdateTable};
pub use crs::Crs;
pub use gridded::{CoordinateArray, GriddedDataset};
pub use station::{StationPoint, StationPoints};
pub use table::{ObservationRecord, ObservationTable};

/// Station data in either of the two representations the pipeline moves
/// between: a flat observation table or a gridded time x station dataset.
///
/// Functions that accept both (station filtering, coordinate updates)
/// take this tagged variant, so the two code paths are statically
/// distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub enum StationData {
    Table(ObservationTable),
    Gridded(GriddedDataset),
}

impl StationData {
    pub fn as_table(&self) -> Option<&ObservationTable> {
        match self {
            StationData::Table(t) => Some(t),
            StationData::Gridded(_) => None,
        }
    }

    pub fn as_gridded(&self) -> Option<&GriddedDataset> {
        match self {
            StationData::Table(_) => None,
            StationData::Gridded(g) => Some(g),
        }
    }
}
