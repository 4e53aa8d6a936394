use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::{CoordinateUpdate, CoordinateUpdateTable};

/// Load a station coordinate correction table from a CSV file with
/// `station_id`, `New_Lat` and `New_Lon` columns.
pub fn load_coordinate_updates(path: impl AsRef<Path>) -> Result<CoordinateUpdateTable> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let mut updates = Vec::new();
    for row in reader.deserialize() {
        let update: CoordinateUpdate = row?;
        updates.push(update);
    }

    info!(path = %path.display(), n_updates = updates.len(), "loaded coordinate updates");
    Ok(CoordinateUpdateTable::new(updates))
}
