use std::path::Path;

use geo::MultiPolygon;
use shapefile::dbase::FieldValue;
use tracing::info;

use crate::error::{PrepError, Result};
use crate::models::{Basin, BasinCollection, Crs};
use crate::utils::constants::BASIN_ID_FIELD;

/// Load basin polygons from a shapefile.
///
/// Each shape becomes one basin; the basin id comes from the `Station_ID`
/// DBF attribute, which gauging-station basin products carry. Coordinates
/// are tagged EPSG:4326, matching the products in use. A feature without
/// the id attribute is a `MissingColumn` error.
pub fn load_basin_data(path: impl AsRef<Path>) -> Result<BasinCollection> {
    let path = path.as_ref();
    let shapes = shapefile::read_as::<_, shapefile::Polygon, shapefile::dbase::Record>(path)?;

    let mut basins = Vec::with_capacity(shapes.len());
    for (polygon, record) in shapes {
        let basin_id = basin_id_field(&record)?;
        let geometry: MultiPolygon<f64> = polygon.into();
        if geometry.0.is_empty() {
            return Err(PrepError::InvalidGeometry(format!(
                "basin '{basin_id}' has no rings"
            )));
        }
        basins.push(Basin { basin_id, geometry });
    }

    info!(path = %path.display(), n_basins = basins.len(), "loaded basin shapefile");
    Ok(BasinCollection::new(basins, Crs::wgs84()))
}

fn basin_id_field(record: &shapefile::dbase::Record) -> Result<String> {
    match record.get(BASIN_ID_FIELD) {
        Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
        Some(FieldValue::Numeric(Some(n))) => Ok(if n.fract() == 0.0 {
            format!("{}", *n as i64)
        } else {
            n.to_string()
        }),
        _ => Err(PrepError::MissingColumn(BASIN_ID_FIELD.to_string())),
    }
}
