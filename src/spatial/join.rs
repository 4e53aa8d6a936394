use geo::{Contains, Intersects};

use crate::error::Result;
use crate::models::{BasinCollection, StationPoint, StationPoints};

/// Join behaviour for stations without any matching basin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Drop unmatched stations.
    Inner,
    /// Keep unmatched stations with `basin_id: None`.
    Left,
}

impl Default for JoinKind {
    fn default() -> Self {
        JoinKind::Inner
    }
}

/// Spatial predicate relating a station point to a basin polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialPredicate {
    Intersects,
    Within,
}

impl Default for SpatialPredicate {
    fn default() -> Self {
        SpatialPredicate::Intersects
    }
}

impl SpatialPredicate {
    fn evaluate(&self, station: &StationPoint, basin: &geo::MultiPolygon<f64>) -> bool {
        match self {
            SpatialPredicate::Intersects => basin.intersects(&station.geometry),
            SpatialPredicate::Within => basin.contains(&station.geometry),
        }
    }
}

/// One output row of a spatial join: a station paired with a matched basin
/// id (one row per match, as in a predicate join).
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedStation {
    pub station: StationPoint,
    pub basin_id: Option<String>,
}

/// Predicate join between station points and basin polygons.
///
/// Point-only and polygon-only geometry is guaranteed by the collection
/// types; the CRS tags must match exactly, checked before any predicate is
/// evaluated.
pub fn spatial_join(
    points: &StationPoints,
    basins: &BasinCollection,
    kind: JoinKind,
    predicate: SpatialPredicate,
) -> Result<Vec<JoinedStation>> {
    points.crs.ensure_matches(&basins.crs)?;

    let mut joined = Vec::new();
    for station in &points.records {
        let mut matched = false;
        for basin in &basins.basins {
            if predicate.evaluate(station, &basin.geometry) {
                matched = true;
                joined.push(JoinedStation {
                    station: station.clone(),
                    basin_id: Some(basin.basin_id.clone()),
                });
            }
        }
        if !matched && kind == JoinKind::Left {
            joined.push(JoinedStation {
                station: station.clone(),
                basin_id: None,
            });
        }
    }

    Ok(joined)
}
