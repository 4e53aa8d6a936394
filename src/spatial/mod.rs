pub mod basin_extractor;
pub mod buffer;
pub mod convert;
pub mod join;
pub mod projection;
pub mod shape_filter;

pub use basin_extractor::{extract_stations_in_basin, BasinBuffer};
pub use buffer::buffer_multi_polygon;
pub use convert::convert_to_station_points;
pub use join::{spatial_join, JoinKind, JoinedStation, SpatialPredicate};
pub use projection::TransverseMercator;
pub use shape_filter::filter_data_within_shape;
