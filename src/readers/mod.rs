pub mod coordinate_reader;
pub mod netcdf_reader;
pub mod shapefile_reader;

pub use coordinate_reader::load_coordinate_updates;
pub use netcdf_reader::{load_precip_data, load_swe_data, read_dataset, ReaderConfig};
pub use shapefile_reader::load_basin_data;
