pub mod availability;
pub mod coordinate_updater;
pub mod preprocessor;
pub mod resampler;
pub mod station_filter;

pub use availability::{assess_data_availability, AvailabilityReport};
pub use coordinate_updater::update_coordinates;
pub use preprocessor::{preprocess_precip, preprocess_swe};
pub use resampler::convert_hourly_to_daily;
pub use station_filter::{filter_stations, filter_stations_with_progress};
