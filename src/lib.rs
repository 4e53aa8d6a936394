pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod spatial;
pub mod utils;

pub use error::{PrepError, Result};
