//! Data module - CSV loading and processing

mod loader;
mod processor;
mod records;

pub use loader::{DataLoader, LoaderError, Validation, DATE_FORMAT};
pub use processor::DataProcessor;
pub use records::{AgeLikes, DailyLikes, PlatformLikes};
