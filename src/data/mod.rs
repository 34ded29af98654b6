//! Data module - CSV loading, row extraction and cleaning

mod loader;
mod model;
mod processor;

pub use loader::DataLoader;
pub use model::Show;
pub use processor::DataProcessor;
