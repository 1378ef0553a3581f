pub mod config;
pub mod error;
pub mod pipeline;
pub mod roles;
pub mod seed;
pub mod workbook;

pub use config::PipelineConfig;
pub use error::SeedError;
pub use pipeline::{materialize, materialize_from, MaterializationResult};
