pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::{build_client, HttpReferenceSource, HttpWarrantySource};
pub use adapters::output::{ConsoleSink, CsvFileSink};
pub use config::AppConfig;
pub use crate::core::{engine::WarrantyEngine, reference::ReferenceMap};
pub use utils::error::{Result, WarrantyError};
