pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use crate::core::{engine::ReportEngine, pipeline::OrderPipeline};
pub use domain::model::{Order, OutputFormat, ProductReport};
pub use domain::ports::{Aggregator, ConfigProvider};
pub use utils::error::{AggregationError, Result};
