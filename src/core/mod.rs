pub mod aggregation;
pub mod engine;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{Order, OutputFormat, ProductReport};
pub use crate::domain::ports::{Aggregator, ConfigProvider};
pub use crate::utils::error::Result;
