use crate::domain::model::{Order, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn products(&self) -> &[String];
    fn query_timeout(&self) -> Duration;
    fn simulated_latency(&self) -> Duration;
    fn output_format(&self) -> OutputFormat;
    fn show_details(&self) -> bool;
    /// The dataset to aggregate over.
    fn orders(&self) -> Vec<Order>;
}

/// Per-product aggregation queries. Each call completes with a single value
/// or failure and never blocks the calling thread.
#[async_trait]
pub trait Aggregator: Send + Sync {
    /// Falls back to `0.0` when the query times out.
    async fn total_sales(&self, product: &str) -> Result<f64>;

    /// Falls back to `0` when the query times out.
    async fn count_orders(&self, product: &str) -> Result<u64>;

    /// Fails with `AggregationError::Timeout` when the query times out.
    async fn order_details(&self, product: &str) -> Result<Vec<String>>;
}
