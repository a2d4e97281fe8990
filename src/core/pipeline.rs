use crate::core::aggregation;
use crate::core::{Aggregator, ConfigProvider, Order};
use crate::utils::error::{AggregationError, Result};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
pub const SALES_FALLBACK: f64 = 0.0;
pub const COUNT_FALLBACK: u64 = 0;

/// Runs the aggregation queries on tokio's blocking pool, each guarded by
/// its own timeout measured from dispatch.
#[derive(Debug, Clone)]
pub struct OrderPipeline {
    orders: Arc<[Order]>,
    timeout: Duration,
    simulated_latency: Duration,
}

impl OrderPipeline {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: orders.into(),
            timeout: DEFAULT_QUERY_TIMEOUT,
            simulated_latency: Duration::ZERO,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.orders())
            .with_timeout(config.query_timeout())
            .with_simulated_latency(config.simulated_latency())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay awaited before each computation is handed to the worker. It
    /// counts against the query timeout and is dropped along with it.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn dispatch<T, F>(&self, query: &'static str, product: &str, compute: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&[Order], &str) -> T + Send + 'static,
    {
        let orders = Arc::clone(&self.orders);
        let latency = self.simulated_latency;
        let owned_product = product.to_string();

        tracing::debug!("Dispatching {} for {}", query, product);

        // 延遲與計算都在 timeout 之內，逾時後不留下執行中的 worker
        let work = async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            tokio::task::spawn_blocking(move || compute(&orders[..], owned_product.as_str()))
                .await
        };

        match tokio::time::timeout(self.timeout, work).await {
            Ok(joined) => Ok(joined?),
            Err(_) => Err(AggregationError::Timeout {
                query: query.to_string(),
                product: product.to_string(),
                timeout: self.timeout,
            }),
        }
    }
}

#[async_trait::async_trait]
impl Aggregator for OrderPipeline {
    async fn total_sales(&self, product: &str) -> Result<f64> {
        match self
            .dispatch("total_sales", product, aggregation::sum_sales)
            .await
        {
            Err(e) if e.is_timeout() => {
                tracing::warn!("⏱️ {}; using fallback {:?}", e, SALES_FALLBACK);
                Ok(SALES_FALLBACK)
            }
            other => other,
        }
    }

    async fn count_orders(&self, product: &str) -> Result<u64> {
        match self
            .dispatch("count_orders", product, aggregation::count_matching)
            .await
        {
            Err(e) if e.is_timeout() => {
                tracing::warn!("⏱️ {}; using fallback {}", e, COUNT_FALLBACK);
                Ok(COUNT_FALLBACK)
            }
            other => other,
        }
    }

    async fn order_details(&self, product: &str) -> Result<Vec<String>> {
        self.dispatch("order_details", product, aggregation::describe_orders)
            .await
    }
}
