use crate::core::{Aggregator, ProductReport};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::task::JoinSet;

pub struct ReportEngine<A: Aggregator> {
    aggregator: Arc<A>,
}

impl<A: Aggregator + 'static> ReportEngine<A> {
    pub fn new(aggregator: A) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }

    pub async fn report_for(&self, product: &str) -> Result<ProductReport> {
        Self::build_report(self.aggregator.as_ref(), product).await
    }

    /// Reports in the order `products` was given.
    pub async fn run(&self, products: &[String]) -> Result<Vec<ProductReport>> {
        self.run_with(products, |_| {}).await
    }

    /// Like [`run`](Self::run), but `on_complete` sees each report as soon as
    /// it finishes, in completion order.
    pub async fn run_with<F>(
        &self,
        products: &[String],
        mut on_complete: F,
    ) -> Result<Vec<ProductReport>>
    where
        F: FnMut(&ProductReport),
    {
        tracing::info!("Starting aggregation for {} products", products.len());

        let mut tasks = JoinSet::new();
        for (index, product) in products.iter().cloned().enumerate() {
            let aggregator = Arc::clone(&self.aggregator);
            tasks.spawn(async move {
                let report = Self::build_report(aggregator.as_ref(), &product).await;
                (index, report)
            });
        }

        let mut completed = Vec::with_capacity(products.len());
        while let Some(joined) = tasks.join_next().await {
            let (index, report) = joined?;
            let report = report?;

            tracing::debug!(
                "Report for {} completed: total={:?}, count={}",
                report.product,
                report.total_sales,
                report.order_count
            );
            on_complete(&report);
            completed.push((index, report));
        }

        completed.sort_by_key(|(index, _)| *index);
        tracing::info!("✅ Aggregated {} reports", completed.len());

        Ok(completed.into_iter().map(|(_, report)| report).collect())
    }

    async fn build_report(aggregator: &A, product: &str) -> Result<ProductReport> {
        // 三個查詢彼此獨立，完成順序不固定
        let (total_sales, order_count, details) = tokio::join!(
            aggregator.total_sales(product),
            aggregator.count_orders(product),
            aggregator.order_details(product),
        );

        let details = match details {
            Ok(lines) => Some(lines),
            Err(e) if e.is_timeout() => {
                tracing::warn!("❌ {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(ProductReport {
            product: product.to_string(),
            total_sales: total_sales?,
            order_count: order_count?,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::OrderPipeline;
    use crate::domain::dataset::{sample_orders, sample_products};
    use crate::utils::error::AggregationError;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Returns canned values, sleeping per product so completion order can be
    /// forced.
    struct MockAggregator {
        delays: HashMap<String, Duration>,
        details_timeout: bool,
        fail_sales: bool,
    }

    impl MockAggregator {
        fn new() -> Self {
            Self {
                delays: HashMap::new(),
                details_timeout: false,
                fail_sales: false,
            }
        }

        fn with_delay(mut self, product: &str, delay: Duration) -> Self {
            self.delays.insert(product.to_string(), delay);
            self
        }

        fn with_details_timeout(mut self) -> Self {
            self.details_timeout = true;
            self
        }

        fn with_failing_sales(mut self) -> Self {
            self.fail_sales = true;
            self
        }

        async fn wait(&self, product: &str) {
            if let Some(delay) = self.delays.get(product) {
                tokio::time::sleep(*delay).await;
            }
        }
    }

    #[async_trait::async_trait]
    impl Aggregator for MockAggregator {
        async fn total_sales(&self, product: &str) -> Result<f64> {
            self.wait(product).await;
            if self.fail_sales {
                return Err(AggregationError::ProcessingError {
                    message: "broken".to_string(),
                });
            }
            Ok(product.len() as f64)
        }

        async fn count_orders(&self, product: &str) -> Result<u64> {
            self.wait(product).await;
            Ok(1)
        }

        async fn order_details(&self, product: &str) -> Result<Vec<String>> {
            self.wait(product).await;
            if self.details_timeout {
                return Err(AggregationError::Timeout {
                    query: "order_details".to_string(),
                    product: product.to_string(),
                    timeout: Duration::from_millis(1),
                });
            }
            Ok(vec![format!("detail for {}", product)])
        }
    }

    fn products(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_run_with_sample_dataset() {
        let engine = ReportEngine::new(OrderPipeline::new(sample_orders()));
        let reports = engine.run(&sample_products()).await.unwrap();

        let totals: Vec<(String, f64, u64)> = reports
            .iter()
            .map(|r| (r.product.clone(), r.total_sales, r.order_count))
            .collect();
        assert_eq!(
            totals,
            vec![
                ("Product A".to_string(), 350.0, 3),
                ("Product B".to_string(), 90.0, 2),
                ("Product C".to_string(), 80.0, 2),
            ]
        );
        assert_eq!(reports[1].details.as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_results_follow_requested_order() {
        let aggregator = MockAggregator::new()
            .with_delay("first", Duration::from_millis(150))
            .with_delay("second", Duration::from_millis(10));
        let engine = ReportEngine::new(aggregator);

        let mut completion_order = Vec::new();
        let reports = engine
            .run_with(&products(&["first", "second"]), |report| {
                completion_order.push(report.product.clone())
            })
            .await
            .unwrap();

        assert_eq!(completion_order, vec!["second", "first"]);
        assert_eq!(reports[0].product, "first");
        assert_eq!(reports[1].product, "second");
    }

    #[tokio::test]
    async fn test_details_timeout_keeps_other_results() {
        let engine = ReportEngine::new(MockAggregator::new().with_details_timeout());
        let report = engine.report_for("Product A").await.unwrap();

        assert_eq!(report.total_sales, 9.0);
        assert_eq!(report.order_count, 1);
        assert!(report.details.is_none());
    }

    #[tokio::test]
    async fn test_non_timeout_errors_propagate() {
        let engine = ReportEngine::new(MockAggregator::new().with_failing_sales());
        let result = engine.run(&products(&["Product A"])).await;

        assert!(matches!(
            result,
            Err(AggregationError::ProcessingError { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_product_list() {
        let engine = ReportEngine::new(MockAggregator::new());
        let reports = engine.run(&[]).await.unwrap();

        assert!(reports.is_empty());
    }
}
