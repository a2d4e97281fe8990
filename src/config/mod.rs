pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

#[cfg(feature = "cli")]
use crate::core::{Order, OutputFormat};
#[cfg(feature = "cli")]
use crate::domain::dataset::{sample_orders, sample_products};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use std::time::Duration;

pub const MAX_SIMULATED_LATENCY_MS: u64 = 60_000;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "order-report")]
#[command(about = "Aggregate sales, counts and details per product from the sample orders")]
pub struct CliConfig {
    /// Products to report on
    #[arg(long = "product", value_delimiter = ',', default_values_t = sample_products())]
    pub products: Vec<String>,

    /// Per-query timeout in seconds
    #[arg(long, default_value = "5")]
    pub timeout_secs: u64,

    /// Artificial delay each query spends on its worker
    #[arg(long, default_value = "0")]
    pub simulated_latency_ms: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Include order counts and order details")]
    pub details: bool,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn products(&self) -> &[String] {
        &self.products
    }

    fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn show_details(&self) -> bool {
        self.details
    }

    fn orders(&self) -> Vec<Order> {
        sample_orders()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_common(self)
    }
}

/// Checks shared by every config source.
pub fn validate_common<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_positive_number("timeout_seconds", config.query_timeout().as_secs(), 1)?;
    validation::validate_range(
        "simulated_latency_ms",
        config.simulated_latency().as_millis() as u64,
        0,
        MAX_SIMULATED_LATENCY_MS,
    )?;
    validation::validate_products("products", config.products())?;
    validation::validate_orders("orders", &config.orders())?;
    Ok(())
}
