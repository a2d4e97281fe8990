use crate::config::validate_common;
use crate::core::pipeline::DEFAULT_QUERY_TIMEOUT;
use crate::core::{ConfigProvider, Order, OutputFormat};
use crate::domain::dataset::{sample_orders, sample_products};
use crate::utils::error::{AggregationError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// 未設定時使用內建的示範訂單
    pub orders: Option<Vec<Order>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    pub timeout_seconds: Option<u64>,
    pub simulated_latency_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub products: Option<Vec<String>>,
    pub format: Option<OutputFormat>,
    pub show_details: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AggregationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| AggregationError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.fill_defaults();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${ORDER_TIMEOUT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AggregationError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn fill_defaults(&mut self) {
        if self.report.products.is_none() {
            self.report.products = Some(sample_products());
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_common(self)
    }
}

impl ConfigProvider for TomlConfig {
    fn products(&self) -> &[String] {
        self.report.products.as_deref().unwrap_or(&[])
    }

    fn query_timeout(&self) -> Duration {
        self.query
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_QUERY_TIMEOUT)
    }

    fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.query.simulated_latency_ms.unwrap_or(0))
    }

    fn output_format(&self) -> OutputFormat {
        self.report.format.unwrap_or_default()
    }

    fn show_details(&self) -> bool {
        self.report.show_details.unwrap_or(false)
    }

    fn orders(&self) -> Vec<Order> {
        self.orders.clone().unwrap_or_else(sample_orders)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
