use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Query '{query}' for {product} did not complete within {timeout:?}")]
    Timeout {
        query: String,
        product: String,
        timeout: Duration,
    },

    #[error("Worker task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Timeout,
    Execution,
    Io,
    Output,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AggregationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::TaskError(_) => ErrorCategory::Execution,
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorCategory::Output,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 逾時只影響單一查詢
            ErrorCategory::Timeout => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing | ErrorCategory::Output => {
                ErrorSeverity::High
            }
            ErrorCategory::Execution | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::Timeout { timeout, .. } => format!(
                "Increase the query timeout (currently {:?}) or lower the simulated latency",
                timeout
            ),
            Self::TaskError(_) => {
                "A worker task panicked; rerun with --verbose to see the cause".to_string()
            }
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Try a different output format with --format".to_string()
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting and try again", field)
            }
            Self::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            Self::ProcessingError { .. } => {
                "Check the order dataset for invalid records".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Timeout { query, product, .. } => {
                format!("The {} query for {} took too long", query, product)
            }
            Self::TaskError(_) => "Order processing stopped unexpectedly".to_string(),
            Self::IoError(e) => format!("Could not access a file: {}", e),
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Could not render the report".to_string()
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            Self::ProcessingError { message } => format!("Could not process orders: {}", message),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, AggregationError>;
