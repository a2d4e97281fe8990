use crate::domain::model::Order;
use crate::utils::error::{AggregationError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(AggregationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AggregationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AggregationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_products(field_name: &str, products: &[String]) -> Result<()> {
    if products.is_empty() {
        return Err(AggregationError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for product in products {
        validate_non_empty_string(field_name, product)?;
    }
    Ok(())
}

pub fn validate_orders(field_name: &str, orders: &[Order]) -> Result<()> {
    for (index, order) in orders.iter().enumerate() {
        let field = format!("{}[{}]", field_name, index);
        validate_non_empty_string(&format!("{}.product", field), &order.product)?;

        if !order.unit_price.is_finite() || order.unit_price < 0.0 {
            return Err(AggregationError::InvalidConfigValueError {
                field: format!("{}.unit_price", field),
                value: order.unit_price.to_string(),
                reason: "Price must be a finite, non-negative number".to_string(),
            });
        }
    }
    Ok(())
}
