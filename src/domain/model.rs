use serde::{Deserialize, Serialize};

/// A single purchase line item. Orders are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl Order {
    pub fn new(product: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            product: product.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    /// `Product: <product>, Quantity: <quantity>, Price: <price>`
    pub fn describe(&self) -> String {
        format!(
            "Product: {}, Quantity: {}, Price: {}",
            self.product,
            self.quantity,
            format_decimal(self.unit_price)
        )
    }
}

/// Decimal rendering used in every report: plain notation with at least one
/// fractional digit inside `[1e-3, 1e7)`, `<mantissa>E<exponent>` outside it.
pub fn format_decimal(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-3..1e7).contains(&magnitude) {
        return format!("{:?}", value);
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReport {
    pub product: String,
    pub total_sales: f64,
    pub order_count: u64,
    /// `None` when the detail query failed.
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}
