use crate::core::{OutputFormat, ProductReport};
use crate::domain::model::format_decimal;
use crate::utils::error::{AggregationError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    generated_at: DateTime<Utc>,
    reports: &'a [ProductReport],
}

pub fn total_line(report: &ProductReport) -> String {
    format!(
        "Total sales for {}: {}",
        report.product,
        format_decimal(report.total_sales)
    )
}

pub fn render_text(report: &ProductReport, show_details: bool) -> Vec<String> {
    let mut lines = vec![total_line(report)];
    if !show_details {
        return lines;
    }

    lines.push(format!(
        "Order count for {}: {}",
        report.product, report.order_count
    ));
    match &report.details {
        Some(details) => lines.extend(details.iter().map(|d| format!("  {}", d))),
        None => lines.push(format!("  Order details for {} unavailable", report.product)),
    }
    lines
}

pub fn render_json(reports: &[ProductReport]) -> Result<String> {
    let document = ReportDocument {
        generated_at: Utc::now(),
        reports,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn render_csv(reports: &[ProductReport]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["product", "total_sales", "order_count"])?;

    for report in reports {
        writer.write_record([
            report.product.clone(),
            format_decimal(report.total_sales),
            report.order_count.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AggregationError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AggregationError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// Renders every report in one go. Text output here is the non-streaming
/// form; the binary prints text lines as reports complete.
pub fn render(
    reports: &[ProductReport],
    format: OutputFormat,
    show_details: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(reports
            .iter()
            .flat_map(|r| render_text(r, show_details))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => render_json(reports),
        OutputFormat::Csv => render_csv(reports),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(product: &str, total: f64, count: u64, details: Option<Vec<&str>>) -> ProductReport {
        ProductReport {
            product: product.to_string(),
            total_sales: total,
            order_count: count,
            details: details.map(|d| d.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_total_line_format() {
        let r = report("Product A", 350.0, 3, None);
        assert_eq!(total_line(&r), "Total sales for Product A: 350.0");
    }

    #[test]
    fn test_large_totals_use_exponent_form() {
        let r = report("Product A", 2.5e7, 1, None);
        assert_eq!(total_line(&r), "Total sales for Product A: 2.5E7");

        let csv_output = render_csv(&[r]).unwrap();
        assert_eq!(csv_output.lines().nth(1), Some("Product A,2.5E7,1"));
    }

    #[test]
    fn test_render_text_with_details() {
        let r = report(
            "Product B",
            90.0,
            2,
            Some(vec![
                "Product: Product B, Quantity: 1, Price: 30.0",
                "Product: Product B, Quantity: 2, Price: 30.0",
            ]),
        );

        let lines = render_text(&r, true);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Order count for Product B: 2");
        assert!(lines[2].starts_with("  Product: Product B"));

        assert_eq!(render_text(&r, false), vec!["Total sales for Product B: 90.0"]);
    }

    #[test]
    fn test_render_text_missing_details() {
        let r = report("Product C", 0.0, 0, None);
        let lines = render_text(&r, true);

        assert_eq!(lines.last().unwrap(), "  Order details for Product C unavailable");
    }

    #[test]
    fn test_render_csv() {
        let reports = vec![
            report("Product A", 350.0, 3, None),
            report("Product B", 90.0, 2, None),
        ];

        let csv_output = render_csv(&reports).unwrap();
        let lines: Vec<&str> = csv_output.lines().collect();
        assert_eq!(lines[0], "product,total_sales,order_count");
        assert_eq!(lines[1], "Product A,350.0,3");
        assert_eq!(lines[2], "Product B,90.0,2");
    }

    #[test]
    fn test_render_json() {
        let reports = vec![report("Product A", 350.0, 3, Some(vec!["detail"]))];

        let json_output = render(&reports, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json_output).unwrap();

        assert!(value["generated_at"].is_string());
        assert_eq!(value["reports"][0]["product"], "Product A");
        assert_eq!(value["reports"][0]["total_sales"], 350.0);
        assert_eq!(value["reports"][0]["order_count"], 3);
        assert_eq!(value["reports"][0]["details"][0], "detail");
    }

    #[test]
    fn test_render_text_joins_reports() {
        let reports = vec![
            report("Product A", 350.0, 3, None),
            report("Product C", 80.0, 2, None),
        ];

        assert_eq!(
            render(&reports, OutputFormat::Text, false).unwrap(),
            "Total sales for Product A: 350.0\nTotal sales for Product C: 80.0"
        );
    }
}
