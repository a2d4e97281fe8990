//! Synchronous aggregation over an order slice: filter by exact product
//! name, then map and fold. These run on the worker pool via
//! [`OrderPipeline`](crate::core::pipeline::OrderPipeline).

use crate::domain::model::Order;

pub fn matching<'a>(
    orders: &'a [Order],
    product: &'a str,
) -> impl Iterator<Item = &'a Order> + 'a {
    orders.iter().filter(move |order| order.product == product)
}

pub fn sum_sales(orders: &[Order], product: &str) -> f64 {
    matching(orders, product)
        .map(Order::line_total)
        .fold(0.0, |total, sale| total + sale)
}

pub fn count_matching(orders: &[Order], product: &str) -> u64 {
    matching(orders, product).count() as u64
}

pub fn describe_orders(orders: &[Order], product: &str) -> Vec<String> {
    let lines: Vec<String> = matching(orders, product).map(Order::describe).collect();

    if lines.is_empty() {
        vec![no_orders_message(product)]
    } else {
        lines
    }
}

pub fn no_orders_message(product: &str) -> String {
    format!("No orders found for {}", product)
}
