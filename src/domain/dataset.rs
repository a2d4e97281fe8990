use crate::domain::model::Order;

pub const SAMPLE_PRODUCTS: [&str; 3] = ["Product A", "Product B", "Product C"];

/// 示範用的固定訂單資料
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order::new("Product A", 2, 50.0),
        Order::new("Product B", 1, 30.0),
        Order::new("Product A", 1, 50.0),
        Order::new("Product C", 3, 20.0),
        Order::new("Product A", 4, 50.0),
        Order::new("Product B", 2, 30.0),
        Order::new("Product C", 1, 20.0),
    ]
}

pub fn sample_products() -> Vec<String> {
    SAMPLE_PRODUCTS.iter().map(|p| p.to_string()).collect()
}
