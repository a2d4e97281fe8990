// Domain layer: order model, the fixed dataset and ports (interfaces).

pub mod dataset;
pub mod model;
pub mod ports;
