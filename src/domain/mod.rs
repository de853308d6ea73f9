// Domain layer: form input, model features and results, and the model ports.

pub mod model;
pub mod ports;
