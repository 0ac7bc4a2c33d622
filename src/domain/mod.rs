// Domain layer: core models and ports (interfaces). No external dependencies beyond std/serde/decimal.

pub mod model;
pub mod ports;
