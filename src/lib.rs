pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{InMemoryDatabase, SimulatedGateway};
pub use app::{build_order_service, LocalOrderService};
pub use config::TomlConfig;
pub use crate::core::{
    DiscountCalculator, DiscountPolicy, OrderReceipt, OrderRequest, OrderService, UserId,
};
pub use utils::error::{AppError, BackendError, OrderError, Result};
