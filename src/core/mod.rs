pub mod discount;
pub mod order_service;

pub use crate::domain::model::{OrderReceipt, OrderRequest, UserId};
pub use crate::domain::ports::{Database, PaymentGateway};
pub use crate::utils::error::{BackendError, OrderError};
pub use discount::{DiscountCalculator, DiscountPolicy};
pub use order_service::OrderService;
