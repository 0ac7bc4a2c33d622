use crate::domain::model::UserId;
use crate::utils::error::BackendError;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Balance store. Owns every user's balance; any locking it needs is its own business.
#[async_trait]
pub trait Database: Send + Sync {
    async fn get_balance(&self, user_id: UserId) -> Result<Decimal, BackendError>;
    async fn set_balance(&self, user_id: UserId, new_balance: Decimal) -> Result<(), BackendError>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `Ok(false)` means the gateway answered and declined.
    async fn charge(&self, user_id: UserId, amount: Decimal) -> Result<bool, BackendError>;
}
