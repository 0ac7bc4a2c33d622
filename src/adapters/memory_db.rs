use crate::domain::model::UserId;
use crate::domain::ports::Database;
use crate::utils::error::BackendError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    balances: RwLock<HashMap<UserId, Decimal>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = (UserId, Decimal)>,
    {
        Self {
            balances: RwLock::new(balances.into_iter().collect()),
        }
    }

    pub async fn balance_of(&self, user_id: UserId) -> Option<Decimal> {
        self.balances.read().await.get(&user_id).copied()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn get_balance(&self, user_id: UserId) -> Result<Decimal, BackendError> {
        let balances = self.balances.read().await;
        match balances.get(&user_id) {
            Some(balance) => {
                tracing::debug!("Read balance for user {}: {}", user_id, balance);
                Ok(*balance)
            }
            None => {
                tracing::debug!("No balance stored for user {}", user_id);
                Err(BackendError::UnknownUser(user_id))
            }
        }
    }

    async fn set_balance(&self, user_id: UserId, new_balance: Decimal) -> Result<(), BackendError> {
        let mut balances = self.balances.write().await;
        tracing::debug!("Writing balance for user {}: {}", user_id, new_balance);
        balances.insert(user_id, new_balance);
        Ok(())
    }
}
