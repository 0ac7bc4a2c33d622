use crate::domain::model::UserId;
use crate::domain::ports::PaymentGateway;
use crate::utils::error::BackendError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRecord {
    pub user_id: UserId,
    pub amount: Decimal,
}

/// Local stand-in for a real payment provider.
///
/// Charges above `approval_limit` are declined; an offline gateway fails every call.
#[derive(Debug, Default)]
pub struct SimulatedGateway {
    approval_limit: Option<Decimal>,
    offline: bool,
    charges: Mutex<Vec<ChargeRecord>>,
}

impl SimulatedGateway {
    pub fn new(approval_limit: Option<Decimal>, offline: bool) -> Self {
        Self {
            approval_limit,
            offline,
            charges: Mutex::new(Vec::new()),
        }
    }

    /// 目前已核准的扣款
    pub fn charges(&self) -> Vec<ChargeRecord> {
        self.charges
            .lock()
            .map(|charges| charges.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, user_id: UserId, amount: Decimal) -> Result<bool, BackendError> {
        if self.offline {
            tracing::debug!("Gateway offline, rejecting charge of {} for user {}", amount, user_id);
            return Err(BackendError::Unavailable {
                message: "payment gateway is offline".to_string(),
            });
        }

        if let Some(limit) = self.approval_limit {
            if amount > limit {
                tracing::debug!(
                    "Declined charge of {} for user {} (limit {})",
                    amount,
                    user_id,
                    limit
                );
                return Ok(false);
            }
        }

        let mut charges = self.charges.lock().map_err(|_| BackendError::Unavailable {
            message: "charge ledger poisoned".to_string(),
        })?;
        charges.push(ChargeRecord { user_id, amount });
        tracing::debug!("Approved charge of {} for user {}", amount, user_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_approves_within_limit() {
        let gateway = SimulatedGateway::new(Some(Decimal::from(100)), false);
        assert_eq!(gateway.charge(UserId(1), Decimal::from(100)).await, Ok(true));
        assert_eq!(
            gateway.charges(),
            vec![ChargeRecord {
                user_id: UserId(1),
                amount: Decimal::from(100)
            }]
        );
    }

    #[tokio::test]
    async fn test_declines_above_limit() {
        let gateway = SimulatedGateway::new(Some(Decimal::from(100)), false);
        assert_eq!(gateway.charge(UserId(1), Decimal::from(101)).await, Ok(false));
        assert!(gateway.charges().is_empty());
    }

    #[tokio::test]
    async fn test_offline_gateway_errors() {
        let gateway = SimulatedGateway::new(None, true);
        assert!(matches!(
            gateway.charge(UserId(1), Decimal::ONE).await,
            Err(BackendError::Unavailable { .. })
        ));
    }
}
