use crate::core::discount::DiscountCalculator;
use crate::domain::model::{OrderReceipt, UserId};
use crate::domain::ports::{Database, PaymentGateway};
use crate::utils::error::OrderError;
use rust_decimal::Decimal;

/// 下單流程：讀取餘額 → 計算折扣 → 檢查餘額 → 扣款 → 寫回餘額
///
/// Each step short-circuits on failure. Nothing is rolled back: if the final
/// balance write fails the charge stands and the caller gets
/// [`OrderError::BalanceUpdate`].
pub struct OrderService<D: Database, G: PaymentGateway> {
    db: D,
    gateway: G,
    discount: DiscountCalculator,
}

impl<D: Database, G: PaymentGateway> OrderService<D, G> {
    pub fn new(db: D, gateway: G) -> Self {
        Self::with_discount(db, gateway, DiscountCalculator::default())
    }

    pub fn with_discount(db: D, gateway: G, discount: DiscountCalculator) -> Self {
        Self {
            db,
            gateway,
            discount,
        }
    }

    pub fn database(&self) -> &D {
        &self.db
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn place_order(
        &self,
        user_id: UserId,
        order_amount: Decimal,
    ) -> Result<OrderReceipt, OrderError> {
        let balance = self
            .db
            .get_balance(user_id)
            .await
            .map_err(|source| OrderError::BalanceFetch { source })?;

        let discount = self.discount.calculate_discount(order_amount);
        let final_amount = order_amount - discount;

        if balance < final_amount {
            return Err(OrderError::InsufficientFunds {
                balance,
                required: final_amount,
            });
        }

        match self.gateway.charge(user_id, final_amount).await {
            Ok(true) => {}
            Ok(false) => return Err(OrderError::PaymentFailed { source: None }),
            Err(source) => {
                return Err(OrderError::PaymentFailed {
                    source: Some(source),
                })
            }
        }

        // TODO: refund through the gateway once it exposes a refund call; until
        // then a failed write here leaves the user charged at the old balance.
        let remaining_balance = balance - final_amount;
        self.db
            .set_balance(user_id, remaining_balance)
            .await
            .map_err(|source| OrderError::BalanceUpdate { source })?;

        Ok(OrderReceipt {
            user_id,
            order_amount,
            discount,
            final_amount,
            remaining_balance,
        })
    }
}
