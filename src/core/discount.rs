use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 金額嚴格大於 `threshold` 時，折扣為 `amount * rate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            threshold: Decimal::ONE_HUNDRED,
            // 10%
            rate: Decimal::new(10, 2),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiscountCalculator {
    policy: DiscountPolicy,
}

impl DiscountCalculator {
    /// The rate is clamped into `[0, 1]`, so a discount never exceeds the amount.
    pub fn new(policy: DiscountPolicy) -> Self {
        Self {
            policy: DiscountPolicy {
                threshold: policy.threshold,
                rate: policy.rate.clamp(Decimal::ZERO, Decimal::ONE),
            },
        }
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    pub fn calculate_discount(&self, amount: Decimal) -> Decimal {
        if amount > self.policy.threshold {
            amount.checked_mul(self.policy.rate).unwrap_or(amount)
        } else {
            Decimal::ZERO
        }
    }
}
