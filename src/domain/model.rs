use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRequest {
    pub user_id: UserId,
    pub amount: Decimal,
}

/// 成功下單後的結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub user_id: UserId,
    pub order_amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
    pub remaining_balance: Decimal,
}

impl OrderReceipt {
    pub fn message(&self) -> String {
        format!(
            "Order placed successfully! Final Amount: {:.2}",
            self.final_amount.round_dp(2)
        )
    }
}

impl fmt::Display for OrderReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
