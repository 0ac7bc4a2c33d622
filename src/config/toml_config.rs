use crate::core::{DiscountPolicy, UserId};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub discount: Option<DiscountConfig>,
    pub gateway: Option<GatewayConfig>,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountConfig {
    pub threshold: Option<Decimal>,
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub approval_limit: Option<Decimal>,
    pub offline: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl LoggingConfig {
    pub fn json_enabled(&self) -> bool {
        self.json.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub user_id: UserId,
    pub balance: Decimal,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${START_BALANCE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let policy = self.discount_policy();
        validation::validate_non_negative_amount("discount.threshold", policy.threshold)?;
        validation::validate_range("discount.rate", policy.rate, Decimal::ZERO, Decimal::ONE)?;

        if let Some(limit) = self.approval_limit() {
            validation::validate_non_negative_amount("gateway.approval_limit", limit)?;
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validation::validate_non_empty_string("logging.level", level)?;
        }

        for account in &self.accounts {
            validation::validate_non_negative_amount(
                &format!("accounts[{}].balance", account.user_id),
                account.balance,
            )?;
        }
        validation::validate_unique("accounts.user_id", self.accounts.iter().map(|a| a.user_id))?;

        Ok(())
    }

    /// 折扣規則，未設定的欄位使用預設值 (超過 100 打九折)
    pub fn discount_policy(&self) -> DiscountPolicy {
        let default = DiscountPolicy::default();
        match &self.discount {
            Some(d) => DiscountPolicy {
                threshold: d.threshold.unwrap_or(default.threshold),
                rate: d.rate.unwrap_or(default.rate),
            },
            None => default,
        }
    }

    pub fn approval_limit(&self) -> Option<Decimal> {
        self.gateway.as_ref().and_then(|g| g.approval_limit)
    }

    pub fn gateway_offline(&self) -> bool {
        self.gateway
            .as_ref()
            .and_then(|g| g.offline)
            .unwrap_or(false)
    }

    pub fn balances(&self) -> Vec<(UserId, Decimal)> {
        self.accounts
            .iter()
            .map(|a| (a.user_id, a.balance))
            .collect()
    }

    /// 設定 (或覆寫) 某個使用者的起始餘額
    pub fn upsert_account(&mut self, user_id: UserId, balance: Decimal) {
        match self.accounts.iter_mut().find(|a| a.user_id == user_id) {
            Some(account) => account.balance = balance,
            None => self.accounts.push(AccountConfig { user_id, balance }),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
