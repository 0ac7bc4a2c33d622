use crate::config::toml_config::TomlConfig;
use crate::core::UserId;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "small-order")]
#[command(about = "Place an order against a user's balance")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with accounts, discount and gateway settings")]
    pub config: Option<String>,

    #[arg(long)]
    pub user_id: u64,

    #[arg(long, help = "Order amount before discount")]
    pub amount: Decimal,

    #[arg(long, help = "Starting balance for --user-id (overrides the config file)")]
    pub balance: Option<Decimal>,

    #[arg(long, help = "Print the receipt as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn user_id(&self) -> UserId {
        UserId(self.user_id)
    }

    /// 合併設定檔與命令列參數
    pub fn load_settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(balance) = self.balance {
            settings.upsert_account(self.user_id(), balance);
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        validation::validate_non_negative_amount("amount", self.amount)?;
        if let Some(balance) = self.balance {
            validation::validate_non_negative_amount("balance", balance)?;
        }
        Ok(())
    }
}
