use crate::domain::model::UserId;
use rust_decimal::Decimal;
use thiserror::Error;

/// 外部協作者 (資料庫 / 金流閘道) 回報的錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    #[error("backend unavailable: {message}")]
    Unavailable { message: String },
}

/// 下單流程的四種終止錯誤
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("failed to fetch user balance")]
    BalanceFetch {
        #[source]
        source: BackendError,
    },

    #[error("insufficient balance")]
    InsufficientFunds { balance: Decimal, required: Decimal },

    /// `source` is `None` when the gateway answered but declined the charge.
    #[error("payment failed")]
    PaymentFailed {
        #[source]
        source: Option<BackendError>,
    },

    /// The charge already went through; the stored balance was not decremented
    /// and no refund is issued.
    #[error("failed to update balance")]
    BalanceUpdate {
        #[source]
        source: BackendError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Backend,
    Validation,
    Payment,
    Consistency,
    Config,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依錯誤嚴重程度決定 CLI 結束碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl OrderError {
    /// True when the user was charged but the stored balance still has the old value.
    pub fn charged_without_balance_update(&self) -> bool {
        matches!(self, OrderError::BalanceUpdate { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            OrderError::BalanceFetch { .. } => ErrorCategory::Backend,
            OrderError::InsufficientFunds { .. } => ErrorCategory::Validation,
            OrderError::PaymentFailed { .. } => ErrorCategory::Payment,
            OrderError::BalanceUpdate { .. } => ErrorCategory::Consistency,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OrderError::InsufficientFunds { .. } => ErrorSeverity::High,
            OrderError::BalanceFetch { .. } | OrderError::PaymentFailed { .. } => {
                ErrorSeverity::Medium
            }
            OrderError::BalanceUpdate { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OrderError::BalanceFetch { .. } => {
                "Check that the user exists and the balance store is reachable"
            }
            OrderError::InsufficientFunds { .. } => {
                "Top up the account or place a smaller order"
            }
            OrderError::PaymentFailed { source: Some(_) } => {
                "The payment gateway could not be reached, try again later"
            }
            OrderError::PaymentFailed { source: None } => {
                "The payment gateway declined the charge, use a smaller amount"
            }
            OrderError::BalanceUpdate { .. } => {
                "The charge succeeded but the balance was not updated, reconcile the account manually"
            }
        }
    }
}

/// Errors of the outer surface: configuration, IO and the order flow itself.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Order failed: {0}")]
    Order(#[from] OrderError),
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::IoError(_) => ErrorCategory::Io,
            AppError::SerializationError(_)
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            AppError::Order(e) => e.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::IoError(_) => ErrorSeverity::Critical,
            AppError::SerializationError(_) => ErrorSeverity::High,
            AppError::ConfigValidationError { .. } | AppError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            AppError::Order(e) => e.severity(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::IoError(_) => "Check the file path and its permissions".to_string(),
            AppError::SerializationError(_) => {
                "Run again without --json to get the plain confirmation".to_string()
            }
            AppError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' section of the configuration file", field)
            }
            AppError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            AppError::Order(e) => e.recovery_suggestion().to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.severity().exit_code()
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Order(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
