use async_trait::async_trait;
use rust_decimal::Decimal;
use small_order::core::{Database, PaymentGateway};
use small_order::{BackendError, OrderError, OrderService, UserId};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    GetBalance(UserId),
    SetBalance(UserId, Decimal),
    Charge(UserId, Decimal),
}

type CallLog = Arc<Mutex<Vec<Call>>>;

struct RecordingDatabase {
    balance: Result<Decimal, BackendError>,
    fail_writes: bool,
    calls: CallLog,
}

#[async_trait]
impl Database for RecordingDatabase {
    async fn get_balance(&self, user_id: UserId) -> Result<Decimal, BackendError> {
        self.calls.lock().unwrap().push(Call::GetBalance(user_id));
        self.balance.clone()
    }

    async fn set_balance(&self, user_id: UserId, new_balance: Decimal) -> Result<(), BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::SetBalance(user_id, new_balance));
        if self.fail_writes {
            return Err(BackendError::Unavailable {
                message: "write rejected".to_string(),
            });
        }
        Ok(())
    }
}

struct RecordingGateway {
    outcome: Result<bool, BackendError>,
    calls: CallLog,
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn charge(&self, user_id: UserId, amount: Decimal) -> Result<bool, BackendError> {
        self.calls.lock().unwrap().push(Call::Charge(user_id, amount));
        self.outcome.clone()
    }
}

struct Fixture {
    balance: Result<Decimal, BackendError>,
    fail_writes: bool,
    charge: Result<bool, BackendError>,
}

impl Fixture {
    fn with_balance(balance: &str) -> Self {
        Self {
            balance: Ok(dec(balance)),
            fail_writes: false,
            charge: Ok(true),
        }
    }

    fn build(self) -> (OrderService<RecordingDatabase, RecordingGateway>, CallLog) {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let db = RecordingDatabase {
            balance: self.balance,
            fail_writes: self.fail_writes,
            calls: calls.clone(),
        };
        let gateway = RecordingGateway {
            outcome: self.charge,
            calls: calls.clone(),
        };
        (OrderService::new(db, gateway), calls)
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn calls_of(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap().clone()
}

const USER: UserId = UserId(1);

#[tokio::test]
async fn test_small_order_without_discount() {
    let (service, calls) = Fixture::with_balance("50").build();

    let receipt = service.place_order(USER, dec("30")).await.unwrap();

    assert_eq!(receipt.discount, Decimal::ZERO);
    assert_eq!(receipt.final_amount, dec("30"));
    assert_eq!(receipt.remaining_balance, dec("20"));
    assert_eq!(
        receipt.message(),
        "Order placed successfully! Final Amount: 30.00"
    );
    assert_eq!(
        calls_of(&calls),
        vec![
            Call::GetBalance(USER),
            Call::Charge(USER, dec("30")),
            Call::SetBalance(USER, dec("20")),
        ]
    );
}

#[tokio::test]
async fn test_insufficient_balance_never_charges() {
    let (service, calls) = Fixture::with_balance("50").build();

    let err = service.place_order(USER, dec("60")).await.unwrap_err();

    match err {
        OrderError::InsufficientFunds { balance, required } => {
            assert_eq!(balance, dec("50"));
            assert_eq!(required, dec("60"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(calls_of(&calls), vec![Call::GetBalance(USER)]);
}

#[tokio::test]
async fn test_large_order_gets_ten_percent_off() {
    let (service, calls) = Fixture::with_balance("200").build();

    let receipt = service.place_order(USER, dec("150")).await.unwrap();

    assert_eq!(receipt.discount, dec("15"));
    assert_eq!(receipt.final_amount, dec("135"));
    assert_eq!(receipt.remaining_balance, dec("65"));
    assert!(receipt.message().ends_with("Final Amount: 135.00"));
    assert_eq!(
        calls_of(&calls),
        vec![
            Call::GetBalance(USER),
            Call::Charge(USER, dec("135")),
            Call::SetBalance(USER, dec("65")),
        ]
    );
}

#[tokio::test]
async fn test_discount_makes_order_affordable() {
    // 110 - 11 = 99 fits a balance of 100
    let (service, _calls) = Fixture::with_balance("100").build();

    let receipt = service.place_order(USER, dec("110")).await.unwrap();

    assert_eq!(receipt.final_amount, dec("99"));
    assert_eq!(receipt.remaining_balance, dec("1"));
}

#[tokio::test]
async fn test_exact_balance_is_sufficient() {
    let (service, _calls) = Fixture::with_balance("100").build();

    let receipt = service.place_order(USER, dec("100")).await.unwrap();

    assert_eq!(receipt.discount, Decimal::ZERO);
    assert_eq!(receipt.remaining_balance, Decimal::ZERO);
    assert!(receipt.message().ends_with("Final Amount: 100.00"));
}

#[tokio::test]
async fn test_balance_fetch_failure_stops_everything() {
    let (service, calls) = Fixture {
        balance: Err(BackendError::UnknownUser(USER)),
        fail_writes: false,
        charge: Ok(true),
    }
    .build();

    let err = service.place_order(USER, dec("30")).await.unwrap_err();

    assert!(matches!(
        err,
        OrderError::BalanceFetch {
            source: BackendError::UnknownUser(UserId(1))
        }
    ));
    assert_eq!(err.to_string(), "failed to fetch user balance");
    assert_eq!(calls_of(&calls), vec![Call::GetBalance(USER)]);
}

#[tokio::test]
async fn test_declined_charge_leaves_balance_alone() {
    let (service, calls) = Fixture {
        charge: Ok(false),
        ..Fixture::with_balance("50")
    }
    .build();

    let err = service.place_order(USER, dec("30")).await.unwrap_err();

    assert!(matches!(err, OrderError::PaymentFailed { source: None }));
    assert_eq!(err.to_string(), "payment failed");
    assert_eq!(
        calls_of(&calls),
        vec![Call::GetBalance(USER), Call::Charge(USER, dec("30"))]
    );
}

#[tokio::test]
async fn test_gateway_error_leaves_balance_alone() {
    let (service, calls) = Fixture {
        charge: Err(BackendError::Unavailable {
            message: "timeout".to_string(),
        }),
        ..Fixture::with_balance("50")
    }
    .build();

    let err = service.place_order(USER, dec("30")).await.unwrap_err();

    assert!(matches!(err, OrderError::PaymentFailed { source: Some(_) }));
    assert!(!calls_of(&calls)
        .iter()
        .any(|c| matches!(c, Call::SetBalance(..))));
}

#[tokio::test]
async fn test_failed_balance_update_after_charge_is_not_compensated() {
    let (service, calls) = Fixture {
        fail_writes: true,
        ..Fixture::with_balance("200")
    }
    .build();

    let err = service.place_order(USER, dec("150")).await.unwrap_err();

    assert!(matches!(err, OrderError::BalanceUpdate { .. }));
    assert_eq!(err.to_string(), "failed to update balance");
    // exactly one charge went out and nothing tried to reverse it
    assert_eq!(
        calls_of(&calls),
        vec![
            Call::GetBalance(USER),
            Call::Charge(USER, dec("135")),
            Call::SetBalance(USER, dec("65")),
        ]
    );
}
