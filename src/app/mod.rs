// Application wiring: builds the order service from loaded settings.

use crate::adapters::{InMemoryDatabase, SimulatedGateway};
use crate::config::TomlConfig;
use crate::core::{DiscountCalculator, OrderService};

pub type LocalOrderService = OrderService<InMemoryDatabase, SimulatedGateway>;

pub fn build_order_service(settings: &TomlConfig) -> LocalOrderService {
    let db = InMemoryDatabase::with_balances(settings.balances());
    let gateway = SimulatedGateway::new(settings.approval_limit(), settings.gateway_offline());
    let discount = DiscountCalculator::new(settings.discount_policy());

    tracing::debug!(
        "Built order service: {} account(s), discount {:?}, approval limit {:?}",
        settings.accounts.len(),
        discount.policy(),
        settings.approval_limit()
    );

    OrderService::with_discount(db, gateway, discount)
}
