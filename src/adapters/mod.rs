// Adapters layer: concrete implementations of the domain ports.

pub mod memory_db;
pub mod payment;

pub use memory_db::InMemoryDatabase;
pub use payment::{ChargeRecord, SimulatedGateway};
