//! Adapters Layer
//!
//! Contains implementations of the driven ports and the bus-facing
//! driving adapter.
//!
//! ## Adapters
//!
//! - `LifecycleBusAdapter` - Subscribes to bus events and routes them
//!   through the request handler
//! - `InMemoryStore` - Document-store gateway with conditional-update
//!   semantics
//! - `SystemTimeSource` / `FixedTimeSource` - Clock implementations

pub mod bus_adapter;
pub mod memory_store;
pub mod time;

pub use bus_adapter::LifecycleBusAdapter;
pub use memory_store::InMemoryStore;
pub use time::{FixedTimeSource, SystemTimeSource};
