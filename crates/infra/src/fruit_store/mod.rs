//! Transactional fruit table boundary.
//!
//! The HTTP layer only ever sees [`FruitStore`] (a session factory) and
//! [`FruitTx`] (one open transaction). Backends decide how atomicity is
//! achieved.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryFruitStore;
pub use postgres::PostgresFruitStore;
pub use r#trait::{FruitStore, FruitTx, StoreError};
