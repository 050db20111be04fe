//! `fruitstand-core` — domain building blocks for the fruit inventory.
//!
//! This crate contains **pure domain** types and rules (no IO, no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod fruit;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use fruit::{ensure_unassigned_id, Fruit, FruitDraft};
pub use id::FruitId;
