//! Infrastructure layer: fruit storage backends and configuration.

pub mod config;
pub mod fruit_store;

pub use config::{AppConfig, ConfigError, StorageConfig};
pub use fruit_store::{FruitStore, FruitTx, InMemoryFruitStore, PostgresFruitStore, StoreError};
