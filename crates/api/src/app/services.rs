//! Storage wiring and the transactional fruit operations.
//!
//! Every write runs in exactly one transaction: begin on entry, commit when the
//! operation succeeds, roll back on any error (not-found included).

use std::sync::Arc;

use fruitstand_core::{DomainError, Fruit, FruitDraft, FruitId};
use fruitstand_infra::{
    FruitStore, FruitTx, InMemoryFruitStore, PostgresFruitStore, StorageConfig, StoreError,
};

use crate::app::errors::ApiError;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppServices {
    fruits: Arc<dyn FruitStore>,
}

impl AppServices {
    pub fn new(store: impl FruitStore + 'static) -> Self {
        Self {
            fruits: Arc::new(store),
        }
    }

    /// Direct (non-transactional) access for reads.
    pub fn fruits(&self) -> &dyn FruitStore {
        self.fruits.as_ref()
    }

    pub async fn create_fruit(&self, draft: FruitDraft) -> Result<Fruit, ApiError> {
        let mut tx = self.fruits.begin().await?;
        let outcome = tx.insert(draft).await.map_err(ApiError::from);
        settle(tx, outcome).await
    }

    pub async fn update_fruit(&self, id: FruitId, changes: FruitDraft) -> Result<Fruit, ApiError> {
        let mut tx = self.fruits.begin().await?;
        let outcome: Result<Fruit, ApiError> = async {
            let mut fruit = tx.find(id).await?.ok_or(DomainError::not_found(id))?;
            fruit.apply(changes);
            tx.update(&fruit).await?;
            Ok(fruit)
        }
        .await;
        settle(tx, outcome).await
    }

    pub async fn delete_fruit(&self, id: FruitId) -> Result<(), ApiError> {
        let mut tx = self.fruits.begin().await?;
        let outcome: Result<(), ApiError> = async {
            if tx.find(id).await?.is_none() {
                return Err(DomainError::not_found(id).into());
            }
            tx.remove(id).await?;
            Ok(())
        }
        .await;
        settle(tx, outcome).await
    }
}

/// Commit on success, roll back on failure. The original error wins over a
/// failed rollback.
async fn settle<T>(tx: Box<dyn FruitTx>, outcome: Result<T, ApiError>) -> Result<T, ApiError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}

/// Pick and initialize the storage backend.
pub async fn build_services(storage: &StorageConfig) -> Result<AppServices, StoreError> {
    match storage {
        StorageConfig::InMemory => {
            tracing::warn!("DATABASE_URL not set; using in-memory fruit store");
            Ok(AppServices::new(InMemoryFruitStore::new()))
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PostgresFruitStore::connect(database_url, *max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!(max_connections, "connected to postgres fruit store");
            Ok(AppServices::new(store))
        }
    }
}
