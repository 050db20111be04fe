use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use fruitstand_core::{Fruit, FruitDraft, FruitId};

/// Fruit storage operation error.
///
/// These are **infrastructure errors**. Validation and not-found outcomes are
/// domain concerns and never show up here.
///
/// The display string is the underlying failure message, passed through
/// verbatim so callers can surface it to clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The database rejected or failed a statement.
    #[error("{0}")]
    Database(String),

    /// The backend cannot serve requests (closed or exhausted pool).
    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    /// A write addressed a row that is not (or no longer) there.
    pub(crate) fn missing_row(id: FruitId, action: &str) -> Self {
        Self::Database(format!("no row with id {id} to {action}"))
    }
}

/// Storage-session factory for the fruit table.
///
/// Plain reads go straight through the store. Writes open a [`FruitTx`]
/// with [`FruitStore::begin`] and must end it with `commit` or `rollback`.
#[async_trait]
pub trait FruitStore: Send + Sync {
    /// All stored fruits, in backend-defined order.
    async fn list(&self) -> Result<Vec<Fruit>, StoreError>;

    /// Look up a single fruit outside of any transaction.
    async fn find(&self, id: FruitId) -> Result<Option<Fruit>, StoreError>;

    /// Open a new transaction.
    async fn begin(&self) -> Result<Box<dyn FruitTx>, StoreError>;
}

/// One open transaction over the fruit table.
///
/// Changes become visible to other sessions only after [`FruitTx::commit`].
/// Dropping a transaction without committing discards its changes.
#[async_trait]
pub trait FruitTx: Send {
    async fn find(&mut self, id: FruitId) -> Result<Option<Fruit>, StoreError>;

    /// Insert a new row; storage assigns the id.
    async fn insert(&mut self, draft: FruitDraft) -> Result<Fruit, StoreError>;

    /// Overwrite name and stock of an existing row (last writer wins).
    async fn update(&mut self, fruit: &Fruit) -> Result<(), StoreError>;

    async fn remove(&mut self, id: FruitId) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> FruitStore for Arc<S>
where
    S: FruitStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Fruit>, StoreError> {
        (**self).list().await
    }

    async fn find(&self, id: FruitId) -> Result<Option<Fruit>, StoreError> {
        (**self).find(id).await
    }

    async fn begin(&self) -> Result<Box<dyn FruitTx>, StoreError> {
        (**self).begin().await
    }
}
