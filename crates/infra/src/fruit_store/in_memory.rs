use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use fruitstand_core::{Entity, Fruit, FruitDraft, FruitId};

use super::r#trait::{FruitStore, FruitTx, StoreError};

#[derive(Debug, Clone)]
struct FruitTable {
    rows: BTreeMap<FruitId, Fruit>,
    next_id: i32,
}

impl FruitTable {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, draft: FruitDraft) -> Result<Fruit, StoreError> {
        let id = FruitId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Database("fruit id sequence exhausted".to_string()))?;

        let fruit = Fruit::from_draft(id, draft);
        self.rows.insert(id, fruit.clone());
        Ok(fruit)
    }
}

/// In-memory fruit table.
///
/// Intended for tests/dev. Rows are returned in id order. A transaction holds
/// the table lock for its whole lifetime, so transactions are serialized.
/// Each transaction stages a full copy of the table, making every write O(n)
/// in the number of rows.
#[derive(Debug, Clone)]
pub struct InMemoryFruitStore {
    table: Arc<Mutex<FruitTable>>,
}

impl InMemoryFruitStore {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(FruitTable::new())),
        }
    }
}

impl Default for InMemoryFruitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FruitStore for InMemoryFruitStore {
    async fn list(&self) -> Result<Vec<Fruit>, StoreError> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find(&self, id: FruitId) -> Result<Option<Fruit>, StoreError> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn begin(&self) -> Result<Box<dyn FruitTx>, StoreError> {
        let guard = self.table.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryFruitTx { guard, staged }))
    }
}

/// Works on a staged copy; commit swaps it into the locked table.
struct InMemoryFruitTx {
    guard: OwnedMutexGuard<FruitTable>,
    staged: FruitTable,
}

#[async_trait]
impl FruitTx for InMemoryFruitTx {
    async fn find(&mut self, id: FruitId) -> Result<Option<Fruit>, StoreError> {
        Ok(self.staged.rows.get(&id).cloned())
    }

    async fn insert(&mut self, draft: FruitDraft) -> Result<Fruit, StoreError> {
        self.staged.insert(draft)
    }

    async fn update(&mut self, fruit: &Fruit) -> Result<(), StoreError> {
        match self.staged.rows.get_mut(&fruit.id()) {
            Some(row) => {
                *row = fruit.clone();
                Ok(())
            }
            None => Err(StoreError::missing_row(fruit.id(), "update")),
        }
    }

    async fn remove(&mut self, id: FruitId) -> Result<(), StoreError> {
        match self.staged.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::missing_row(id, "remove")),
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let InMemoryFruitTx { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
