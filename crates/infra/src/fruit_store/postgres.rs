//! Postgres-backed fruit store.
//!
//! ## Schema
//!
//! A single `fruit` table with a `SERIAL` primary key. [`PostgresFruitStore::ensure_schema`]
//! creates it when missing; there is no migration machinery.
//!
//! ## Error Mapping
//!
//! Every SQLx failure becomes a [`StoreError`]:
//!
//! | SQLx Error | StoreError | Message |
//! |------------|------------|---------|
//! | Database | `Database` | the server's error message, verbatim |
//! | PoolClosed / PoolTimedOut | `Unavailable` | SQLx's description |
//! | Other | `Database` | SQLx's description |
//!
//! An `UPDATE` or `DELETE` that touches no row (the row vanished under a
//! concurrent transaction after `find`) is a `Database` error as well, with the
//! same message the in-memory store uses.
//!
//! ## Thread Safety
//!
//! `PostgresFruitStore` is `Send + Sync`; the SQLx pool handles connection sharing.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use fruitstand_core::{Entity, Fruit, FruitDraft, FruitId};

use super::r#trait::{FruitStore, FruitTx, StoreError};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS fruit (
        id SERIAL PRIMARY KEY,
        name VARCHAR(40) NOT NULL,
        stock INTEGER NOT NULL CHECK (stock >= 0)
    )
"#;

/// Postgres fruit table.
#[derive(Debug, Clone)]
pub struct PostgresFruitStore {
    pool: PgPool,
}

impl PostgresFruitStore {
    /// Create a new store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a fresh pool to `database_url`.
    #[instrument(skip(database_url), err)]
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `fruit` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl FruitStore for PostgresFruitStore {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Fruit>, StoreError> {
        let rows = sqlx::query("SELECT id, name, stock FROM fruit ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_fruits", e))?;

        rows.iter().map(fruit_from_row).collect()
    }

    #[instrument(skip(self), fields(fruit_id = %id), err)]
    async fn find(&self, id: FruitId) -> Result<Option<Fruit>, StoreError> {
        let row = sqlx::query("SELECT id, name, stock FROM fruit WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_fruit", e))?;

        row.as_ref().map(fruit_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn begin(&self) -> Result<Box<dyn FruitTx>, StoreError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;
        Ok(Box::new(PostgresFruitTx { tx }))
    }
}

/// Open Postgres transaction. SQLx rolls it back on drop if not committed.
struct PostgresFruitTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl FruitTx for PostgresFruitTx {
    #[instrument(skip(self), fields(fruit_id = %id), err)]
    async fn find(&mut self, id: FruitId) -> Result<Option<Fruit>, StoreError> {
        let row = sqlx::query("SELECT id, name, stock FROM fruit WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("find_fruit", e))?;

        row.as_ref().map(fruit_from_row).transpose()
    }

    #[instrument(skip(self, draft), err)]
    async fn insert(&mut self, draft: FruitDraft) -> Result<Fruit, StoreError> {
        let row = sqlx::query("INSERT INTO fruit (name, stock) VALUES ($1, $2) RETURNING id, name, stock")
            .bind(draft.name())
            .bind(draft.stock())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("insert_fruit", e))?;

        fruit_from_row(&row)
    }

    #[instrument(skip(self, fruit), fields(fruit_id = %fruit.id()), err)]
    async fn update(&mut self, fruit: &Fruit) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE fruit SET name = $2, stock = $3 WHERE id = $1")
            .bind(fruit.id().get())
            .bind(fruit.name())
            .bind(fruit.stock())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("update_fruit", e))?;

        expect_row_affected(result.rows_affected(), fruit.id(), "update")
    }

    #[instrument(skip(self), fields(fruit_id = %id), err)]
    async fn remove(&mut self, id: FruitId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM fruit WHERE id = $1")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("delete_fruit", e))?;

        expect_row_affected(result.rows_affected(), id, "remove")
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let PostgresFruitTx { tx } = *self;
        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        let PostgresFruitTx { tx } = *self;
        tx.rollback()
            .await
            .map_err(|e| map_sqlx_error("rollback", e))
    }
}

fn expect_row_affected(rows: u64, id: FruitId, action: &str) -> Result<(), StoreError> {
    if rows == 0 {
        tracing::warn!(fruit_id = %id, action, "statement affected no row");
        return Err(StoreError::missing_row(id, action));
    }
    Ok(())
}

fn fruit_from_row(row: &PgRow) -> Result<Fruit, StoreError> {
    let id: i32 = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("decode_fruit", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| map_sqlx_error("decode_fruit", e))?;
    let stock: i32 = row
        .try_get("stock")
        .map_err(|e| map_sqlx_error("decode_fruit", e))?;

    // Rows written by other tools may violate the domain rules; surface that as
    // a storage fault rather than a client error.
    let draft = FruitDraft::validate(Some(name), Some(stock))
        .map_err(|e| StoreError::Database(format!("fruit {id} violates domain rules: {e}")))?;
    Ok(Fruit::from_draft(FruitId::new(id), draft))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            tracing::warn!(operation, code = ?db_err.code(), "database error: {}", db_err.message());
            StoreError::Database(db_err.message().to_string())
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            tracing::warn!(operation, "connection pool unavailable: {err}");
            StoreError::Unavailable(err.to_string())
        }
        other => {
            tracing::warn!(operation, "sqlx error: {other}");
            StoreError::Database(other.to_string())
        }
    }
}
