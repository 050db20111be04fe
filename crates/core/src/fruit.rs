//! The `Fruit` entity and its validation rules.

use serde::Serialize;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult, ID_SET_ON_REQUEST, NAME_REQUIRED, STOCK_NOT_NEGATIVE};
use crate::id::FruitId;

/// A persisted fruit record.
///
/// Invariants (upheld by construction through [`FruitDraft`]):
/// - `name` is non-empty after trimming whitespace
/// - `stock` is `>= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fruit {
    id: FruitId,
    name: String,
    stock: i32,
}

impl Fruit {
    /// Materialize a stored record from a validated draft and its assigned id.
    pub fn from_draft(id: FruitId, draft: FruitDraft) -> Self {
        Self {
            id,
            name: draft.name,
            stock: draft.stock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }

    /// Overwrite name and stock in place. The id never changes.
    pub fn apply(&mut self, draft: FruitDraft) {
        self.name = draft.name;
        self.stock = draft.stock;
    }
}

impl Entity for Fruit {
    type Id = FruitId;

    fn id(&self) -> FruitId {
        self.id
    }
}

/// Validated `name` + `stock` pair, ready to be inserted or applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruitDraft {
    name: String,
    stock: i32,
}

impl FruitDraft {
    /// Validate raw fields in order: name first, then stock.
    ///
    /// The name is kept exactly as given; trimming only decides emptiness.
    pub fn validate(name: Option<String>, stock: Option<i32>) -> DomainResult<Self> {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(DomainError::validation(NAME_REQUIRED)),
        };

        let stock = match stock {
            Some(s) if s >= 0 => s,
            _ => return Err(DomainError::validation(STOCK_NOT_NEGATIVE)),
        };

        Ok(Self { name, stock })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }
}

/// Ids are server-assigned only; a create request must not carry one.
pub fn ensure_unassigned_id(id: Option<FruitId>) -> DomainResult<()> {
    match id {
        Some(_) => Err(DomainError::validation(ID_SET_ON_REQUEST)),
        None => Ok(()),
    }
}
