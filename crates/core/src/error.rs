//! Domain error model.

use thiserror::Error;

use crate::id::FruitId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Message for a missing or blank name.
pub const NAME_REQUIRED: &str = "The name is required!";

/// Message for a missing or negative stock.
pub const STOCK_NOT_NEGATIVE: &str = "The stock must be greater or equal to 0!";

/// Message for a create request that carries its own id.
pub const ID_SET_ON_REQUEST: &str = "Id was invalidly set on request.";

/// Message for a request body that cannot be decoded at all.
pub const INVALID_PAYLOAD: &str = "Invalid payload!";

/// Domain-level error.
///
/// Display strings are client-facing: they end up verbatim in the HTTP
/// error envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation.
    #[error("{0}")]
    Validation(String),

    /// An identifier could not be parsed. Carries the raw input.
    #[error("Fruit with id of {0} does not exist.")]
    InvalidId(String),

    /// No fruit is stored under this id.
    #[error("Fruit with id of {0} does not exist.")]
    NotFound(FruitId),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(raw: impl Into<String>) -> Self {
        Self::InvalidId(raw.into())
    }

    pub fn not_found(id: FruitId) -> Self {
        Self::NotFound(id)
    }
}
