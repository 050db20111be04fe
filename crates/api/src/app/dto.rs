use axum::http::{header, HeaderMap};
use serde::Deserialize;

use fruitstand_core::{ensure_unassigned_id, DomainResult, FruitDraft, FruitId};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// Raw fruit body as sent by clients. Every field may be absent or `null`.
#[derive(Debug, Deserialize)]
pub struct FruitPayload {
    pub id: Option<FruitId>,
    pub name: Option<String>,
    pub stock: Option<i32>,
}

impl FruitPayload {
    /// Decode a create/update body.
    ///
    /// Anything that does not yield a JSON object (empty body, malformed JSON,
    /// `null`, wrong field types, a non-JSON content type) is an invalid payload.
    pub fn decode(headers: &HeaderMap, body: &[u8]) -> Result<Self, ApiError> {
        if !is_json_content_type(headers) {
            return Err(ApiError::InvalidPayload);
        }

        match serde_json::from_slice::<Option<FruitPayload>>(body) {
            Ok(Some(payload)) => Ok(payload),
            Ok(None) => Err(ApiError::InvalidPayload),
            Err(e) => {
                tracing::debug!("undecodable fruit payload: {e}");
                Err(ApiError::InvalidPayload)
            }
        }
    }

    /// Validation for create: name, then stock, then the id must be absent.
    pub fn into_new_fruit(self) -> DomainResult<FruitDraft> {
        let draft = FruitDraft::validate(self.name, self.stock)?;
        ensure_unassigned_id(self.id)?;
        Ok(draft)
    }

    /// Validation for update: name, then stock. A body id is ignored.
    pub fn into_changes(self) -> DomainResult<FruitDraft> {
        FruitDraft::validate(self.name, self.stock)
    }
}

/// A missing content type is tolerated; parameters such as `charset` are ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
