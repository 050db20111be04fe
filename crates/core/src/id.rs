//! Strongly-typed fruit identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stored fruit.
///
/// Assigned by storage on insert and never changed afterwards. Backed by a
/// 32-bit integer to match the `SERIAL` column of the relational table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FruitId(i32);

impl FruitId {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for FruitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for FruitId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<FruitId> for i32 {
    fn from(value: FruitId) -> Self {
        value.0
    }
}

impl FromStr for FruitId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(Self)
            .map_err(|_| DomainError::invalid_id(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_ids() {
        assert_eq!("17".parse::<FruitId>().unwrap(), FruitId::new(17));
        assert_eq!("-3".parse::<FruitId>().unwrap(), FruitId::new(-3));
    }

    #[test]
    fn rejects_non_numeric_and_overflowing_ids() {
        assert_eq!(
            "pear".parse::<FruitId>().unwrap_err(),
            DomainError::InvalidId("pear".to_string())
        );
        assert!("4294967296".parse::<FruitId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&FruitId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
