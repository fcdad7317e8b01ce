//! Domain identifier types used as join keys across feeds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vault identifier - newtype for type safety.
///
/// Vault ids are assigned by the on-chain protocol and are unique
/// positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultId(u64);

impl VaultId {
    /// Create a new VaultId.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VaultId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Collateral-type identifier ("ilk", e.g. `ETH-A`) - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ilk(String);

impl Ilk {
    /// Create a new Ilk from a string.
    pub fn new(ilk: impl Into<String>) -> Self {
        Self(ilk.into())
    }

    /// Get the ilk as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ilk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Ilk {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Ilk {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Account address that owns vaults - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create a new Address from a string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_id_display_matches_value() {
        assert_eq!(VaultId::new(42).to_string(), "42");
    }

    #[test]
    fn ilk_round_trips_through_str() {
        let ilk = Ilk::from("ETH-A");
        assert_eq!(ilk.as_str(), "ETH-A");
        assert_eq!(ilk, Ilk::new(String::from("ETH-A")));
    }

    #[test]
    fn address_equality_is_exact() {
        assert_ne!(Address::new("0xabc"), Address::new("0xABC"));
    }
}
