//! Operator-supplied address identifiers.
//!
//! Validation is a prefix check only: anything starting with `0x` is
//! accepted, whatever follows. Hex content and length are left to the
//! collaborators that actually use the address on chain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RpmonError};

/// Required prefix for address-shaped inputs.
pub const ADDRESS_PREFIX: &str = "0x";

/// A `0x`-prefixed identifier, kept exactly as written.
///
/// Deserializing goes through [`validate_address`], so registry-sourced
/// values obey the same prefix rule as command-line input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The address as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing `n` characters, case preserved.
    ///
    /// Returns the whole string when it is shorter than `n`.
    pub fn last_hex_chars(&self, n: usize) -> &str {
        let len = self.0.chars().count();
        if len <= n {
            return &self.0;
        }
        let start = self
            .0
            .char_indices()
            .nth(len - n)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.0[start..]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = RpmonError;

    fn try_from(raw: String) -> Result<Self> {
        validate_address(&raw, "registry address")
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Validate an address-shaped input.
///
/// `field` names the input in the error (e.g. `rateProviderAddress`).
///
/// # Errors
///
/// Returns `InvalidAddress` if `raw` does not start with `0x`.
pub fn validate_address(raw: &str, field: &str) -> Result<Address> {
    if !raw.starts_with(ADDRESS_PREFIX) {
        return Err(RpmonError::InvalidAddress {
            field: field.to_string(),
            raw: raw.to_string(),
        });
    }
    Ok(Address(raw.to_string()))
}
