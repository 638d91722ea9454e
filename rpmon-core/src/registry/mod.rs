//! Rate provider registry lookup.
//!
//! The registry is a JSON document keyed by registry key, then by rate
//! provider address. It is written by the review pipeline; this crate
//! only reads it.

pub mod validator;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::Address;
use crate::error::{Result, RpmonError};
use validator::RegistryValidator;

/// Chain display name -> registry key.
pub const REGISTRY_KEYS: &[(&str, &str)] = &[
    ("Ethereum", "mainnet"),
    ("Arbitrum One", "arbitrum"),
    ("OP Mainnet", "optimism"),
    ("Avalanche", "avalanche"),
    ("Base", "base"),
    ("Gnosis", "gnosis"),
    ("Fraxtal", "fraxtal"),
    ("Sonic", "sonic"),
];

/// Registry key for a chain display name.
///
/// Falls back to the lowercased name for chains missing from
/// [`REGISTRY_KEYS`], so a key is always produced.
pub fn registry_key(chain_name: &str) -> String {
    REGISTRY_KEYS
        .iter()
        .find(|(name, _)| *name == chain_name)
        .map(|(_, key)| key.to_string())
        .unwrap_or_else(|| chain_name.to_lowercase())
}

/// A proxy or other upgradeable contract in front of the rate provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeableComponent {
    pub entrypoint: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_reviewed: Option<Address>,
}

/// Everything the review pipeline recorded about one rate provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateProviderRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub upgradeable_components: Vec<UpgradeableComponent>,
}

impl RateProviderRecord {
    /// Entrypoints of the upgradeable components, in registry order.
    pub fn entrypoints(&self) -> Vec<Address> {
        self.upgradeable_components
            .iter()
            .map(|c| c.entrypoint.clone())
            .collect()
    }
}

/// The parsed registry document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateProviderRegistry {
    /// registry key -> rate provider address -> record
    pub chains: BTreeMap<String, BTreeMap<String, RateProviderRecord>>,
}

impl RateProviderRegistry {
    /// Load and validate the registry file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RpmonError::Registry(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let json_data: Value = serde_json::from_str(&content)
            .map_err(|e| RpmonError::Registry(format!("Failed to parse registry JSON: {}", e)))?;

        Self::from_value(json_data)
    }

    /// Validate an in-memory document against the registry schema and deserialize it.
    pub fn from_value(json_data: Value) -> Result<Self> {
        let validator = RegistryValidator::new()?;
        validator.validate(&json_data)?;

        serde_json::from_value(json_data)
            .map_err(|e| RpmonError::Registry(format!("Failed to deserialize registry: {}", e)))
    }

    /// Look up the record for `address` on the chain named `chain_name`.
    ///
    /// Addresses match exactly as written in the document.
    ///
    /// # Errors
    ///
    /// - `RegistryKey` if the resolved key has no entry
    /// - `RateProviderNotFound` if the key exists but the address does not
    pub fn lookup(&self, chain_name: &str, address: &Address) -> Result<&RateProviderRecord> {
        let key = registry_key(chain_name);
        let providers = self
            .chains
            .get(&key)
            .ok_or_else(|| RpmonError::RegistryKey { key: key.clone() })?;
        providers
            .get(address.as_str())
            .ok_or_else(|| RpmonError::RateProviderNotFound {
                key,
                address: address.to_string(),
            })
    }
}
