//! Error types for the rpmon core library.
//!
//! This module defines all error types that can occur during
//! network resolution, identifier validation, registry lookup and
//! agent submission.

use thiserror::Error;

/// Errors that can occur in rpmon operations.
#[derive(Debug, Error)]
pub enum RpmonError {
    /// The requested network is not one of the supported identifiers.
    #[error("Unsupported network: '{0}'")]
    UnsupportedNetwork(String),

    /// An address-shaped input did not start with `0x`.
    #[error("Invalid {field}: '{raw}' is not a 0x-prefixed address")]
    InvalidAddress {
        /// Name of the input the value came from
        field: String,
        /// The value as supplied
        raw: String,
    },

    /// The registry has no entry for the resolved chain key.
    #[error("Registry has no entry for chain key '{key}'")]
    RegistryKey {
        /// The resolved registry key
        key: String,
    },

    /// The chain key exists but the rate provider is not recorded under it.
    #[error("Rate provider {address} not found in registry under '{key}'")]
    RateProviderNotFound {
        /// The resolved registry key
        key: String,
        /// The rate provider address that was searched for
        address: String,
    },

    /// The registry file could not be read, parsed or validated.
    #[error("Registry error: {0}")]
    Registry(String),

    /// Error surfaced by the alerting service.
    #[error("External API error: {0}")]
    ExternalApi(String),

    /// RPC endpoint error.
    #[error("RPC error: {0}")]
    Rpc(String),
}

/// Result type alias for rpmon operations.
pub type Result<T> = std::result::Result<T, RpmonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_display() {
        let err = RpmonError::InvalidAddress {
            field: "rateProviderAddress".to_string(),
            raw: "notAnAddress".to_string(),
        };
        assert!(err.to_string().contains("rateProviderAddress"));
        assert!(err.to_string().contains("notAnAddress"));
    }

    #[test]
    fn test_not_found_display() {
        let err = RpmonError::RateProviderNotFound {
            key: "base".to_string(),
            address: "0x1234".to_string(),
        };
        assert!(err.to_string().contains("0x1234"));
        assert!(err.to_string().contains("'base'"));
    }
}
