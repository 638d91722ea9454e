//! # rpmon core
//!
//! Monitoring coverage for rate provider contracts.
//!
//! This crate turns a network name, an RPC endpoint and a rate provider
//! address into the three alert rules registered with the alerting
//! service:
//!
//! - [`network`]: supported networks and chain descriptor resolution
//! - [`address`]: prefix-only address validation
//! - [`registry`]: lookup of recorded rate provider metadata
//! - [`rules`]: rate deviation, upgrade and revert rule derivation
//! - [`submit`]: the submission capability and its sequential driver
//!
//! No network I/O happens here.
//!
//! ## Quick Start
//!
//! ```rust
//! use rpmon_core::{derive_rules, resolve, validate_address, UpgradeableComponent};
//!
//! let chain = resolve("sonic", "https://custom.sonic.example").unwrap();
//! let provider =
//!     validate_address("0xABCD000000000000000000000000000000001234", "rateProviderAddress")
//!         .unwrap();
//! let proxy = UpgradeableComponent {
//!     entrypoint: validate_address("0xAAAA", "entrypoint").unwrap(),
//!     implementation_reviewed: None,
//! };
//!
//! let rules = derive_rules(&chain, &provider, &[proxy]);
//! assert_eq!(rules.upgrade.agent_name, "1234-upgrade");
//! ```

pub mod address;
pub mod error;
pub mod network;
pub mod registry;
pub mod rules;
pub mod submit;

// Re-export main types for convenience
pub use address::{validate_address, Address};
pub use error::{Result, RpmonError};
pub use network::{resolve, resolve_network, ChainDescriptor, Network};
pub use registry::{registry_key, RateProviderRecord, RateProviderRegistry, UpgradeableComponent};
pub use rules::{derive_rules, MonitoringRuleSpec, MonitoringRules, RuleDefinition, RuleKind};
pub use submit::{submit_all, AgentReceipt, AgentSubmitter, ChainContext};
