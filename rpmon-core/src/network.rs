//! Supported networks and chain descriptor resolution.
//!
//! A [`ChainDescriptor`] starts from the static table below, then gets
//! the caller's RPC endpoint as its only default transport, then gets
//! the network's explorer override (if any). Nothing else is touched.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, RpmonError};

/// Supported network identifiers, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Base,
    Mainnet,
    Arbitrum,
    Avalanche,
    Gnosis,
    Fraxtal,
    Optimism,
    Sonic,
    HyperEvm,
}

impl Network {
    /// All supported networks.
    pub const ALL: [Network; 9] = [
        Network::Base,
        Network::Mainnet,
        Network::Arbitrum,
        Network::Avalanche,
        Network::Gnosis,
        Network::Fraxtal,
        Network::Optimism,
        Network::Sonic,
        Network::HyperEvm,
    ];

    /// Identifier as accepted by `--network`.
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Base => "base",
            Network::Mainnet => "mainnet",
            Network::Arbitrum => "arbitrum",
            Network::Avalanche => "avalanche",
            Network::Gnosis => "gnosis",
            Network::Fraxtal => "fraxtal",
            Network::Optimism => "optimism",
            Network::Sonic => "sonic",
            Network::HyperEvm => "hyperEvm",
        }
    }

    /// Chain slug used by the alerting service.
    pub fn slug(self) -> &'static str {
        match self {
            Network::Mainnet => "ethereum",
            Network::HyperEvm => "hyperevm",
            other => other.as_str(),
        }
    }

    /// The unpatched descriptor from the static chain table.
    pub fn descriptor(self) -> ChainDescriptor {
        self.entry().to_descriptor()
    }

    /// Explorer override applied after the RPC override.
    ///
    /// Sonic is the only network whose upstream metadata has no explorer
    /// API URL.
    pub fn explorer_override(self) -> ExplorerOverride {
        match self {
            Network::Sonic => ExplorerOverride::Patch {
                name: "SonicScan",
                api_url: "https://api.sonicscan.org/api",
                fallback_url: "https://sonicscan.org",
            },
            _ => ExplorerOverride::Inherit,
        }
    }

    fn entry(self) -> &'static ChainEntry {
        match self {
            Network::Base => &BASE,
            Network::Mainnet => &MAINNET,
            Network::Arbitrum => &ARBITRUM,
            Network::Avalanche => &AVALANCHE,
            Network::Gnosis => &GNOSIS,
            Network::Fraxtal => &FRAXTAL,
            Network::Optimism => &OPTIMISM,
            Network::Sonic => &SONIC,
            Network::HyperEvm => &HYPER_EVM,
        }
    }
}

impl FromStr for Network {
    type Err = RpmonError;

    fn from_str(s: &str) -> Result<Self> {
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| RpmonError::UnsupportedNetwork(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// RPC endpoint set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcUrls {
    /// Default HTTP transports, in preference order.
    pub default: Vec<String>,
}

/// Block explorer metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockExplorer {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Identity and connection parameters of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub name: String,
    pub id: u64,
    pub native_currency: NativeCurrency,
    pub rpc_urls: RpcUrls,
    pub block_explorer: Option<BlockExplorer>,
}

impl ChainDescriptor {
    /// Replace the default transports with exactly `rpc_url`.
    pub fn with_rpc_url(mut self, rpc_url: &str) -> Self {
        self.rpc_urls = RpcUrls {
            default: vec![rpc_url.to_string()],
        };
        self
    }

    /// The first default transport.
    pub fn default_rpc(&self) -> Option<&str> {
        self.rpc_urls.default.first().map(String::as_str)
    }
}

/// Per-network explorer override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerOverride {
    /// Keep the explorer metadata from the chain table.
    Inherit,
    /// Set the name and API URL; keep the existing URL or use the fallback.
    Patch {
        name: &'static str,
        api_url: &'static str,
        fallback_url: &'static str,
    },
}

impl ExplorerOverride {
    /// Apply this override to an explorer descriptor.
    pub fn apply(self, explorer: Option<BlockExplorer>) -> Option<BlockExplorer> {
        match self {
            ExplorerOverride::Inherit => explorer,
            ExplorerOverride::Patch {
                name,
                api_url,
                fallback_url,
            } => Some(BlockExplorer {
                name: name.to_string(),
                url: explorer
                    .map(|e| e.url)
                    .unwrap_or_else(|| fallback_url.to_string()),
                api_url: Some(api_url.to_string()),
            }),
        }
    }
}

/// Resolve a network name into a descriptor bound to `rpc_url`.
///
/// # Errors
///
/// Returns `UnsupportedNetwork` if `network` is not a supported identifier.
pub fn resolve(network: &str, rpc_url: &str) -> Result<ChainDescriptor> {
    let network: Network = network.parse()?;
    Ok(resolve_network(network, rpc_url))
}

/// Infallible form of [`resolve`] for an already-parsed network.
pub fn resolve_network(network: Network, rpc_url: &str) -> ChainDescriptor {
    let mut descriptor = network.descriptor().with_rpc_url(rpc_url);
    descriptor.block_explorer = network
        .explorer_override()
        .apply(descriptor.block_explorer.take());
    descriptor
}

struct ExplorerEntry {
    name: &'static str,
    url: &'static str,
    api_url: Option<&'static str>,
}

struct ChainEntry {
    name: &'static str,
    id: u64,
    currency: (&'static str, &'static str, u8),
    rpc_urls: &'static [&'static str],
    explorer: Option<ExplorerEntry>,
}

impl ChainEntry {
    fn to_descriptor(&self) -> ChainDescriptor {
        let (name, symbol, decimals) = self.currency;
        ChainDescriptor {
            name: self.name.to_string(),
            id: self.id,
            native_currency: NativeCurrency {
                name: name.to_string(),
                symbol: symbol.to_string(),
                decimals,
            },
            rpc_urls: RpcUrls {
                default: self.rpc_urls.iter().map(|u| u.to_string()).collect(),
            },
            block_explorer: self.explorer.as_ref().map(|e| BlockExplorer {
                name: e.name.to_string(),
                url: e.url.to_string(),
                api_url: e.api_url.map(str::to_string),
            }),
        }
    }
}

const ETHER: (&str, &str, u8) = ("Ether", "ETH", 18);

const BASE: ChainEntry = ChainEntry {
    name: "Base",
    id: 8453,
    currency: ETHER,
    rpc_urls: &["https://mainnet.base.org"],
    explorer: Some(ExplorerEntry {
        name: "Basescan",
        url: "https://basescan.org",
        api_url: Some("https://api.basescan.org/api"),
    }),
};

const MAINNET: ChainEntry = ChainEntry {
    name: "Ethereum",
    id: 1,
    currency: ETHER,
    rpc_urls: &["https://eth.merkle.io"],
    explorer: Some(ExplorerEntry {
        name: "Etherscan",
        url: "https://etherscan.io",
        api_url: Some("https://api.etherscan.io/api"),
    }),
};

const ARBITRUM: ChainEntry = ChainEntry {
    name: "Arbitrum One",
    id: 42161,
    currency: ETHER,
    rpc_urls: &["https://arb1.arbitrum.io/rpc"],
    explorer: Some(ExplorerEntry {
        name: "Arbiscan",
        url: "https://arbiscan.io",
        api_url: Some("https://api.arbiscan.io/api"),
    }),
};

const AVALANCHE: ChainEntry = ChainEntry {
    name: "Avalanche",
    id: 43114,
    currency: ("Avalanche", "AVAX", 18),
    rpc_urls: &["https://api.avax.network/ext/bc/C/rpc"],
    explorer: Some(ExplorerEntry {
        name: "SnowTrace",
        url: "https://snowtrace.io",
        api_url: Some("https://api.snowtrace.io"),
    }),
};

const GNOSIS: ChainEntry = ChainEntry {
    name: "Gnosis",
    id: 100,
    currency: ("xDAI", "XDAI", 18),
    rpc_urls: &["https://rpc.gnosischain.com"],
    explorer: Some(ExplorerEntry {
        name: "Gnosisscan",
        url: "https://gnosisscan.io",
        api_url: Some("https://api.gnosisscan.io/api"),
    }),
};

const FRAXTAL: ChainEntry = ChainEntry {
    name: "Fraxtal",
    id: 252,
    currency: ("Frax Ether", "frxETH", 18),
    rpc_urls: &["https://rpc.frax.com"],
    explorer: Some(ExplorerEntry {
        name: "fraxscan",
        url: "https://fraxscan.com",
        api_url: Some("https://api.fraxscan.com/api"),
    }),
};

const OPTIMISM: ChainEntry = ChainEntry {
    name: "OP Mainnet",
    id: 10,
    currency: ETHER,
    rpc_urls: &["https://mainnet.optimism.io"],
    explorer: Some(ExplorerEntry {
        name: "Optimism Explorer",
        url: "https://optimistic.etherscan.io",
        api_url: Some("https://api-optimistic.etherscan.io/api"),
    }),
};

const SONIC: ChainEntry = ChainEntry {
    name: "Sonic",
    id: 146,
    currency: ("Sonic", "S", 18),
    rpc_urls: &["https://rpc.soniclabs.com"],
    explorer: Some(ExplorerEntry {
        name: "Sonic Explorer",
        url: "https://sonicscan.org",
        api_url: None,
    }),
};

const HYPER_EVM: ChainEntry = ChainEntry {
    name: "HyperEVM",
    id: 999,
    currency: ("HYPE", "HYPE", 18),
    rpc_urls: &["https://rpc.hyperliquid.xyz/evm"],
    explorer: Some(ExplorerEntry {
        name: "HyperEVMScan",
        url: "https://hyperevmscan.io",
        api_url: Some("https://api.hyperevmscan.io/api"),
    }),
};
