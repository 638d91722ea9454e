//! Provision command implementation.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};

use rpmon_core::{
    derive_rules, registry_key, resolve_network, submit_all, validate_address, AgentReceipt,
    ChainContext, ChainDescriptor, MonitoringRuleSpec, Network, RateProviderRegistry, Result,
};

use crate::config::{self, Settings};
use crate::hypernative::HypernativeClient;
use crate::output;
use crate::rpc::RpcCheck;

/// Arguments for a provisioning run.
#[derive(Parser, Debug)]
#[command(name = "rpmon")]
#[command(version)]
#[command(about = "Provision Hypernative monitoring agents for a rate provider", long_about = None)]
pub struct ProvisionArgs {
    /// Rate provider contract address (0x-prefixed)
    #[arg(short = 'r', long = "rateProviderAddress")]
    pub rate_provider_address: String,

    /// Network (base, mainnet, arbitrum, avalanche, gnosis, fraxtal, optimism, sonic, hyperEvm)
    #[arg(short = 'n', long = "network")]
    pub network: String,

    /// Asset priced by the rate provider (0x-prefixed)
    #[arg(short = 'a', long = "rateProviderAsset")]
    pub rate_provider_asset: String,

    /// RPC URL; must support eth_createAccessList
    #[arg(short = 'u', long = "rpcUrl")]
    pub rpc_url: String,

    /// Rate provider registry file
    #[arg(long, default_value = config::DEFAULT_REGISTRY_PATH)]
    pub registry: PathBuf,

    /// Register the derived agents with Hypernative
    #[arg(long)]
    pub create_agents: bool,

    /// Check the RPC endpoint's chain id and eth_createAccessList support first
    #[arg(long)]
    pub verify_rpc: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything a run produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    network: String,
    registry_key: String,
    chain: ChainDescriptor,
    rules: Vec<MonitoringRuleSpec>,
    agents: Vec<AgentReceipt>,
}

/// Run the provision command.
pub async fn run(args: ProvisionArgs) -> i32 {
    match provision(&args).await {
        Ok(report) => {
            if args.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        output::error(&format!("Failed to serialize report: {}", e));
                        return 1;
                    }
                }
            } else {
                print_report(&report, args.create_agents);
            }
            0
        }
        Err(e) => {
            output::error(&e.to_string());
            1
        }
    }
}

async fn provision(args: &ProvisionArgs) -> Result<Report> {
    // Both addresses are checked before anything touches the network.
    let rate_provider = validate_address(&args.rate_provider_address, "rateProviderAddress")?;
    let asset = validate_address(&args.rate_provider_asset, "rateProviderAsset")?;

    let network: Network = args.network.parse()?;
    let chain = resolve_network(network, &args.rpc_url);
    let key = registry_key(&chain.name);
    debug!(network = %network, chain_id = chain.id, registry_key = %key, "resolved network");

    if args.verify_rpc {
        RpcCheck::new(&args.rpc_url)?.check(&chain, &rate_provider).await?;
        debug!(rpc = %args.rpc_url, "rpc endpoint verified");
    }

    let registry = RateProviderRegistry::load(&args.registry)?;
    let record = registry.lookup(&chain.name, &rate_provider)?;

    if let Some(recorded) = &record.asset {
        if recorded != &asset {
            warn!(recorded = %recorded, supplied = %asset, "asset differs from registry");
        }
    }
    if record.upgradeable_components.is_empty() {
        warn!(
            rate_provider = %rate_provider,
            "no upgradeable components recorded; upgrade agent has no targets"
        );
    }

    let rules = derive_rules(&chain, &rate_provider, &record.upgradeable_components);

    let agents = if args.create_agents {
        let settings = Settings::from_env();
        if !settings.has_credentials() {
            warn!("Hypernative credentials are not set");
        }
        let client = HypernativeClient::new(&settings)?;
        submit_all(&client, &rules, ChainContext::new(network, &chain)).await?
    } else {
        Vec::new()
    };

    Ok(Report {
        network: network.to_string(),
        registry_key: key,
        chain,
        rules: rules.specs(),
        agents,
    })
}

fn print_report(report: &Report, submitted: bool) {
    output::chain(&report.chain, &report.registry_key);

    for spec in &report.rules {
        output::rule(spec);
    }
    println!();

    if submitted {
        for agent in &report.agents {
            let id = agent.id.as_deref().unwrap_or("-");
            output::success(&format!("Created agent {} (id {})", agent.agent_name, id));
        }
    } else {
        output::info(&format!("Derived {} agents; nothing submitted.", report.rules.len()));
        output::hint("Pass --create-agents to register them with Hypernative.");
    }
}
