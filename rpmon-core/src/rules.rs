//! Monitoring rule derivation.
//!
//! Every rate provider gets the same three agents: one watching `getRate()`
//! for sharp moves, one watching its upgradeable components for
//! `Upgraded(address)`, and one watching `getRate()` for reverts.
//!
//! Agent names are the last four characters of the rate provider address
//! followed by a per-kind suffix. Two providers sharing a four-character
//! tail produce the same names.

use serde::Serialize;

use crate::address::Address;
use crate::network::ChainDescriptor;
use crate::registry::UpgradeableComponent;

/// Relative change of `getRate()` that triggers the deviation agent.
pub const DEVIATION_PERCENT: u32 = 10;

/// The deviation must happen within fewer than this many blocks.
pub const DEVIATION_WINDOW_BLOCKS: u64 = 10;

/// `getRate()` is sampled every this many blocks.
pub const SAMPLE_INTERVAL_BLOCKS: u64 = 5;

/// Number of trailing address characters used in agent names.
pub const AGENT_NAME_TAIL: usize = 4;

/// Which of the three agents a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    RateDeviation,
    Upgrade,
    RateRevert,
}

impl RuleKind {
    /// Appended to the address tail to form the agent name.
    pub fn name_suffix(self) -> &'static str {
        match self {
            RuleKind::RateDeviation => "rate-deviation",
            RuleKind::Upgrade => "-upgrade",
            RuleKind::RateRevert => "rate-revert",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::RateDeviation => "rateDeviation",
            RuleKind::Upgrade => "upgrade",
            RuleKind::RateRevert => "rateRevert",
        }
    }
}

/// Agent name for `kind` on `rate_provider`.
pub fn agent_name(rate_provider: &Address, kind: RuleKind) -> String {
    format!(
        "{}{}",
        rate_provider.last_hex_chars(AGENT_NAME_TAIL),
        kind.name_suffix()
    )
}

/// A single alert definition, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    /// Chain display name
    pub chain: String,
    pub chain_id: u64,
    /// Human-readable rule text
    pub rule: String,
    /// Contracts the rule watches
    pub targets: Vec<Address>,
    /// Display alias for the targets
    pub alias: String,
    pub agent_name: String,
}

/// One rule, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MonitoringRuleSpec {
    RateDeviation(RuleDefinition),
    Upgrade(RuleDefinition),
    RateRevert(RuleDefinition),
}

impl MonitoringRuleSpec {
    pub fn kind(&self) -> RuleKind {
        match self {
            MonitoringRuleSpec::RateDeviation(_) => RuleKind::RateDeviation,
            MonitoringRuleSpec::Upgrade(_) => RuleKind::Upgrade,
            MonitoringRuleSpec::RateRevert(_) => RuleKind::RateRevert,
        }
    }

    pub fn definition(&self) -> &RuleDefinition {
        match self {
            MonitoringRuleSpec::RateDeviation(d)
            | MonitoringRuleSpec::Upgrade(d)
            | MonitoringRuleSpec::RateRevert(d) => d,
        }
    }
}

/// The three rules derived for one rate provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringRules {
    pub rate_deviation: RuleDefinition,
    pub upgrade: RuleDefinition,
    pub rate_revert: RuleDefinition,
}

impl MonitoringRules {
    /// The rules in submission order.
    pub fn specs(&self) -> Vec<MonitoringRuleSpec> {
        vec![
            MonitoringRuleSpec::RateDeviation(self.rate_deviation.clone()),
            MonitoringRuleSpec::Upgrade(self.upgrade.clone()),
            MonitoringRuleSpec::RateRevert(self.rate_revert.clone()),
        ]
    }
}

/// Derive all three rules for a rate provider.
///
/// An empty `components` list still yields an upgrade rule, with no
/// targets and an empty alias.
pub fn derive_rules(
    chain: &ChainDescriptor,
    rate_provider: &Address,
    components: &[UpgradeableComponent],
) -> MonitoringRules {
    let entrypoints: Vec<Address> = components.iter().map(|c| c.entrypoint.clone()).collect();
    MonitoringRules {
        rate_deviation: rate_deviation_rule(chain, rate_provider),
        upgrade: upgrade_rule(chain, rate_provider, entrypoints),
        rate_revert: rate_revert_rule(chain, rate_provider),
    }
}

pub fn rate_deviation_rule(chain: &ChainDescriptor, rate_provider: &Address) -> RuleDefinition {
    RuleDefinition {
        chain: chain.name.clone(),
        chain_id: chain.id,
        rule: format!(
            "On {}, when the return value of getRate() (uint256) on {} changes by {}% \
             in less than {} blocks, sampled every {} blocks",
            chain.name,
            rate_provider,
            DEVIATION_PERCENT,
            DEVIATION_WINDOW_BLOCKS,
            SAMPLE_INTERVAL_BLOCKS
        ),
        targets: vec![rate_provider.clone()],
        alias: rate_provider.to_string(),
        agent_name: agent_name(rate_provider, RuleKind::RateDeviation),
    }
}

pub fn upgrade_rule(
    chain: &ChainDescriptor,
    rate_provider: &Address,
    entrypoints: Vec<Address>,
) -> RuleDefinition {
    let alias = entrypoints
        .iter()
        .map(Address::as_str)
        .collect::<Vec<_>>()
        .join(" or ");
    RuleDefinition {
        chain: chain.name.clone(),
        chain_id: chain.id,
        rule: format!(
            "On {}, when Upgraded(address indexed implementation) is emitted by any of {}",
            chain.name, alias
        ),
        targets: entrypoints,
        alias,
        agent_name: agent_name(rate_provider, RuleKind::Upgrade),
    }
}

pub fn rate_revert_rule(chain: &ChainDescriptor, rate_provider: &Address) -> RuleDefinition {
    RuleDefinition {
        chain: chain.name.clone(),
        chain_id: chain.id,
        rule: format!(
            "On {}, when a call to getRate() on {} reverts",
            chain.name, rate_provider
        ),
        targets: vec![rate_provider.clone()],
        alias: rate_provider.to_string(),
        agent_name: agent_name(rate_provider, RuleKind::RateRevert),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::validate_address;
    use crate::network::resolve;

    fn addr(raw: &str) -> Address {
        validate_address(raw, "test").unwrap()
    }

    fn component(raw: &str) -> UpgradeableComponent {
        UpgradeableComponent {
            entrypoint: addr(raw),
            implementation_reviewed: None,
        }
    }

    #[test]
    fn test_agent_names() {
        let provider = addr("0xABCD00000000000000000000000000000000beEf");
        assert_eq!(agent_name(&provider, RuleKind::RateDeviation), "beEfrate-deviation");
        assert_eq!(agent_name(&provider, RuleKind::Upgrade), "beEf-upgrade");
        assert_eq!(agent_name(&provider, RuleKind::RateRevert), "beEfrate-revert");
    }

    #[test]
    fn test_deviation_rule_text() {
        let chain = resolve("base", "https://rpc.example").unwrap();
        let rule = rate_deviation_rule(&chain, &addr("0x1234"));
        assert!(rule.rule.contains("getRate()"));
        assert!(rule.rule.contains("uint256"));
        assert!(rule.rule.contains("10%"));
        assert!(rule.rule.contains("less than 10 blocks"));
        assert!(rule.rule.contains("every 5 blocks"));
        assert_eq!(rule.targets, vec![addr("0x1234")]);
        assert_eq!(rule.chain, "Base");
        assert_eq!(rule.chain_id, 8453);
    }

    #[test]
    fn test_revert_rule_text() {
        let chain = resolve("gnosis", "https://rpc.example").unwrap();
        let rule = rate_revert_rule(&chain, &addr("0x1234"));
        assert!(rule.rule.contains("getRate()"));
        assert!(rule.rule.contains("reverts"));
        assert_eq!(rule.alias, "0x1234");
    }

    #[test]
    fn test_specs_order() {
        let chain = resolve("mainnet", "https://rpc.example").unwrap();
        let rules = derive_rules(&chain, &addr("0x1234"), &[component("0xAAAA")]);
        let kinds: Vec<_> = rules.specs().iter().map(MonitoringRuleSpec::kind).collect();
        assert_eq!(kinds, vec![RuleKind::RateDeviation, RuleKind::Upgrade, RuleKind::RateRevert]);
    }

    #[test]
    fn test_spec_serializes_with_kind_tag() {
        let chain = resolve("mainnet", "https://rpc.example").unwrap();
        let rules = derive_rules(&chain, &addr("0x1234"), &[]);
        let json = serde_json::to_value(rules.specs()).unwrap();
        assert_eq!(json[1]["kind"], "upgrade");
        assert_eq!(json[1]["agentName"], "1234-upgrade");
        assert_eq!(json[1]["targets"], serde_json::json!([]));
    }
}
