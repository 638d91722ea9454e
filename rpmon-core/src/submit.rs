//! Agent submission capability.
//!
//! The alerting service client lives outside this crate; it implements
//! [`AgentSubmitter`]. [`submit_all`] drives it one rule at a time and stops
//! at the first failure. Agents already created are left in place.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::network::{ChainDescriptor, Network};
use crate::rules::{MonitoringRules, RuleDefinition, RuleKind};

/// Chain information sent alongside every rule.
#[derive(Debug, Clone, Copy)]
pub struct ChainContext<'a> {
    pub network: Network,
    pub descriptor: &'a ChainDescriptor,
}

impl<'a> ChainContext<'a> {
    pub fn new(network: Network, descriptor: &'a ChainDescriptor) -> Self {
        Self { network, descriptor }
    }

    /// Chain slug as the alerting service names it.
    pub fn slug(&self) -> &'static str {
        self.network.slug()
    }
}

/// What the alerting service returned for one created agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReceipt {
    pub kind: RuleKind,
    pub agent_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Something that can register monitoring agents.
#[async_trait]
pub trait AgentSubmitter: Send + Sync {
    async fn submit_rate_deviation(
        &self,
        rule: &RuleDefinition,
        chain: ChainContext<'_>,
    ) -> Result<AgentReceipt>;

    async fn submit_upgrade(
        &self,
        rule: &RuleDefinition,
        chain: ChainContext<'_>,
    ) -> Result<AgentReceipt>;

    async fn submit_rate_revert(
        &self,
        rule: &RuleDefinition,
        chain: ChainContext<'_>,
    ) -> Result<AgentReceipt>;
}

/// Submit the three rules in order: rate deviation, upgrade, rate revert.
///
/// # Errors
///
/// Returns the first submission error unchanged; later rules are not sent.
pub async fn submit_all<S>(
    submitter: &S,
    rules: &MonitoringRules,
    chain: ChainContext<'_>,
) -> Result<Vec<AgentReceipt>>
where
    S: AgentSubmitter + ?Sized,
{
    let mut receipts = Vec::with_capacity(3);
    receipts.push(submitter.submit_rate_deviation(&rules.rate_deviation, chain).await?);
    receipts.push(submitter.submit_upgrade(&rules.upgrade, chain).await?);
    receipts.push(submitter.submit_rate_revert(&rules.rate_revert, chain).await?);
    Ok(receipts)
}
