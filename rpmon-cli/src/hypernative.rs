//! Hypernative custom agent client.
//!
//! One `POST /custom-agents` per rule. Failures are returned as-is; nothing
//! is retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use rpmon_core::{
    AgentReceipt, AgentSubmitter, ChainContext, Result, RpmonError, RuleDefinition, RuleKind,
};

use crate::config::{Settings, HTTP_TIMEOUT_SECS};

const AGENT_TYPE: &str = "customAgent";
const SEVERITY: &str = "High";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContractRef<'a> {
    address: &'a str,
    chain: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleBody<'a> {
    kind: &'static str,
    rule_string: &'a str,
    chain: &'a str,
    chain_id: u64,
    contracts: Vec<ContractRef<'a>>,
    alias: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AgentRequest<'a> {
    agent_name: &'a str,
    agent_type: &'static str,
    state: &'static str,
    severity: &'static str,
    mute_duration: u64,
    rule: RuleBody<'a>,
}

impl<'a> AgentRequest<'a> {
    fn new(kind: RuleKind, rule: &'a RuleDefinition, chain: ChainContext<'a>) -> Self {
        let slug = chain.slug();
        Self {
            agent_name: &rule.agent_name,
            agent_type: AGENT_TYPE,
            state: "enabled",
            severity: SEVERITY,
            mute_duration: 0,
            rule: RuleBody {
                kind: kind.as_str(),
                rule_string: &rule.rule,
                chain: slug,
                chain_id: chain.descriptor.id,
                contracts: rule
                    .targets
                    .iter()
                    .map(|a| ContractRef {
                        address: a.as_str(),
                        chain: slug,
                    })
                    .collect(),
                alias: &rule.alias,
            },
        }
    }
}

/// HTTP client for the Hypernative API.
pub struct HypernativeClient {
    http: reqwest::Client,
    endpoint: String,
    client_id: String,
    client_secret: String,
}

impl HypernativeClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| RpmonError::ExternalApi(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/custom-agents", settings.api_url.trim_end_matches('/')),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        })
    }

    async fn create_agent(
        &self,
        kind: RuleKind,
        rule: &RuleDefinition,
        chain: ChainContext<'_>,
    ) -> Result<AgentReceipt> {
        let request = AgentRequest::new(kind, rule, chain);
        debug!(agent = %rule.agent_name, endpoint = %self.endpoint, "creating agent");

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-client-id", &self.client_id)
            .header("x-client-secret", &self.client_secret)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpmonError::ExternalApi(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RpmonError::ExternalApi(e.to_string()))?;

        if !status.is_success() {
            return Err(RpmonError::ExternalApi(format!("{}: {}", status, body)));
        }

        let id = serde_json::from_str::<Value>(&body)
            .ok()
            .as_ref()
            .and_then(agent_id);
        info!(agent = %rule.agent_name, id = ?id, "agent created");

        Ok(AgentReceipt {
            kind,
            agent_name: rule.agent_name.clone(),
            id,
        })
    }
}

/// Agent id from either `{"data": {"id": ..}}` or `{"id": ..}`.
fn agent_id(body: &Value) -> Option<String> {
    let id = body.pointer("/data/id").or_else(|| body.get("id"))?;
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl AgentSubmitter for HypernativeClient {
    async fn submit_rate_deviation(
        &self,
        rule: &RuleDefinition,
        chain: ChainContext<'_>,
    ) -> Result<AgentReceipt> {
        self.create_agent(RuleKind::RateDeviation, rule, chain).await
    }

    async fn submit_upgrade(
        &self,
        rule: &RuleDefinition,
        chain: ChainContext<'_>,
    ) -> Result<AgentReceipt> {
        self.create_agent(RuleKind::Upgrade, rule, chain).await
    }

    async fn submit_rate_revert(
        &self,
        rule: &RuleDefinition,
        chain: ChainContext<'_>,
    ) -> Result<AgentReceipt> {
        self.create_agent(RuleKind::RateRevert, rule, chain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpmon_core::{
        derive_rules, resolve_network, validate_address, Network, UpgradeableComponent,
    };
    use serde_json::json;

    #[test]
    fn test_request_body() {
        let chain = resolve_network(Network::Mainnet, "https://rpc.example");
        let provider = validate_address("0x0000000000000000000000000000000000001234", "r").unwrap();
        let proxy = UpgradeableComponent {
            entrypoint: validate_address("0xAAAA", "e").unwrap(),
            implementation_reviewed: None,
        };
        let rules = derive_rules(&chain, &provider, &[proxy]);

        let request = AgentRequest::new(
            RuleKind::Upgrade,
            &rules.upgrade,
            ChainContext::new(Network::Mainnet, &chain),
        );
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["agentName"], "1234-upgrade");
        assert_eq!(body["agentType"], "customAgent");
        assert_eq!(body["rule"]["chain"], "ethereum");
        assert_eq!(body["rule"]["chainId"], 1);
        assert_eq!(body["rule"]["kind"], "upgrade");
        assert_eq!(
            body["rule"]["contracts"],
            json!([{ "address": "0xAAAA", "chain": "ethereum" }])
        );
        assert_eq!(body["rule"]["alias"], "0xAAAA");
    }

    #[test]
    fn test_agent_id_shapes() {
        assert_eq!(agent_id(&json!({ "data": { "id": 42 } })), Some("42".to_string()));
        assert_eq!(agent_id(&json!({ "id": "abc" })), Some("abc".to_string()));
        assert_eq!(agent_id(&json!({ "success": true })), None);
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let settings = Settings {
            client_id: String::new(),
            client_secret: String::new(),
            api_url: "http://localhost:1234/".to_string(),
        };
        let client = HypernativeClient::new(&settings).unwrap();
        assert_eq!(client.endpoint, "http://localhost:1234/custom-agents");
    }
}
