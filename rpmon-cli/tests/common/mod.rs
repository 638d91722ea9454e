#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// 20-byte rate provider address recorded on sonic in the default registry.
pub const PROVIDER: &str = "0xABCD00000000000000000000000000000000c0DE";
pub const ASSET: &str = "0x039e2fB66102314Ce7b64Ce5Ce3E5183bc94aD38";
pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

pub struct TestEnv {
    pub server: MockServer,
    pub work_dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        let env = Self {
            server: MockServer::start().await,
            work_dir: TempDir::new().unwrap(),
        };
        env.write_registry(&default_registry());
        env
    }

    pub fn registry_path(&self) -> PathBuf {
        self.work_dir.path().join("registry.json")
    }

    pub fn write_registry(&self, doc: &Value) {
        std::fs::write(self.registry_path(), serde_json::to_string_pretty(doc).unwrap()).unwrap();
    }

    pub fn rpmon(&self) -> Command {
        let mut cmd = Command::cargo_bin("rpmon").unwrap();
        cmd.current_dir(self.work_dir.path());
        cmd.env("NO_COLOR", "1");
        cmd.env("HYPERNATIVE_API_URL", self.server.uri());
        cmd.env("HYPERNATIVE_CLIENT_ID", CLIENT_ID);
        cmd.env("HYPERNATIVE_CLIENT_SECRET", CLIENT_SECRET);
        cmd.arg("--registry").arg(self.registry_path());
        cmd
    }

    /// `rpmon` with all required flags for `network`, RPC pointed at the mock server.
    pub fn provision(&self, network: &str) -> Command {
        let mut cmd = self.rpmon();
        cmd.args(["-r", PROVIDER, "-n", network, "-a", ASSET, "-u"])
            .arg(self.server.uri());
        cmd
    }

    pub async fn mock_rpc(&self, method_name: &str, response_json: Value) {
        let response = ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": response_json
        }));

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({ "method": method_name })))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

pub fn default_registry() -> Value {
    json!({
        "sonic": {
            PROVIDER: {
                "asset": ASSET,
                "name": "StakedSonicRateProvider",
                "upgradeableComponents": [
                    { "entrypoint": "0xAAAA" },
                    { "entrypoint": "0xBBBB" }
                ]
            }
        },
        "hyperevm": {
            PROVIDER: { "upgradeableComponents": [] }
        }
    })
}
