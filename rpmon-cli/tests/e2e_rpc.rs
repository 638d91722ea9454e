mod common;
use common::TestEnv;
use predicates::prelude::*;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn test_verify_rpc_success() {
    let env = TestEnv::new().await;
    env.mock_rpc("eth_chainId", json!("0x92")).await;
    env.mock_rpc("eth_createAccessList", json!({ "accessList": [], "gasUsed": "0x5208" })).await;

    env.provision("sonic")
        .arg("--verify-rpc")
        .assert()
        .success()
        .stdout(predicate::str::contains("c0DErate-revert"));

    let methods: Vec<String> = env
        .requests()
        .await
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["method"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(methods, vec!["eth_chainId", "eth_createAccessList"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verify_rpc_chain_mismatch() {
    let env = TestEnv::new().await;
    env.mock_rpc("eth_chainId", json!("0x1")).await;

    env.provision("sonic")
        .arg("--verify-rpc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Sonic is chain id 146"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verify_rpc_without_access_list_support() {
    let env = TestEnv::new().await;
    env.mock_rpc("eth_chainId", json!("0x92")).await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::body_partial_json(json!({ "method": "eth_createAccessList" })))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32601, "message": "the method eth_createAccessList does not exist" }
        })))
        .mount(&env.server)
        .await;

    env.provision("sonic")
        .arg("--verify-rpc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("eth_createAccessList failed"));
}
