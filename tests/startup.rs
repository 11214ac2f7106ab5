mod common;

use common::ENV_LOCK;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use zohodesk_mcp::app::App;
use zohodesk_mcp::mcp::catalog::tool_catalog;
use zohodesk_mcp::mcp::server::McpServer;
use zohodesk_mcp::services::config::Config;

const CRED_VARS: &[&str] = &[
    "ZOHO_ACCESS_TOKEN",
    "ZOHO_ORG_ID",
    "ZOHO_CLIENT_ID",
    "ZOHO_CLIENT_SECRET",
    "ZOHO_REFRESH_TOKEN",
    "ZOHO_WEBHOOK_URL",
    "ZOHO_CONFIG_FILE",
];

fn snapshot_env() -> Vec<(String, Option<String>)> {
    CRED_VARS
        .iter()
        .map(|key| (key.to_string(), std::env::var(key).ok()))
        .collect()
}

fn restore_env(snapshot: Vec<(String, Option<String>)>) {
    for (key, previous) in snapshot {
        match previous {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }
    }
}

fn clear_env() {
    for key in CRED_VARS {
        std::env::remove_var(key);
    }
}

#[tokio::test]
async fn app_wires_a_handler_for_every_catalog_tool() {
    let _guard = ENV_LOCK.lock().await;
    let snapshot = snapshot_env();
    clear_env();
    std::env::set_var("ZOHO_ACCESS_TOKEN", "test-token");
    std::env::set_var("ZOHO_ORG_ID", "700000001");

    let app = App::initialize().expect("app must initialize");
    let wired = app.tool_executor.known_tools();
    assert_eq!(wired.len(), tool_catalog().len());
    for tool in tool_catalog() {
        assert!(wired.contains(&tool.name), "{} must be wired", tool.name);
    }

    restore_env(snapshot);
}

#[tokio::test]
async fn unknown_tool_is_rejected_before_any_work_happens() {
    let _guard = ENV_LOCK.lock().await;
    let snapshot = snapshot_env();
    clear_env();
    std::env::set_var("ZOHO_ACCESS_TOKEN", "test-token");
    std::env::set_var("ZOHO_ORG_ID", "700000001");

    let app = App::initialize().expect("app must initialize");
    let err = app
        .tool_executor
        .execute("zoho_explode_ticket", json!({}))
        .await
        .expect_err("unknown tool must fault");
    assert!(err.message.contains("Unknown tool: zoho_explode_ticket"));

    restore_env(snapshot);
}

#[tokio::test]
async fn tool_call_faults_become_error_prefixed_text() {
    let _guard = ENV_LOCK.lock().await;
    let snapshot = snapshot_env();
    clear_env();
    std::env::set_var("ZOHO_ACCESS_TOKEN", "test-token");
    std::env::set_var("ZOHO_ORG_ID", "700000001");

    let app = Arc::new(App::initialize().expect("app must initialize"));
    let server = McpServer::with_app(app);

    // Schema validation happens before dispatch; nothing reaches the network.
    let result = server.handle_tools_call("zoho_get_ticket", json!({})).await;
    let text = result["content"][0]["text"].as_str().expect("text content");
    assert!(text.starts_with("Error: "));
    assert!(text.contains("ticket_id"));

    let result = server.handle_tools_call("zoho_nope", json!({})).await;
    let text = result["content"][0]["text"].as_str().expect("text content");
    assert!(text.starts_with("Error: Unknown tool"));

    restore_env(snapshot);
}

#[tokio::test]
async fn config_prefers_environment_over_file() {
    let _guard = ENV_LOCK.lock().await;
    let snapshot = snapshot_env();
    clear_env();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("config.json");
    let mut file = std::fs::File::create(&file_path).expect("create config");
    write!(
        file,
        r#"{{"accessToken": "file-token", "orgId": "file-org"}}"#
    )
    .expect("write config");

    std::env::set_var("ZOHO_CONFIG_FILE", &file_path);
    std::env::set_var("ZOHO_ACCESS_TOKEN", "env-token");
    std::env::set_var("ZOHO_ORG_ID", "env-org");

    let config = Config::load().expect("config must load");
    assert_eq!(config.access_token, "env-token");
    assert_eq!(config.org_id, "env-org");

    restore_env(snapshot);
}

#[tokio::test]
async fn config_falls_back_to_the_file_when_env_is_incomplete() {
    let _guard = ENV_LOCK.lock().await;
    let snapshot = snapshot_env();
    clear_env();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("config.json");
    let mut file = std::fs::File::create(&file_path).expect("create config");
    write!(
        file,
        r#"{{"accessToken": "file-token", "orgId": "file-org", "webhookUrl": "https://hooks.example.com/x"}}"#
    )
    .expect("write config");

    // Token without org id is not enough; the file must win.
    std::env::set_var("ZOHO_ACCESS_TOKEN", "env-token");
    std::env::set_var("ZOHO_CONFIG_FILE", &file_path);

    let config = Config::load().expect("config must load");
    assert_eq!(config.access_token, "file-token");
    assert_eq!(config.webhook_url.as_deref(), Some("https://hooks.example.com/x"));

    restore_env(snapshot);
}

#[tokio::test]
async fn missing_credentials_everywhere_is_a_fatal_descriptive_error() {
    let _guard = ENV_LOCK.lock().await;
    let snapshot = snapshot_env();
    clear_env();

    let dir = tempfile::tempdir().expect("tempdir");
    std::env::set_var("ZOHO_CONFIG_FILE", dir.path().join("missing.json"));

    let err = Config::load().expect_err("load must fail");
    assert!(err.message.contains("ZOHO_ACCESS_TOKEN"));
    assert!(err.message.contains("config.json"));

    restore_env(snapshot);
}
