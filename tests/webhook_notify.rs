mod common;

use common::{desk_api, store_without_refresh, test_logger};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zohodesk_mcp::managers::threads::ThreadManager;
use zohodesk_mcp::services::tool_executor::ToolHandler;
use zohodesk_mcp::services::validation::Validation;
use zohodesk_mcp::services::webhook::Notifier;

fn thread_manager(desk: &MockServer, webhook_url: Option<String>) -> ThreadManager {
    let api = desk_api(&desk.uri(), "http://127.0.0.1:9/token", store_without_refresh("token"));
    let notifier = Notifier::new(test_logger(), webhook_url).expect("notifier must build");
    ThreadManager::new(
        test_logger(),
        Validation::new(),
        Arc::new(api),
        Arc::new(notifier),
    )
}

fn reply_success_mock() -> Mock {
    Mock::given(method("POST"))
        .and(path("/tickets/1/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "thread-9" })))
}

#[tokio::test]
async fn reply_survives_an_unreachable_webhook_host() {
    let desk = MockServer::start().await;
    reply_success_mock().expect(1).mount(&desk).await;
    Mock::given(method("GET"))
        .and(path("/tickets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticketNumber": "101",
            "subject": "Login broken",
            "status": "Open",
            "priority": "High",
        })))
        .expect(1)
        .mount(&desk)
        .await;

    // Port 9 refuses connections; the notifier must swallow that.
    let manager = thread_manager(&desk, Some("http://127.0.0.1:9/hook".to_string()));
    let result = manager
        .handle(
            "zoho_reply_ticket",
            json!({ "ticket_id": "1", "content": "On it" }),
        )
        .await
        .expect("reply must succeed despite the dead webhook");
    assert_eq!(result["id"], "thread-9");
}

#[tokio::test]
async fn webhook_receives_a_stripped_truncated_excerpt() {
    let desk = MockServer::start().await;
    let hooks = MockServer::start().await;

    reply_success_mock().expect(1).mount(&desk).await;
    Mock::given(method("GET"))
        .and(path("/tickets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticketNumber": "101",
            "subject": "Login broken",
            "status": "Open",
            "priority": "High",
        })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_string_contains("We are on it"))
        .and(body_string_contains("#101"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&hooks)
        .await;

    let manager = thread_manager(&desk, Some(format!("{}/hook", hooks.uri())));
    manager
        .handle(
            "zoho_reply_ticket",
            json!({
                "ticket_id": "1",
                "content": "<p>We are <b>on it</b></p>",
            }),
        )
        .await
        .expect("reply must succeed");
}

#[tokio::test]
async fn failed_comment_mutation_never_fires_the_webhook() {
    let desk = MockServer::start().await;
    let hooks = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tickets/1/comments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errorCode": "UNPROCESSABLE",
        })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&hooks)
        .await;

    let manager = thread_manager(&desk, Some(format!("{}/hook", hooks.uri())));
    let result = manager
        .handle(
            "zoho_add_ticket_comment",
            json!({ "ticket_id": "1", "content": "internal note" }),
        )
        .await
        .expect("remote errors are data, not faults");
    assert_eq!(result["errorCode"], "UNPROCESSABLE");
}

#[tokio::test]
async fn no_webhook_configured_means_no_summary_fetch() {
    let desk = MockServer::start().await;
    reply_success_mock().expect(1).mount(&desk).await;
    Mock::given(method("GET"))
        .and(path("/tickets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&desk)
        .await;

    let manager = thread_manager(&desk, None);
    let result = manager
        .handle(
            "zoho_reply_ticket",
            json!({ "ticket_id": "1", "content": "On it", "is_public": false }),
        )
        .await
        .expect("reply must succeed");
    assert_eq!(result["id"], "thread-9");
}

#[tokio::test]
async fn comment_webhook_reports_private_visibility_by_default() {
    let desk = MockServer::start().await;
    let hooks = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tickets/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "comment-3" })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticketNumber": "88",
            "subject": "Slow exports",
            "status": "Open",
            "priority": "Low",
        })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_string_contains("private comment"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&hooks)
        .await;

    let manager = thread_manager(&desk, Some(format!("{}/hook", hooks.uri())));
    let result = manager
        .handle(
            "zoho_add_ticket_comment",
            json!({ "ticket_id": "1", "content": "checking logs" }),
        )
        .await
        .expect("comment must succeed");
    assert_eq!(result["id"], "comment-3");
}
