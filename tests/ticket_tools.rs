mod common;

use common::{desk_api, store_without_refresh, test_logger};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zohodesk_mcp::managers::tickets::TicketManager;
use zohodesk_mcp::services::tool_executor::ToolHandler;
use zohodesk_mcp::services::validation::Validation;

fn ticket_manager(desk: &MockServer) -> TicketManager {
    let api = desk_api(&desk.uri(), "http://127.0.0.1:9/token", store_without_refresh("token"));
    TicketManager::new(test_logger(), Validation::new(), Arc::new(api))
}

#[tokio::test]
async fn list_tickets_maps_filters_onto_query_parameters() {
    let desk = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets"))
        .and(query_param("status", "Open"))
        .and(query_param("limit", "10"))
        .and(query_param("sortBy", "createdTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let result = manager
        .handle(
            "zoho_list_tickets",
            json!({ "status": "Open", "limit": 10, "sort_by": "createdTime" }),
        )
        .await
        .expect("list must succeed");
    assert_eq!(result["data"], json!([]));
}

#[tokio::test]
async fn create_ticket_sends_camel_case_fields_and_omits_absent_ones() {
    let desk = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tickets"))
        .and(body_json(json!({
            "subject": "Printer on fire",
            "description": "It is very much on fire",
            "contactId": "c-9",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "t-1" })))
        .expect(1)
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let result = manager
        .handle(
            "zoho_create_ticket",
            json!({
                "subject": "Printer on fire",
                "description": "It is very much on fire",
                "contact_id": "c-9",
            }),
        )
        .await
        .expect("create must succeed");
    assert_eq!(result["id"], "t-1");
}

#[tokio::test]
async fn get_ticket_merges_threads_by_default() {
    let desk = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "42",
            "subject": "Hello",
        })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/42/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "thread-1" }],
        })))
        .expect(1)
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let result = manager
        .handle("zoho_get_ticket", json!({ "ticket_id": "42" }))
        .await
        .expect("get must succeed");
    assert_eq!(result["subject"], "Hello");
    assert_eq!(result["threads"]["data"][0]["id"], "thread-1");
}

#[tokio::test]
async fn get_ticket_can_skip_threads() {
    let desk = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "42" })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/42/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let result = manager
        .handle(
            "zoho_get_ticket",
            json!({ "ticket_id": "42", "include_threads": false }),
        )
        .await
        .expect("get must succeed");
    assert!(result.get("threads").is_none());
}

#[tokio::test]
async fn full_context_reflects_a_failed_sub_call_in_its_field() {
    let desk = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7",
            "subject": "Crash on save",
        })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/7/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "thread-1" }],
        })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/7/comments"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errorCode": "INTERNAL_SERVER_ERROR",
        })))
        .expect(1)
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let result = manager
        .handle("zoho_get_ticket_full_context", json!({ "ticket_id": "7" }))
        .await
        .expect("composite must succeed");

    assert_eq!(result["subject"], "Crash on save");
    assert_eq!(result["threads"]["data"][0]["id"], "thread-1");
    assert_eq!(result["comments"]["errorCode"], "INTERNAL_SERVER_ERROR");
}

#[tokio::test]
async fn full_context_primary_failure_is_the_whole_answer() {
    let desk = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorCode": "RESOURCE_NOT_FOUND",
        })))
        .expect(1)
        .mount(&desk)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/7/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&desk)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/7/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let result = manager
        .handle("zoho_get_ticket_full_context", json!({ "ticket_id": "7" }))
        .await
        .expect("composite must not fault");
    assert_eq!(result["errorCode"], "RESOURCE_NOT_FOUND");
    assert!(result.get("threads").is_none());
}

#[tokio::test]
async fn delete_ticket_returns_a_confirmation_string() {
    let desk = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tickets/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let result = manager
        .handle("zoho_delete_ticket", json!({ "ticket_id": "9" }))
        .await
        .expect("delete must succeed");
    assert_eq!(result, Value::String("Ticket 9 deleted successfully".to_string()));
}

#[tokio::test]
async fn delete_ticket_passes_remote_errors_through() {
    let desk = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tickets/9"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errorCode": "FORBIDDEN",
        })))
        .expect(1)
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let result = manager
        .handle("zoho_delete_ticket", json!({ "ticket_id": "9" }))
        .await
        .expect("delete must not fault on remote errors");
    assert_eq!(result["errorCode"], "FORBIDDEN");
}

#[tokio::test]
async fn missing_required_argument_is_a_dispatch_fault_with_no_outbound_call() {
    let desk = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&desk)
        .await;

    let manager = ticket_manager(&desk);
    let err = manager
        .handle("zoho_get_ticket", json!({}))
        .await
        .expect_err("missing ticket_id must fault");
    assert!(err.message.contains("ticket_id"));
}
