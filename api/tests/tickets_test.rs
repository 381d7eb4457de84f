mod helpers;

use axum::http::StatusCode;
use helpers::app::{book_ticket, json_request, make_test_app, response_json};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn booking_creates_a_pending_ticket_with_audit_entry() {
    let (app, _db) = make_test_app().await;

    let ticket = book_ticket(&app, "alice@example.com").await;
    assert_eq!(ticket["status"], "pending");
    assert_eq!(ticket["priority"], "medium");
    assert!(ticket["completed_at"].is_null());
    let ticket_id = ticket["id"].as_i64().unwrap();

    // Detail view includes the customer and device.
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/tickets/{ticket_id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["customer"]["email"], "alice@example.com");
    assert_eq!(body["data"]["device"]["device_type"], "laptop");

    // The audit trail starts with the creation entry.
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/tickets/{ticket_id}/history"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0]["old_status"].is_null());
    assert_eq!(history[0]["new_status"], "pending");

    // Valid next statuses follow the transition table.
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/tickets/{ticket_id}/valid-statuses"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["current_status"], "pending");
    assert_eq!(
        body["data"]["valid_next_statuses"],
        json!(["diagnosed", "cancelled"])
    );
    assert_eq!(body["data"]["is_terminal"], false);
}

#[tokio::test]
async fn booking_rejects_invalid_input() {
    let (app, _db) = make_test_app().await;

    let valid = json!({
        "customer_name": "Alice",
        "customer_email": "alice@example.com",
        "customer_phone": "012 345 6789",
        "device_type": "laptop",
        "device_brand": "Lenovo",
        "device_model": "ThinkPad X1",
        "issue_description": "Does not power on"
    });

    let mut bad_email = valid.clone();
    bad_email["customer_email"] = json!("not-an-email");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tickets", None, Some(bad_email)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_device = valid.clone();
    bad_device["device_type"] = json!("toaster");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tickets", None, Some(bad_device)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_priority = valid.clone();
    bad_priority["priority"] = json!("urgent");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tickets", None, Some(bad_priority)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_cost = valid;
    bad_cost["estimated_cost"] = json!(-10.0);
    let response = app
        .oneshot(json_request("POST", "/api/tickets", None, Some(bad_cost)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_ticket_ids_return_not_found() {
    let (app, _db) = make_test_app().await;

    for uri in [
        "/api/tickets/42",
        "/api/tickets/42/history",
        "/api/tickets/42/valid-statuses",
    ] {
        let response = app
            .clone()
            .oneshot(json_request("GET", uri, None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}
