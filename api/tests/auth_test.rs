mod helpers;

use axum::http::StatusCode;
use helpers::app::{book_ticket, json_request, make_test_app, response_json, seed_admin, seed_customer};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn admin_login_issues_a_usable_token() {
    let (app, db) = make_test_app().await;
    seed_admin(&db).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "admin123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "admin");
    let token = body["data"]["token"].as_str().unwrap().to_owned();

    let response = app
        .oneshot(json_request("GET", "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["full_name"], "System Administrator");
}

#[tokio::test]
async fn admin_login_rejects_bad_credentials() {
    let (app, db) = make_test_app().await;
    seed_admin(&db).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "wrong" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "", "password": "admin123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn customer_can_register_and_login() {
    let (app, _db) = make_test_app().await;

    let signup = json!({
        "name": "Alice",
        "email": "alice@example.com",
        "phone": "012 345 6789",
        "password": "longenough1"
    });

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/customers/register",
            None,
            Some(signup.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert!(body["data"]["token"].as_str().is_some());

    // Registering the same email twice conflicts.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/customers/register",
            None,
            Some(signup),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/customers/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "longenough1" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/customers/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "nope-nope" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn walk_in_customer_can_claim_their_account() {
    let (app, _db) = make_test_app().await;

    // Booking creates a customer record without credentials.
    book_ticket(&app, "walkin@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/customers/register",
            None,
            Some(json!({
                "name": "Walk In",
                "email": "walkin@example.com",
                "phone": "012 345 6789",
                "password": "longenough1"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/customers/login",
            None,
            Some(json!({ "email": "walkin@example.com", "password": "longenough1" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_me_rejects_missing_and_customer_tokens() {
    let (app, db) = make_test_app().await;
    let (_, customer_token) = seed_customer(&db, "bob@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/auth/me", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request("GET", "/api/auth/me", Some(&customer_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
