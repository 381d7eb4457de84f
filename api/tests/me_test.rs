mod helpers;

use axum::http::StatusCode;
use helpers::app::{
    book_ticket, json_request, make_test_app, response_json, seed_admin, seed_customer, transition,
};
use tower::ServiceExt;

#[tokio::test]
async fn me_routes_require_a_customer_token() {
    let (app, db) = make_test_app().await;
    let (_, admin_token) = seed_admin(&db).await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/me", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Staff tokens are not customer tokens.
    let response = app
        .oneshot(json_request("GET", "/api/me", Some(&admin_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_reports_unread_notifications() {
    let (app, db) = make_test_app().await;
    let (_, admin_token) = seed_admin(&db).await;
    let (_, customer_token) = seed_customer(&db, "alice@example.com").await;

    // Booking with the same email attaches the ticket to the account.
    let ticket = book_ticket(&app, "alice@example.com").await;
    let ticket_id = ticket["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/me", Some(&customer_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["unread_notifications"], 0);

    transition(&app, &admin_token, ticket_id, "diagnosed").await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/me", Some(&customer_token), None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["data"]["unread_notifications"], 1);

    let response = app
        .oneshot(json_request("GET", "/api/me/tickets", Some(&customer_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let tickets = body["data"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["status"], "diagnosed");
}

#[tokio::test]
async fn notifications_list_newest_first_and_mark_read_is_idempotent() {
    let (app, db) = make_test_app().await;
    let (_, admin_token) = seed_admin(&db).await;
    let (_, customer_token) = seed_customer(&db, "bob@example.com").await;

    let ticket = book_ticket(&app, "bob@example.com").await;
    let ticket_id = ticket["id"].as_i64().unwrap();
    transition(&app, &admin_token, ticket_id, "diagnosed").await;
    transition(&app, &admin_token, ticket_id, "ready_pickup").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/me/notifications",
            Some(&customer_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let notifications = body["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    // Newest first: the ready_pickup message precedes the diagnosed one.
    assert!(
        notifications[0]["message"]
            .as_str()
            .unwrap()
            .contains("'ready_pickup'")
    );
    assert_eq!(notifications[0]["is_read"], false);
    let notification_id = notifications[0]["id"].as_i64().unwrap();

    // Marking twice succeeds both times and stays read.
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/me/notifications/{notification_id}/read"),
                Some(&customer_token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["data"]["is_read"], true);
    }

    let response = app
        .oneshot(json_request("GET", "/api/me", Some(&customer_token), None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["data"]["unread_notifications"], 1);
}

#[tokio::test]
async fn customers_cannot_touch_each_others_notifications() {
    let (app, db) = make_test_app().await;
    let (_, admin_token) = seed_admin(&db).await;
    let (_, owner_token) = seed_customer(&db, "carol@example.com").await;
    let (_, intruder_token) = seed_customer(&db, "mallory@example.com").await;

    let ticket = book_ticket(&app, "carol@example.com").await;
    transition(&app, &admin_token, ticket["id"].as_i64().unwrap(), "diagnosed").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/me/notifications",
            Some(&owner_token),
            None,
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    let notification_id = body["data"][0]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/me/notifications/{notification_id}/read"),
            Some(&intruder_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/me/notifications/9999/read",
            Some(&owner_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
