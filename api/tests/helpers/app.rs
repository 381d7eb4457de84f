use api::auth::generate_jwt;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use ctor::ctor;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use util::state::AppState;

#[ctor]
fn setup_test_env() {
    unsafe {
        std::env::set_var("DATABASE_PATH", ":memory:");
        std::env::set_var("JWT_SECRET", "test-secret");
        std::env::set_var("JWT_DURATION_MINUTES", "60");
        std::env::set_var("APP_ENV", "test");
    }
}

/// Builds a full router over a fresh in-memory database. Each call gets
/// its own database, so tests are isolated from one another.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = db::test_utils::setup_test_db().await;
    let app_state = AppState::new(db.clone());
    let router = Router::new().nest("/api", api::routes::routes(app_state));
    (router, db)
}

pub async fn seed_admin(db: &DatabaseConnection) -> (i64, String) {
    let admin = db::models::admin::Model::create(
        db,
        "admin",
        "admin@fixit.local",
        "admin123",
        "System Administrator",
    )
    .await
    .expect("Failed to seed admin");
    let (token, _) = generate_jwt(admin.id, true);
    (admin.id, token)
}

pub async fn seed_customer(db: &DatabaseConnection, email: &str) -> (i64, String) {
    let customer = db::models::customer::Model::create(
        db,
        "Test Customer",
        email,
        "012 345 6789",
        Some("password123"),
    )
    .await
    .expect("Failed to seed customer");
    let (token, _) = generate_jwt(customer.id, false);
    (customer.id, token)
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Books a ticket through the public endpoint and returns the response
/// body's `data` payload.
pub async fn book_ticket(app: &Router, email: &str) -> Value {
    let body = serde_json::json!({
        "customer_name": "Test Customer",
        "customer_email": email,
        "customer_phone": "012 345 6789",
        "device_type": "laptop",
        "device_brand": "Lenovo",
        "device_model": "ThinkPad X1",
        "issue_description": "Does not power on"
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tickets", None, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    json["data"].clone()
}

/// Drives one status transition through the admin endpoint, asserting it
/// succeeds.
pub async fn transition(app: &Router, admin_token: &str, ticket_id: i64, status: &str) {
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/tickets/{ticket_id}"),
            Some(admin_token),
            Some(serde_json::json!({ "status": status })),
        ))
        .await
        .unwrap();
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "transition to {status} failed"
    );
}
