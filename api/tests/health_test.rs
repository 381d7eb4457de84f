mod helpers;

use axum::http::StatusCode;
use helpers::app::{json_request, make_test_app, response_json};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok_json() {
    let (app, _db) = make_test_app().await;

    let response = app
        .oneshot(json_request("GET", "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
    assert_eq!(json["message"], "Health check passed");
}
