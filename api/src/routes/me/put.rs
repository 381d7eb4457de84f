use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ticket_error_response;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::ticket_engine;
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub id: i64,
    pub is_read: bool,
}

/// PUT /me/notifications/{notification_id}/read
///
/// Mark one of the current customer's notifications as read. Idempotent:
/// re-marking an already-read notification succeeds without effect.
///
/// ### Responses
/// - `200 OK` → `{ "id": 5, "is_read": true }`
/// - `403 Forbidden` → notification belongs to another customer
/// - `404 Not Found` → unknown notification id
pub async fn mark_notification_read(
    State(app_state): State<AppState>,
    Path(notification_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    match ticket_engine::mark_notification_read(db, notification_id, claims.sub).await {
        Ok(notification) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                MarkReadResponse {
                    id: notification.id,
                    is_read: notification.is_read,
                },
                "Notification marked as read",
            )),
        )
            .into_response(),
        Err(err) => ticket_error_response(err),
    }
}
