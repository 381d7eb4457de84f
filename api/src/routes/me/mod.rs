//! Customer self-service routes. The whole group is mounted behind
//! `allow_customer`; `claims.sub` is the customer id.
//!
//! - `GET /me` → Profile with unread notification count
//! - `GET /me/tickets` → Own tickets, newest first
//! - `GET /me/notifications` → Own notifications, newest first
//! - `PUT /me/notifications/{notification_id}/read` → Idempotent mark-read

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod get;
pub mod put;

use get::{get_my_notifications, get_my_tickets, get_profile};
use put::mark_notification_read;

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/tickets", get(get_my_tickets))
        .route("/notifications", get(get_my_notifications))
        .route(
            "/notifications/{notification_id}/read",
            put(mark_notification_read),
        )
}
