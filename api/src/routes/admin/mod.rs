//! Admin triage routes. The whole group is mounted behind `allow_admin`.
//!
//! - `GET  /admin/tickets` → Filtered, sorted, paginated ticket search
//! - `PUT  /admin/tickets/{ticket_id}` → Update fields and/or transition status
//! - `POST /admin/tickets/bulk-status` → Per-ticket bulk status update
//! - `GET  /admin/stats` → Dashboard aggregation over the filtered set
//! - `GET  /admin/customers` → Customer list with substring search

use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use get::{dashboard_stats, list_customers, search_tickets};
use post::bulk_update_status;
use put::update_ticket;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/tickets", get(search_tickets))
        .route("/tickets/{ticket_id}", put(update_ticket))
        .route("/tickets/bulk-status", post(bulk_update_status))
        .route("/stats", get(dashboard_stats))
        .route("/customers", get(list_customers))
}
