//! Public ticket routes.
//!
//! - `POST /tickets` → Book a new repair
//! - `GET  /tickets/{ticket_id}` → Ticket details with customer and device
//! - `GET  /tickets/{ticket_id}/history` → Status audit trail, oldest first
//! - `GET  /tickets/{ticket_id}/valid-statuses` → Legal next statuses
//!
//! Triage operations (status updates, search, stats) live under `/admin`.

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;

use get::{get_ticket, get_ticket_history, get_valid_statuses};
use post::create_ticket;

pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ticket))
        .route("/{ticket_id}", get(get_ticket))
        .route("/{ticket_id}/history", get(get_ticket_history))
        .route("/{ticket_id}/valid-statuses", get(get_valid_statuses))
}
