//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected by the appropriate
//! access-control middleware:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Admin and customer authentication (public)
//! - `/tickets` → Public booking and ticket lookups
//! - `/admin` → Ticket triage, search, stats, customers (admin-only)
//! - `/me` → Customer profile, tickets and notifications (customer-only)

use crate::auth::guards::{allow_admin, allow_customer};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod admin;
pub mod auth;
pub mod common;
pub mod health;
pub mod me;
pub mod tickets;

/// Builds the complete application router for all HTTP endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest("/tickets", tickets::ticket_routes())
        .nest(
            "/admin",
            admin::admin_routes().route_layer(from_fn(allow_admin)),
        )
        .nest("/me", me::me_routes().route_layer(from_fn(allow_customer)))
        .with_state(app_state)
}
