//! Authentication routes.
//!
//! - `POST /auth/login` → Admin login
//! - `GET  /auth/me` → Current admin info
//! - `POST /auth/customers/register` → Customer signup
//! - `POST /auth/customers/login` → Customer login

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

use get::me;
use post::{admin_login, customer_login, customer_register};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_login))
        .route("/me", get(me))
        .route("/customers/register", post(customer_register))
        .route("/customers/login", post(customer_login))
}
