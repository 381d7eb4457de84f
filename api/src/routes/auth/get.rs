use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::admin;
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct AdminInfoResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub created_at: String,
    pub last_login: Option<String>,
}

/// GET /auth/me
///
/// Return the currently authenticated admin's account details.
///
/// ### Responses
/// - `200 OK` → admin info
/// - `401 Unauthorized` → missing or invalid token
/// - `403 Forbidden` → customer token used on an admin endpoint
pub async fn me(State(app_state): State<AppState>, AuthUser(claims): AuthUser) -> impl IntoResponse {
    let db = app_state.db();

    if !claims.admin {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<AdminInfoResponse>::error("Admin access required")),
        )
            .into_response();
    }

    match admin::Model::find_by_id(db, claims.sub).await {
        Ok(Some(found)) => {
            let response = AdminInfoResponse {
                id: found.id,
                username: found.username,
                full_name: found.full_name,
                email: found.email,
                created_at: found.created_at.to_rfc3339(),
                last_login: found.last_login.map(|at| at.to_rfc3339()),
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Admin retrieved successfully")),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<AdminInfoResponse>::error("Admin not found")),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AdminInfoResponse>::error(
                "Failed to retrieve admin",
            )),
        )
            .into_response(),
    }
}
