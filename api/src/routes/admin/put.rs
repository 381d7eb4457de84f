use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ticket_error_response;
use crate::routes::tickets::common::TicketResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::admin;
use db::models::ticket::{TicketPriority, TicketStatus};
use db::ticket_engine::{self, TicketUpdate};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTicketRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,

    #[validate(range(min = 0.0, message = "Estimated cost cannot be negative"))]
    pub estimated_cost: Option<f64>,

    #[validate(range(min = 0.0, message = "Actual cost cannot be negative"))]
    pub actual_cost: Option<f64>,
}

/// PUT /admin/tickets/{ticket_id}
///
/// Partial ticket update. Non-status fields apply unconditionally; a
/// requested status must pass the transition policy or the whole update
/// is rejected, leaving every field untouched. A committed status change
/// appends one history entry and one customer notification.
///
/// ### Responses
/// - `200 OK` → updated ticket
/// - `400 Bad Request` → validation failure or unknown status/priority value
/// - `404 Not Found` → unknown ticket id
/// - `409 Conflict` → transition not permitted from the current status
pub async fn update_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<UpdateTicketRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<TicketResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        )
            .into_response();
    }

    let status = match req.status.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<TicketStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<TicketResponse>::error(format!(
                        "Invalid status: '{raw}'"
                    ))),
                )
                    .into_response();
            }
        },
    };

    let priority = match req.priority.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<TicketPriority>() {
            Ok(priority) => Some(priority),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<TicketResponse>::error(format!(
                        "Invalid priority: '{raw}'. Must be one of: low, medium, high"
                    ))),
                )
                    .into_response();
            }
        },
    };

    // Audit entries carry the acting admin's username.
    let changed_by = match admin::Model::find_by_id(db, claims.sub).await {
        Ok(found) => found.map(|a| a.username),
        Err(_) => None,
    };

    let update = TicketUpdate {
        status,
        priority,
        notes: req.notes,
        estimated_cost: req.estimated_cost,
        actual_cost: req.actual_cost,
        changed_by,
    };

    match ticket_engine::update_ticket(db, ticket_id, update).await {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::<TicketResponse>::success(
                ticket.into(),
                "Ticket updated successfully",
            )),
        )
            .into_response(),
        Err(err) => ticket_error_response(err),
    }
}
