use crate::response::ApiResponse;
use crate::routes::common::ticket_error_response;
use crate::routes::tickets::common::{
    HistoryEntryResponse, TicketDetailResponse, TicketResponse,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::ticket::{Model as TicketModel, TicketStatus};
use db::models::ticket_history::Model as HistoryModel;
use db::models::{customer, device};
use db::ticket_engine;
use serde::Serialize;
use util::state::AppState;

/// GET /tickets/{ticket_id}
///
/// Retrieve a single ticket with its customer and device.
///
/// ### Responses
/// - `200 OK` → ticket details
/// - `404 Not Found` → unknown ticket id
pub async fn get_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let ticket = match TicketModel::get_by_id(db, ticket_id).await {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(format!(
                    "Ticket {ticket_id} not found"
                ))),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve ticket")),
            )
                .into_response();
        }
    };

    let customer = customer::Model::find_by_id(db, ticket.customer_id).await;
    let device = device::Model::find_by_id(db, ticket.device_id).await;

    match (customer, device) {
        (Ok(Some(customer)), Ok(Some(device))) => {
            let response = TicketDetailResponse {
                ticket: TicketResponse::from(ticket),
                customer: customer.into(),
                device: device.into(),
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Ticket retrieved successfully",
                )),
            )
                .into_response()
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("Failed to retrieve ticket")),
        )
            .into_response(),
    }
}

/// GET /tickets/{ticket_id}/history
///
/// Full status audit trail for a ticket, oldest entry first. The first
/// entry has `old_status = null`, marking the booking itself.
///
/// ### Responses
/// - `200 OK` → list of history entries
/// - `404 Not Found` → unknown ticket id
pub async fn get_ticket_history(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match TicketModel::get_by_id(db, ticket_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(format!(
                    "Ticket {ticket_id} not found"
                ))),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve ticket")),
            )
                .into_response();
        }
    }

    match HistoryModel::find_for_ticket(db, ticket_id).await {
        Ok(entries) => {
            let history: Vec<HistoryEntryResponse> =
                entries.into_iter().map(HistoryEntryResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    history,
                    "Ticket history retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("Failed to retrieve ticket history")),
        )
            .into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct ValidStatusesResponse {
    pub ticket_id: i64,
    pub current_status: TicketStatus,
    pub valid_next_statuses: Vec<TicketStatus>,
    pub is_terminal: bool,
}

/// GET /tickets/{ticket_id}/valid-statuses
///
/// Legal next statuses for a ticket, for UIs that only want to offer
/// transitions the policy will accept.
///
/// ### Responses
/// - `200 OK` → current status plus legal next statuses
/// - `404 Not Found` → unknown ticket id
pub async fn get_valid_statuses(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match ticket_engine::valid_next_statuses(db, ticket_id).await {
        Ok((current, next)) => {
            let response = ValidStatusesResponse {
                ticket_id,
                current_status: current,
                valid_next_statuses: next.to_vec(),
                is_terminal: current.is_terminal(),
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Valid next statuses retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(err) => ticket_error_response(err),
    }
}
