use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::admin;
use db::models::ticket::TicketStatus;
use db::ticket_engine::{self, BulkUpdateOutcome};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct BulkStatusUpdateRequest {
    #[validate(length(min = 1, message = "ticket_ids cannot be empty"))]
    pub ticket_ids: Vec<i64>,
    pub status: String,
}

#[derive(Debug, Serialize, Default)]
pub struct BulkUpdateResponse {
    pub results: Vec<BulkUpdateOutcome>,
    pub requested: usize,
    pub succeeded: usize,
}

/// POST /admin/tickets/bulk-status
///
/// Apply one target status to many tickets. Each ticket goes through the
/// full transition pipeline independently; a rejection is reported for
/// that ticket without failing the batch.
///
/// ### Responses
/// - `200 OK` → per-ticket success/failure report
/// - `400 Bad Request` → empty id list or unknown status value
pub async fn bulk_update_status(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<BulkStatusUpdateRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<BulkUpdateResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        )
            .into_response();
    }

    let Ok(target) = req.status.parse::<TicketStatus>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<BulkUpdateResponse>::error(format!(
                "Invalid status: '{}'",
                req.status
            ))),
        )
            .into_response();
    };

    let changed_by = match admin::Model::find_by_id(db, claims.sub).await {
        Ok(found) => found.map(|a| a.username),
        Err(_) => None,
    };

    let results =
        ticket_engine::bulk_update_status(db, &req.ticket_ids, target, changed_by.as_deref())
            .await;
    let succeeded = results.iter().filter(|outcome| outcome.success).count();
    let response = BulkUpdateResponse {
        requested: results.len(),
        succeeded,
        results,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            response,
            "Bulk status update processed",
        )),
    )
        .into_response()
}
