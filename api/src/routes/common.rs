use crate::response::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use db::ticket_engine::TicketError;

/// Maps a lifecycle-engine error onto the uniform response envelope.
///
/// Storage failures are logged and collapsed into an opaque 500; the
/// caller is expected to retry the whole request.
pub fn ticket_error_response(err: TicketError) -> Response {
    let status = match &err {
        TicketError::NotFound { .. } => StatusCode::NOT_FOUND,
        TicketError::InvalidTransition { .. } => StatusCode::CONFLICT,
        TicketError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        TicketError::Unauthorized(_) => StatusCode::FORBIDDEN,
        TicketError::Database(db_err) => {
            tracing::error!(error = %db_err, "storage failure");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Internal server error")),
            )
                .into_response();
        }
    };

    (status, Json(ApiResponse::<()>::error(err.to_string()))).into_response()
}

/// Parses a query-string timestamp: RFC 3339, or a plain `YYYY-MM-DD`
/// taken as midnight UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
