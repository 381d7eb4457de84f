use crate::response::ApiResponse;
use crate::routes::common::ticket_error_response;
use crate::routes::tickets::common::TicketResponse;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::device::DeviceType;
use db::models::ticket::TicketPriority;
use db::ticket_engine::{self, NewTicket};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, message = "Customer name cannot be empty"))]
    pub customer_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub customer_email: String,

    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub customer_phone: String,

    pub device_type: String,

    #[validate(length(min = 1, message = "Device brand cannot be empty"))]
    pub device_brand: String,

    #[validate(length(min = 1, message = "Device model cannot be empty"))]
    pub device_model: String,

    #[validate(length(min = 1, message = "Issue description cannot be empty"))]
    pub issue_description: String,

    pub serial_number: Option<String>,
    pub priority: Option<String>,

    #[validate(range(min = 0.0, message = "Estimated cost cannot be negative"))]
    pub estimated_cost: Option<f64>,

    pub notes: Option<String>,
}

/// POST /tickets
///
/// Book a new repair. Reuses the customer record when the email is
/// already known, creates the device, and opens the ticket in `pending`
/// with its initial history entry.
///
/// ### Responses
/// - `201 Created` → the new ticket
/// - `400 Bad Request` → validation failure or unknown device type/priority
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Json(req): Json<CreateTicketRequest>,
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

    let Ok(device_type) = req.device_type.parse::<DeviceType>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<TicketResponse>::error(format!(
                "Invalid device type: '{}'",
                req.device_type
            ))),
        )
            .into_response();
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

    let input = NewTicket {
        customer_name: req.customer_name,
        customer_email: req.customer_email,
        customer_phone: req.customer_phone,
        device_type,
        device_brand: req.device_brand,
        device_model: req.device_model,
        issue_description: req.issue_description,
        serial_number: req.serial_number,
        priority,
        estimated_cost: req.estimated_cost,
        notes: req.notes,
    };

    match ticket_engine::create_ticket(db, input).await {
        Ok(ticket) => (
            StatusCode::CREATED,
            Json(ApiResponse::<TicketResponse>::success(
                ticket.into(),
                "Ticket created successfully",
            )),
        )
            .into_response(),
        Err(err) => ticket_error_response(err),
    }
}
