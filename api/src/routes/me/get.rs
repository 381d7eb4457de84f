use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::tickets::common::TicketResponse;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use db::models::customer::Model as CustomerModel;
use db::models::notification::Model as NotificationModel;
use db::models::ticket::Model as TicketModel;
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub unread_notifications: u64,
}

/// GET /me
///
/// Current customer profile, including the number of unread
/// notifications for the badge in the customer portal.
///
/// ### Responses
/// - `200 OK` → profile payload
/// - `404 Not Found` → account no longer exists
pub async fn get_profile(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    let customer = match CustomerModel::find_by_id(db, claims.sub).await {
        Ok(Some(customer)) => customer,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Customer not found")),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve profile")),
            )
                .into_response();
        }
    };

    let unread = match NotificationModel::unread_count(db, customer.id).await {
        Ok(unread) => unread,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve profile")),
            )
                .into_response();
        }
    };

    let response = ProfileResponse {
        id: customer.id,
        name: customer.name,
        email: customer.email,
        phone: customer.phone,
        is_active: customer.is_active,
        created_at: customer.created_at,
        last_login: customer.last_login,
        unread_notifications: unread,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            response,
            "Profile retrieved successfully",
        )),
    )
        .into_response()
}

/// GET /me/tickets
///
/// All tickets belonging to the current customer, newest first.
pub async fn get_my_tickets(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    match TicketModel::find_for_customer(db, claims.sub).await {
        Ok(tickets) => {
            let tickets: Vec<TicketResponse> =
                tickets.into_iter().map(TicketResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    tickets,
                    "Tickets retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("Failed to retrieve tickets")),
        )
            .into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: i64,
    pub ticket_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// GET /me/notifications
///
/// All notifications for the current customer, newest first.
pub async fn get_my_notifications(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    match NotificationModel::find_for_customer(db, claims.sub).await {
        Ok(notifications) => {
            let notifications: Vec<NotificationResponse> = notifications
                .into_iter()
                .map(|notification| NotificationResponse {
                    id: notification.id,
                    ticket_id: notification.ticket_id,
                    message: notification.message,
                    is_read: notification.is_read,
                    created_at: notification.created_at,
                })
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    notifications,
                    "Notifications retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("Failed to retrieve notifications")),
        )
            .into_response(),
    }
}
