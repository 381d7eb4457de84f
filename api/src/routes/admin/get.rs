use crate::response::ApiResponse;
use crate::routes::admin::common::{TicketSearchQuery, build_filter};
use crate::routes::common::ticket_error_response;
use crate::routes::tickets::common::TicketResponse;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use db::models::customer::{Column as CustomerColumn, Entity as CustomerEntity};
use db::models::ticket::Column as TicketColumn;
use db::ticket_engine;
use migration::Expr;
use sea_orm::{Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::state::AppState;

#[derive(Serialize, Default)]
pub struct TicketListResponse {
    pub tickets: Vec<TicketResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /admin/tickets
///
/// Filtered ticket search for the triage dashboard. All filters are
/// conjunctive; absent filters match everything.
///
/// ### Query Parameters
/// - `page` (default 1), `per_page` (default 20, max 100)
/// - `status`, `priority`, `device_type`: exact enum matches
/// - `customer`: case-insensitive substring on customer name or email
/// - `date_from`, `date_to`: `created_at` range (RFC 3339 or `YYYY-MM-DD`)
/// - `sort`: comma-separated fields out of `created_at`, `updated_at`,
///   `status`, `priority`; `-` prefix for descending
///
/// ### Responses
/// - `200 OK` → paginated tickets
/// - `400 Bad Request` → invalid filter or sort field
pub async fn search_tickets(
    State(app_state): State<AppState>,
    Query(params): Query<TicketSearchQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);

    let filter = match build_filter(&params) {
        Ok(filter) => filter,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<TicketListResponse>::error(message)),
            )
                .into_response();
        }
    };

    let valid_fields = ["created_at", "updated_at", "status", "priority"];
    if let Some(sort_param) = &params.sort {
        for field in sort_param.split(',') {
            let field = field.trim().trim_start_matches('-');
            if !valid_fields.contains(&field) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<TicketListResponse>::error(format!(
                        "Invalid sort field: '{field}'"
                    ))),
                )
                    .into_response();
            }
        }
    }

    let mut query = ticket_engine::filtered_query(&filter);

    if let Some(sort_param) = &params.sort {
        for sort in sort_param.split(',') {
            let sort = sort.trim();
            let (field, asc) = if let Some(stripped) = sort.strip_prefix('-') {
                (stripped, false)
            } else {
                (sort, true)
            };

            query = match field {
                "created_at" => {
                    if asc {
                        query.order_by_asc(TicketColumn::CreatedAt)
                    } else {
                        query.order_by_desc(TicketColumn::CreatedAt)
                    }
                }
                "updated_at" => {
                    if asc {
                        query.order_by_asc(TicketColumn::UpdatedAt)
                    } else {
                        query.order_by_desc(TicketColumn::UpdatedAt)
                    }
                }
                "status" => {
                    if asc {
                        query.order_by_asc(TicketColumn::Status)
                    } else {
                        query.order_by_desc(TicketColumn::Status)
                    }
                }
                "priority" => {
                    if asc {
                        query.order_by_asc(TicketColumn::Priority)
                    } else {
                        query.order_by_desc(TicketColumn::Priority)
                    }
                }
                _ => query,
            };
        }
    } else {
        query = query.order_by_desc(TicketColumn::CreatedAt);
    }

    let paginator = query.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(total) => total,
        Err(err) => {
            tracing::error!(error = %err, "error counting tickets");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TicketListResponse>::error(
                    "Error counting tickets",
                )),
            )
                .into_response();
        }
    };

    match paginator.fetch_page(page - 1).await {
        Ok(results) => {
            let tickets: Vec<TicketResponse> =
                results.into_iter().map(TicketResponse::from).collect();
            let response = TicketListResponse {
                tickets,
                page,
                per_page,
                total,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Tickets retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "error fetching tickets");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TicketListResponse>::error(
                    "Failed to retrieve tickets",
                )),
            )
                .into_response()
        }
    }
}

/// GET /admin/stats
///
/// Dashboard aggregation over the (optionally filtered) ticket set:
/// counts by status, counts by priority, and the average estimated cost.
/// An empty set yields zero counts and an average of 0, not an error.
///
/// ### Responses
/// - `200 OK` → statistics payload
/// - `400 Bad Request` → invalid filter value
pub async fn dashboard_stats(
    State(app_state): State<AppState>,
    Query(params): Query<TicketSearchQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let filter = match build_filter(&params) {
        Ok(filter) => filter,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(message)),
            )
                .into_response();
        }
    };

    match ticket_engine::dashboard_stats(db, &filter).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                stats,
                "Statistics retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => ticket_error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Case-insensitive substring on name or email.
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerListItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Serialize, Default)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerListItem>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /admin/customers
///
/// Paginated customer list with optional substring search on name or
/// email, newest accounts first.
///
/// ### Responses
/// - `200 OK` → paginated customers
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(params): Query<ListCustomersQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);

    let mut condition = Condition::all();
    if let Some(q) = &params.query {
        let pattern = format!("%{}%", q.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(Expr::cust("LOWER(name)").like(&pattern))
                .add(Expr::cust("LOWER(email)").like(&pattern)),
        );
    }

    let paginator = CustomerEntity::find()
        .filter(condition)
        .order_by_desc(CustomerColumn::CreatedAt)
        .order_by_desc(CustomerColumn::Id)
        .paginate(db, per_page);

    let total = match paginator.num_items().await {
        Ok(total) => total,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CustomerListResponse>::error(
                    "Error counting customers",
                )),
            )
                .into_response();
        }
    };

    match paginator.fetch_page(page - 1).await {
        Ok(results) => {
            let customers = results
                .into_iter()
                .map(|customer| CustomerListItem {
                    id: customer.id,
                    name: customer.name,
                    email: customer.email,
                    phone: customer.phone,
                    is_active: customer.is_active,
                    created_at: customer.created_at,
                    last_login: customer.last_login,
                })
                .collect();
            let response = CustomerListResponse {
                customers,
                page,
                per_page,
                total,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    response,
                    "Customers retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CustomerListResponse>::error(
                "Failed to retrieve customers",
            )),
        )
            .into_response(),
    }
}
