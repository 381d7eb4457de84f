use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::{admin, customer};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AdminAuthResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/login
///
/// Authenticate an admin and issue a JWT.
///
/// ### Responses
/// - `200 OK` → token payload
/// - `400 Bad Request` → validation failure
/// - `401 Unauthorized` → unknown username or wrong password
/// - `403 Forbidden` → account deactivated
pub async fn admin_login(
    State(app_state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AdminAuthResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        )
            .into_response();
    }

    let found = match admin::Model::verify_credentials(db, &req.username, &req.password).await {
        Ok(found) => found,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AdminAuthResponse>::error("Database error")),
            )
                .into_response();
        }
    };

    let Some(found) = found else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<AdminAuthResponse>::error(
                "Incorrect username or password",
            )),
        )
            .into_response();
    };

    if !found.is_active {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<AdminAuthResponse>::error(
                "Admin account is inactive",
            )),
        )
            .into_response();
    }

    let _ = admin::Model::touch_last_login(db, found.id).await;

    let (token, expires_at) = generate_jwt(found.id, true);
    let response = AdminAuthResponse {
        id: found.id,
        username: found.username,
        full_name: found.full_name,
        email: found.email,
        token,
        expires_at,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "Login successful")),
    )
        .into_response()
}

#[derive(Debug, Deserialize, Validate)]
pub struct CustomerRegisterRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct CustomerAuthResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/customers/register
///
/// Register a new customer account. A walk-in customer record with the
/// same email but no credentials is claimed by attaching the password to
/// it rather than rejected.
///
/// ### Responses
/// - `201 Created` → token payload
/// - `400 Bad Request` → validation failure
/// - `409 Conflict` → email already registered
pub async fn customer_register(
    State(app_state): State<AppState>,
    Json(req): Json<CustomerRegisterRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CustomerAuthResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        )
            .into_response();
    }

    let existing = match customer::Model::find_by_email(db, &req.email).await {
        Ok(existing) => existing,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CustomerAuthResponse>::error("Database error")),
            )
                .into_response();
        }
    };

    let created = match existing {
        Some(record) if record.password_hash.is_some() => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<CustomerAuthResponse>::error(
                    "Email already registered",
                )),
            )
                .into_response();
        }
        Some(record) => customer::Model::set_password(db, record.id, &req.password).await,
        None => {
            customer::Model::create(db, &req.name, &req.email, &req.phone, Some(&req.password))
                .await
        }
    };

    match created {
        Ok(record) => {
            let (token, expires_at) = generate_jwt(record.id, false);
            let response = CustomerAuthResponse {
                id: record.id,
                name: record.name,
                email: record.email,
                token,
                expires_at,
            };
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(response, "Account created successfully")),
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CustomerAuthResponse>::error(
                "Failed to create account",
            )),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CustomerLoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// POST /auth/customers/login
///
/// Authenticate a customer and issue a JWT.
///
/// ### Responses
/// - `200 OK` → token payload
/// - `400 Bad Request` → validation failure
/// - `401 Unauthorized` → unknown email or wrong password
/// - `403 Forbidden` → account deactivated
pub async fn customer_login(
    State(app_state): State<AppState>,
    Json(req): Json<CustomerLoginRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CustomerAuthResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        )
            .into_response();
    }

    let found = match customer::Model::verify_credentials(db, &req.email, &req.password).await {
        Ok(found) => found,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CustomerAuthResponse>::error("Database error")),
            )
                .into_response();
        }
    };

    let Some(found) = found else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<CustomerAuthResponse>::error(
                "Incorrect email or password",
            )),
        )
            .into_response();
    };

    if !found.is_active {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<CustomerAuthResponse>::error(
                "Account is inactive",
            )),
        )
            .into_response();
    }

    let _ = customer::Model::touch_last_login(db, found.id).await;

    let (token, expires_at) = generate_jwt(found.id, false);
    let response = CustomerAuthResponse {
        id: found.id,
        name: found.name,
        email: found.email,
        token,
        expires_at,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "Login successful")),
    )
        .into_response()
}
