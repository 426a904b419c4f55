use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Authentication Types =============

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub id: i64,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub question: String,
    pub answer: String,
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub new_username: String,
    pub new_email: String,
    pub password: String,
}

/// JWT claims carried by a session token.
///
/// `sub` is the numeric user id; `iat`/`exp` are unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub iat: i64,
    pub exp: i64,
}

// ============= Shopping List Types =============

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShoppingListRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShoppingListResponse {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: i64,
    pub list_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Pagination metadata attached to paginated item listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub has_next: bool,
    pub has_prev: bool,
    pub total_items: i64,
    pub number_of_pages: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

// ============= Error Types =============

/// Application error taxonomy.
///
/// Every variant is terminal for the current request; nothing is retried
/// internally. The token messages mirror the wording clients have depended
/// on since the first release, including the odd `TokenRevoked` copy (see
/// DESIGN.md).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid token. Please log in again.")]
    InvalidToken,

    #[error("Signature expired. Please log in again.")]
    ExpiredToken,

    #[error("Token created. Please log in again.")]
    TokenRevoked,

    #[error("Authorization is not provided")]
    MissingAuthorization,

    #[error("Bearer token malformed.")]
    MalformedAuthorization,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid security question, please try again!")]
    InvalidSecurityQuestion,

    #[error("Invalid password!!")]
    InvalidOldPassword,

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Validation(String),

    #[error("Requested value '{0}' was not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        // All authentication failures map to 401, including the missing
        // header case the upstream API reported as 500. Validation and the
        // reset-flow mismatches are 400, duplicates 409.
        let status = match &self {
            AppError::InvalidToken
            | AppError::ExpiredToken
            | AppError::TokenRevoked
            | AppError::MissingAuthorization
            | AppError::MalformedAuthorization
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidSecurityQuestion
            | AppError::InvalidOldPassword
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Never leak schema or query details to the client.
        let message = match &self {
            AppError::Database(detail) | AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "status": "fail",
            "message": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
