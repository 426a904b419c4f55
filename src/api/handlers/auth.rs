//! Authentication handlers: register, login, logout.

use crate::{
    auth::middleware::BearerToken,
    types::{
        AppError, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Result,
    },
    utils::validate::{validate_email, validate_field},
    AppState,
};
use axum::{extract::State, Json};

/// Welcome banner for the API root.
pub async fn welcome() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to Shopping List API" }))
}

/// Register a new user account.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User account created", body = RegisterResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Account already exists")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    validate_field("username", &payload.username, 4)?;
    validate_field("password", &payload.password, 6)?;
    validate_field("question", &payload.question, 10)?;
    validate_email(&payload.email)?;
    if payload.answer.trim().is_empty() {
        return Err(AppError::Validation("answer can't be empty".to_string()));
    }
    if payload.password != payload.confirm_password {
        return Err(AppError::Validation("Password does not match".to_string()));
    }

    // Email is the login key and stored lowercased; the security question
    // and answer are lowercased so the reset flow can compare exactly.
    let email = payload.email.trim().to_lowercase();
    let question = payload.question.to_lowercase();
    let answer = payload.answer.to_lowercase();

    if state.store.get_user_by_email(&email).await?.is_some() {
        return Err(AppError::Duplicate(
            "User account already exists.".to_string(),
        ));
    }

    let password_hash = state.auth.hash_password(&payload.password)?;
    let id = state
        .store
        .create_user(&payload.username, &email, &password_hash, &question, &answer)
        .await?;

    tracing::info!(user_id = id, "user registered");

    Ok(Json(RegisterResponse {
        id,
        username: payload.username,
        email,
        message: "User account created successfully".to_string(),
    }))
}

/// Login with email and password, receiving a session token.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = payload.email.trim().to_lowercase();

    // An unknown email and a wrong password take the same exit so clients
    // cannot enumerate registered accounts.
    let user = state
        .store
        .get_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !state
        .auth
        .verify_password(&payload.password, &user.password_hash)?
    {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.auth.encode_token(user.id)?;

    Ok(Json(LoginResponse {
        id: user.id,
        token,
        message: "Successfully logged in.".to_string(),
    }))
}

/// Logout, permanently invalidating the presented token.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Invalid, expired, or revoked token")
    ),
    tag = "auth",
    security(("bearer" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<serde_json::Value>> {
    // The gate has already vetted this token; recording the exact string in
    // the ledger makes it unusable from now on. Ledger entries are never
    // removed.
    state.store.revoke_token(&token).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Successfully logged out."
    })))
}
