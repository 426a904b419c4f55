//! Account management handlers: password reset and account info.

use crate::{
    auth::middleware::AuthUser,
    types::{AppError, ResetPasswordRequest, Result, UpdateAccountRequest},
    utils::validate::{validate_email, validate_field},
    AppState,
};
use axum::{extract::State, Json};

/// Reset the password, gated on the account's security question.
#[utoipa::path(
    post,
    path = "/v1/resetpassword",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset"),
        (status = 400, description = "Security question or old password mismatch"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "user",
    security(("bearer" = []))
)]
pub async fn reset_password(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>> {
    validate_field("new_password", &payload.new_password, 6)?;

    let user = state
        .store
        .get_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound(claims.sub.to_string()))?;

    // Question and answer are stored lowercased; compare exactly.
    if user.question != payload.question.to_lowercase()
        || user.answer != payload.answer.to_lowercase()
    {
        return Err(AppError::InvalidSecurityQuestion);
    }

    if !state
        .auth
        .verify_password(&payload.old_password, &user.password_hash)?
    {
        return Err(AppError::InvalidOldPassword);
    }

    let new_hash = state.auth.hash_password(&payload.new_password)?;
    state.store.update_password(user.id, &new_hash).await?;

    tracing::info!(user_id = user.id, "password reset");

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Your password was reset successfully"
    })))
}

/// Return the authenticated user's account info.
#[utoipa::path(
    get,
    path = "/v1/user",
    responses(
        (status = 200, description = "Account info"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "user",
    security(("bearer" = []))
)]
pub async fn get_account(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>> {
    let user = state
        .store
        .get_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound(claims.sub.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "username": user.username,
        "email": user.email
    })))
}

/// Update username and email; requires the current password.
#[utoipa::path(
    put,
    path = "/v1/user",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated"),
        (status = 400, description = "Wrong password or invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "user",
    security(("bearer" = []))
)]
pub async fn update_account(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<serde_json::Value>> {
    validate_field("new_username", &payload.new_username, 4)?;
    validate_email(&payload.new_email)?;

    let user = state
        .store
        .get_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound(claims.sub.to_string()))?;

    if !state
        .auth
        .verify_password(&payload.password, &user.password_hash)?
    {
        return Err(AppError::Validation(
            "You need your password to update account info.".to_string(),
        ));
    }

    let new_email = payload.new_email.trim().to_lowercase();

    if new_email != user.email && state.store.get_user_by_email(&new_email).await?.is_some() {
        return Err(AppError::Duplicate(
            "User account already exists.".to_string(),
        ));
    }

    state
        .store
        .update_account(user.id, &payload.new_username, &new_email)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Account information changed successfully",
        "new_username": payload.new_username,
        "new_email": new_email
    })))
}
