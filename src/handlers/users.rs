use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    auth::{hash_password, issue_token, verify_password},
    error::AppError,
    extract::ValidatedBody,
    models::{LoginRequest, LoginResponse, RegisterUserRequest, User},
    repository::NewUser,
};

/// register_user
///
/// [Public Route] Creates an account. The password is hashed here and only the
/// hash is persisted; the response never contains it.
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Registered", body = User),
        (status = 400, description = "Invalid payload or email already taken")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let new_user = NewUser {
        username: payload.username.map(|name| name.trim().to_string()),
        email: payload.email.trim().to_string(),
        password_hash: hash_password(&payload.password)?,
    };

    let user = state.repo.create_user(new_user).await?;
    tracing::info!(user_id = user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// login_user
///
/// [Public Route] Exchanges email and password for a bearer token. An unknown
/// email and a wrong password get the same 401 so accounts cannot be probed.
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError::Unauthorized("invalid email or password".to_string());

    let user = state
        .repo
        .find_user_by_email(payload.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(invalid());
    }

    let token = issue_token(user.id, &user.email, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse { token }))
}
