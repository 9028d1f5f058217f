use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    auth::AuthUser,
    error::AppError,
    extract::ValidatedBody,
    models::{CreateSocialMediaRequest, MessageResponse, SocialMedia, UpdateSocialMediaRequest},
};

/// create_social_media
///
/// [Authenticated Route] Adds a social media link to the caller's profile.
#[utoipa::path(
    post,
    path = "/socialmedia",
    tag = "social media",
    request_body = CreateSocialMediaRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = SocialMedia),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_social_media(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<CreateSocialMediaRequest>,
) -> Result<(StatusCode, Json<SocialMedia>), AppError> {
    let social_media = state.repo.create_social_media(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(social_media)))
}

/// get_all_social_media
///
/// [Authenticated Route] Lists every user's social media links.
#[utoipa::path(
    get,
    path = "/socialmedia",
    tag = "social media",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All social media", body = [SocialMedia]))
)]
pub async fn get_all_social_media(
    State(state): State<AppState>,
) -> Result<Json<Vec<SocialMedia>>, AppError> {
    Ok(Json(state.repo.list_social_media().await?))
}

/// get_social_media
///
/// [Owner Route] Fetches one link by id.
#[utoipa::path(
    get,
    path = "/socialmedia/{id}",
    tag = "social media",
    params(("id" = i64, Path, description = "Social media ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Found", body = SocialMedia),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_social_media(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SocialMedia>, AppError> {
    state
        .repo
        .get_social_media(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("SocialMedia not found".to_string()))
}

/// update_social_media
///
/// [Owner Route] Renames the link or changes its URL. Omitted fields are kept.
#[utoipa::path(
    put,
    path = "/socialmedia/{id}",
    tag = "social media",
    params(("id" = i64, Path, description = "Social media ID")),
    request_body = UpdateSocialMediaRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated", body = SocialMedia),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_social_media(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedBody(payload): ValidatedBody<UpdateSocialMediaRequest>,
) -> Result<Json<SocialMedia>, AppError> {
    state
        .repo
        .update_social_media(id, payload)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("SocialMedia not found".to_string()))
}

/// delete_social_media
///
/// [Owner Route] Removes the caller's link.
#[utoipa::path(
    delete,
    path = "/socialmedia/{id}",
    tag = "social media",
    params(("id" = i64, Path, description = "Social media ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_social_media(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if state.repo.delete_social_media(id, user_id).await? {
        Ok(Json(MessageResponse::new("SocialMedia deleted")))
    } else {
        Err(AppError::NotFound("SocialMedia not found".to_string()))
    }
}
