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
    models::{CreatePhotoRequest, MessageResponse, Photo, UpdatePhotoRequest},
};

/// create_photo
///
/// [Authenticated Route] Posts a new photo owned by the caller.
#[utoipa::path(
    post,
    path = "/photo",
    tag = "photo",
    request_body = CreatePhotoRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = Photo),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_photo(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<CreatePhotoRequest>,
) -> Result<(StatusCode, Json<Photo>), AppError> {
    let photo = state.repo.create_photo(user_id, payload).await?;
    tracing::info!(photo_id = photo.id, user_id, "photo created");
    Ok((StatusCode::CREATED, Json(photo)))
}

/// get_photos
///
/// [Authenticated Route] Lists every photo, whoever owns it.
#[utoipa::path(
    get,
    path = "/photo",
    tag = "photo",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All photos", body = [Photo]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_photos(State(state): State<AppState>) -> Result<Json<Vec<Photo>>, AppError> {
    Ok(Json(state.repo.list_photos().await?))
}

/// get_photo
///
/// [Owner Route] Fetches one photo by id. Any request body is ignored.
#[utoipa::path(
    get,
    path = "/photo/{id}",
    tag = "photo",
    params(("id" = i64, Path, description = "Photo ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Found", body = Photo),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Photo>, AppError> {
    state
        .repo
        .get_photo(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))
}

/// update_photo
///
/// [Owner Route] Replaces the title, caption and/or URL. Owner and id never change.
#[utoipa::path(
    put,
    path = "/photo/{id}",
    tag = "photo",
    params(("id" = i64, Path, description = "Photo ID")),
    request_body = UpdatePhotoRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated", body = Photo),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedBody(payload): ValidatedBody<UpdatePhotoRequest>,
) -> Result<Json<Photo>, AppError> {
    state
        .repo
        .update_photo(id, payload)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))
}

/// delete_photo
///
/// [Owner Route] Removes the photo (and, through the schema, its comments).
/// The delete itself is also scoped to the caller's id.
#[utoipa::path(
    delete,
    path = "/photo/{id}",
    tag = "photo",
    params(("id" = i64, Path, description = "Photo ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_photo(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if state.repo.delete_photo(id, user_id).await? {
        tracing::info!(photo_id = id, user_id, "photo deleted");
        Ok(Json(MessageResponse::new("Photo deleted")))
    } else {
        Err(AppError::NotFound("Photo not found".to_string()))
    }
}
