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
    models::{Comment, CreateCommentRequest, MessageResponse, UpdateCommentRequest},
};

/// create_comment
///
/// [Authenticated Route] Comments on an existing photo. The photo is looked up
/// first so a dangling `photo_id` is a 404 and nothing is inserted.
#[utoipa::path(
    post,
    path = "/comment",
    tag = "comment",
    request_body = CreateCommentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = Comment),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Photo not found")
    )
)]
pub async fn create_comment(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    if state.repo.get_photo(payload.photo_id).await?.is_none() {
        return Err(AppError::NotFound("photo not found".to_string()));
    }

    let comment = state.repo.create_comment(user_id, payload).await?;
    tracing::info!(comment_id = comment.id, photo_id = comment.photo_id, user_id, "comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

/// get_comments
///
/// [Authenticated Route] Lists every comment on every photo.
#[utoipa::path(
    get,
    path = "/comment",
    tag = "comment",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All comments", body = [Comment]))
)]
pub async fn get_comments(State(state): State<AppState>) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.repo.list_comments().await?))
}

/// get_comment
///
/// [Owner Route] Fetches one comment by id.
#[utoipa::path(
    get,
    path = "/comment/{id}",
    tag = "comment",
    params(("id" = i64, Path, description = "Comment ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Found", body = Comment),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Comment>, AppError> {
    state
        .repo
        .get_comment(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
}

/// update_comment
///
/// [Owner Route] Rewrites the message. The target photo cannot be changed.
#[utoipa::path(
    put,
    path = "/comment/{id}",
    tag = "comment",
    params(("id" = i64, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated", body = Comment),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedBody(payload): ValidatedBody<UpdateCommentRequest>,
) -> Result<Json<Comment>, AppError> {
    state
        .repo
        .update_comment(id, payload)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
}

/// delete_comment
///
/// [Owner Route] Removes the caller's comment.
#[utoipa::path(
    delete,
    path = "/comment/{id}",
    tag = "comment",
    params(("id" = i64, Path, description = "Comment ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_comment(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if state.repo.delete_comment(id, user_id).await? {
        Ok(Json(MessageResponse::new("Comment deleted")))
    } else {
        Err(AppError::NotFound("Comment not found".to_string()))
    }
}
