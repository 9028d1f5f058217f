use axum::{
    extract::{Path, Request, State, rejection::PathRejection},
    middleware::Next,
    response::Response,
};

use crate::{AppState, auth::AuthUser, error::AppError, models::ResourceKind};

/// authenticate
///
/// The Authentication gate. Extracting `AuthUser` rejects the request with 401
/// before anything downstream runs; on success the identity is stored in the
/// request extensions for the Authorization gate and the handler.
pub async fn authenticate(auth_user: AuthUser, mut request: Request, next: Next) -> Response {
    tracing::Span::current().record("user_id", auth_user.id);
    request.extensions_mut().insert(auth_user);
    next.run(request).await
}

/// Authorization gate for `/{id}` routes of the photo family.
pub async fn authorize_photo(
    state: State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(ResourceKind::Photo, state, path, auth_user, request, next).await
}

/// Authorization gate for `/{id}` routes of the comment family.
pub async fn authorize_comment(
    state: State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(ResourceKind::Comment, state, path, auth_user, request, next).await
}

/// Authorization gate for `/{id}` routes of the social media link family.
pub async fn authorize_social_media(
    state: State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(ResourceKind::SocialMedia, state, path, auth_user, request, next).await
}

/// authorize
///
/// The Authorization gate for `/{resource}/{id}` routes: the authenticated subject
/// must own the row. A missing row is 404, someone else's row is 403.
async fn authorize(
    kind: ResourceKind,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Path(id) = path.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let owner = state
        .repo
        .owner_of(kind, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", kind.label())))?;

    if owner != auth_user.id {
        tracing::warn!(
            resource = kind.label(),
            id,
            owner,
            subject = auth_user.id,
            "ownership check failed"
        );
        return Err(AppError::Forbidden(format!(
            "you are not allowed to access this {}",
            kind.label()
        )));
    }

    Ok(next.run(request).await)
}
