use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use crate::{error::AppError, validation::Validate};

/// ValidatedBody
///
/// Binds a request payload from JSON when the request declares
/// `Content-Type: application/json`, and from a URL-encoded form otherwise, then
/// runs the payload's `Validate` implementation. Malformed bodies become
/// `AppError::BadRequest`, failed checks `AppError::Validation`.
#[derive(Debug, Clone)]
pub struct ValidatedBody<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = if is_json(req.headers()) {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            payload
        } else {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            payload
        };

        payload.validate()?;
        Ok(Self(payload))
    }
}

/// True when the media type (ignoring parameters such as `charset`) is `application/json`.
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
