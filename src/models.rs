use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::validation::{
    Validate, ValidationErrors, looks_like_email, present, present_if_some,
};

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// A registered account from the `users` table. The password hash is loaded for
/// login checks but never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub email: String,
    #[serde(skip)]
    #[ts(skip)]
    pub password_hash: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Photo
///
/// A photo post from the `photos` table. `user_id` is the owner and is only ever
/// set from the authenticated subject.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub caption: Option<String>,
    pub photo_url: String,
    pub user_id: i64,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Comment
///
/// A comment from the `comments` table, authored by `user_id` on photo `photo_id`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct Comment {
    pub id: i64,
    pub message: String,
    pub user_id: i64,
    pub photo_id: i64,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// SocialMedia
///
/// A social-media link attached to the owner's profile (`social_media` table).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct SocialMedia {
    pub id: i64,
    pub name: String,
    pub social_media_url: String,
    pub user_id: i64,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// ResourceKind
///
/// The owner-scoped resource families guarded by the Authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Photo,
    Comment,
    SocialMedia,
}

impl ResourceKind {
    /// Human-readable name used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Photo => "Photo",
            ResourceKind::Comment => "Comment",
            ResourceKind::SocialMedia => "SocialMedia",
        }
    }
}

// --- Request Payloads (Input Schemas) ---
//
// None of these carry `id` or `user_id`: anything a client sends under those names
// is dropped during binding, so server-assigned fields cannot be overwritten.

/// RegisterUserRequest
///
/// Input payload for `POST /users/register`. The plain password is hashed before
/// it reaches the repository and is never logged.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check(present(&self.email), "email", "Email is required")
            .check(looks_like_email(&self.email), "email", "Email is not valid")
            .check(present(&self.password), "password", "Password is required")
            .check(
                self.password.chars().count() >= MIN_PASSWORD_LEN,
                "password",
                "Password must be at least 6 characters",
            )
            .check(present_if_some(&self.username), "username", "Username must not be blank");
        errors.into_result()
    }
}

/// LoginRequest
///
/// Input payload for `POST /users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check(present(&self.email), "email", "Email is required")
            .check(present(&self.password), "password", "Password is required");
        errors.into_result()
    }
}

/// LoginResponse
///
/// The issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub token: String,
}

/// CreatePhotoRequest
///
/// Input payload for `POST /photo`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct CreatePhotoRequest {
    pub title: String,
    pub caption: Option<String>,
    pub photo_url: String,
}

impl Validate for CreatePhotoRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check(present(&self.title), "title", "Title is required")
            .check(present(&self.photo_url), "photo_url", "Photo URL is required");
        errors.into_result()
    }
}

/// UpdatePhotoRequest
///
/// Partial update for `PUT /photo/{id}`. Omitted fields keep their stored value;
/// a blank `caption` removes the caption.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdatePhotoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Validate for UpdatePhotoRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check(present_if_some(&self.title), "title", "Title must not be blank")
            .check(present_if_some(&self.photo_url), "photo_url", "Photo URL must not be blank");
        errors.into_result()
    }
}

/// CreateCommentRequest
///
/// Input payload for `POST /comment`. `photo_id` must reference an existing photo.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct CreateCommentRequest {
    pub message: String,
    pub photo_id: i64,
}

impl Validate for CreateCommentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check(present(&self.message), "message", "Message is required")
            .check(self.photo_id > 0, "photo_id", "Photo is required");
        errors.into_result()
    }
}

/// UpdateCommentRequest
///
/// Input payload for `PUT /comment/{id}`. Only the message is mutable.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct UpdateCommentRequest {
    pub message: String,
}

impl Validate for UpdateCommentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(present(&self.message), "message", "Message is required");
        errors.into_result()
    }
}

/// CreateSocialMediaRequest
///
/// Input payload for `POST /socialmedia`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct CreateSocialMediaRequest {
    pub name: String,
    pub social_media_url: String,
}

impl Validate for CreateSocialMediaRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check(present(&self.name), "name", "Name is required")
            .check(
                present(&self.social_media_url),
                "social_media_url",
                "Social media URL is required",
            );
        errors.into_result()
    }
}

/// UpdateSocialMediaRequest
///
/// Partial update for `PUT /socialmedia/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateSocialMediaRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_url: Option<String>,
}

impl Validate for UpdateSocialMediaRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check(present_if_some(&self.name), "name", "Name must not be blank")
            .check(
                present_if_some(&self.social_media_url),
                "social_media_url",
                "Social media URL must not be blank",
            );
        errors.into_result()
    }
}

/// MessageResponse
///
/// Plain confirmation body, e.g. `{ "message": "Photo deleted" }`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
