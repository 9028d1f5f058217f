#![allow(dead_code)]

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::error::{DatabaseError, ErrorKind};
use mygram_api::{
    AppConfig, AppState,
    auth::{hash_password, issue_token},
    models::{
        Comment, CreateCommentRequest, CreatePhotoRequest, CreateSocialMediaRequest, Photo,
        ResourceKind, SocialMedia, UpdateCommentRequest, UpdatePhotoRequest,
        UpdateSocialMediaRequest, User,
    },
    repository::{NewUser, RepoResult, Repository},
};

pub const TEST_SECRET: &str = "test-secret-value-1234567890";

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    photos: Vec<Photo>,
    comments: Vec<Comment>,
    social_media: Vec<SocialMedia>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// An in-memory stand-in for Postgres. Enforces the same unique email constraint
/// and photo cascade as the real schema so handler behaviour matches.
#[derive(Default, Clone)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photo_count(&self) -> usize {
        self.tables.lock().unwrap().photos.len()
    }

    pub fn comment_count(&self) -> usize {
        self.tables.lock().unwrap().comments.len()
    }

    pub fn social_media_count(&self) -> usize {
        self.tables.lock().unwrap().social_media.len()
    }

    pub fn photo(&self, id: i64) -> Option<Photo> {
        self.tables
            .lock()
            .unwrap()
            .photos
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Inserts a user directly, bypassing the HTTP layer.
    pub fn seed_user(&self, email: &str, password: &str) -> User {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let user = User {
            id,
            username: None,
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        user
    }

    pub fn seed_photo(&self, user_id: i64, title: &str) -> Photo {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let photo = Photo {
            id,
            title: title.to_string(),
            caption: None,
            photo_url: format!("https://img.example.com/{id}.jpg"),
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.photos.push(photo.clone());
        photo
    }

    pub fn seed_comment(&self, user_id: i64, photo_id: i64, message: &str) -> Comment {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let comment = Comment {
            id,
            message: message.to_string(),
            user_id,
            photo_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(comment.clone());
        comment
    }

    pub fn seed_social_media(&self, user_id: i64, name: &str) -> SocialMedia {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let social_media = SocialMedia {
            id,
            name: name.to_string(),
            social_media_url: format!("https://social.example.com/{name}"),
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.social_media.push(social_media.clone());
        social_media
    }
}

/// Mirrors the error Postgres raises for a duplicate `users.email`.
#[derive(Debug)]
struct UniqueViolation;

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for UniqueViolation {}

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint \"users_email_key\""
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

fn unique_violation() -> sqlx::Error {
    sqlx::Error::Database(Box::new(UniqueViolation))
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create_user(&self, user: NewUser) -> RepoResult<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(unique_violation());
        }
        let id = tables.next_id();
        let now = Utc::now();
        let created = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn owner_of(&self, kind: ResourceKind, id: i64) -> RepoResult<Option<i64>> {
        let tables = self.tables.lock().unwrap();
        Ok(match kind {
            ResourceKind::Photo => tables.photos.iter().find(|r| r.id == id).map(|r| r.user_id),
            ResourceKind::Comment => tables.comments.iter().find(|r| r.id == id).map(|r| r.user_id),
            ResourceKind::SocialMedia => tables
                .social_media
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.user_id),
        })
    }

    async fn create_photo(&self, user_id: i64, req: CreatePhotoRequest) -> RepoResult<Photo> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let photo = Photo {
            id,
            title: req.title,
            caption: req.caption,
            photo_url: req.photo_url,
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.photos.push(photo.clone());
        Ok(photo)
    }

    async fn get_photo(&self, id: i64) -> RepoResult<Option<Photo>> {
        Ok(self.photo(id))
    }

    async fn list_photos(&self) -> RepoResult<Vec<Photo>> {
        Ok(self.tables.lock().unwrap().photos.clone())
    }

    async fn update_photo(&self, id: i64, req: UpdatePhotoRequest) -> RepoResult<Option<Photo>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.photos.iter_mut().find(|p| p.id == id).map(|photo| {
            if let Some(title) = req.title {
                photo.title = title;
            }
            if let Some(caption) = req.caption {
                photo.caption = Some(caption).filter(|c| !c.trim().is_empty());
            }
            if let Some(url) = req.photo_url {
                photo.photo_url = url;
            }
            photo.updated_at = Utc::now();
            photo.clone()
        }))
    }

    async fn delete_photo(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.photos.len();
        tables.photos.retain(|p| !(p.id == id && p.user_id == user_id));
        let removed = tables.photos.len() < before;
        if removed {
            tables.comments.retain(|c| c.photo_id != id);
        }
        Ok(removed)
    }

    async fn create_comment(&self, user_id: i64, req: CreateCommentRequest) -> RepoResult<Comment> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let comment = Comment {
            id,
            message: req.message,
            user_id,
            photo_id: req.photo_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn get_comment(&self, id: i64) -> RepoResult<Option<Comment>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_comments(&self) -> RepoResult<Vec<Comment>> {
        Ok(self.tables.lock().unwrap().comments.clone())
    }

    async fn update_comment(&self, id: i64, req: UpdateCommentRequest) -> RepoResult<Option<Comment>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.comments.iter_mut().find(|c| c.id == id).map(|comment| {
            comment.message = req.message;
            comment.updated_at = Utc::now();
            comment.clone()
        }))
    }

    async fn delete_comment(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.comments.len();
        tables.comments.retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(tables.comments.len() < before)
    }

    async fn create_social_media(
        &self,
        user_id: i64,
        req: CreateSocialMediaRequest,
    ) -> RepoResult<SocialMedia> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let social_media = SocialMedia {
            id,
            name: req.name,
            social_media_url: req.social_media_url,
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.social_media.push(social_media.clone());
        Ok(social_media)
    }

    async fn get_social_media(&self, id: i64) -> RepoResult<Option<SocialMedia>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.social_media.iter().find(|s| s.id == id).cloned())
    }

    async fn list_social_media(&self) -> RepoResult<Vec<SocialMedia>> {
        Ok(self.tables.lock().unwrap().social_media.clone())
    }

    async fn update_social_media(
        &self,
        id: i64,
        req: UpdateSocialMediaRequest,
    ) -> RepoResult<Option<SocialMedia>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.social_media.iter_mut().find(|s| s.id == id).map(|entry| {
            if let Some(name) = req.name {
                entry.name = name;
            }
            if let Some(url) = req.social_media_url {
                entry.social_media_url = url;
            }
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn delete_social_media(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.social_media.len();
        tables.social_media.retain(|s| !(s.id == id && s.user_id == user_id));
        Ok(tables.social_media.len() < before)
    }
}

// --- State helpers ---

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.jwt_secret = TEST_SECRET.to_string();
    config
}

pub fn test_state(repo: InMemoryRepository) -> AppState {
    AppState {
        repo: Arc::new(repo),
        config: test_config(),
    }
}

pub fn token_for(user: &User) -> String {
    issue_token(user.id, &user.email, TEST_SECRET).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
