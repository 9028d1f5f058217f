use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{
    Comment, CreateCommentRequest, CreatePhotoRequest, CreateSocialMediaRequest, Photo,
    ResourceKind, SocialMedia, UpdateCommentRequest, UpdatePhotoRequest,
    UpdateSocialMediaRequest, User,
};

pub type RepoResult<T> = Result<T, sqlx::Error>;

/// NewUser
///
/// A registration that has already been validated and had its password hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: String,
    pub password_hash: String,
}

/// Repository Trait
///
/// The persistence gateway. Handlers and middleware only ever see this trait, so the
/// Postgres implementation can be swapped for an in-memory one in tests.
///
/// Every method is a single statement; there are no transactions spanning calls.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---
    async fn create_user(&self, user: NewUser) -> RepoResult<User>;
    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    // --- Ownership ---
    /// Owning `user_id` of the row, or `None` if the row does not exist.
    async fn owner_of(&self, kind: ResourceKind, id: i64) -> RepoResult<Option<i64>>;

    // --- Photos ---
    async fn create_photo(&self, user_id: i64, req: CreatePhotoRequest) -> RepoResult<Photo>;
    async fn get_photo(&self, id: i64) -> RepoResult<Option<Photo>>;
    async fn list_photos(&self) -> RepoResult<Vec<Photo>>;
    async fn update_photo(&self, id: i64, req: UpdatePhotoRequest) -> RepoResult<Option<Photo>>;
    /// Deletes only when `user_id` owns the row. Returns whether a row was removed.
    async fn delete_photo(&self, id: i64, user_id: i64) -> RepoResult<bool>;

    // --- Comments ---
    async fn create_comment(&self, user_id: i64, req: CreateCommentRequest) -> RepoResult<Comment>;
    async fn get_comment(&self, id: i64) -> RepoResult<Option<Comment>>;
    async fn list_comments(&self) -> RepoResult<Vec<Comment>>;
    async fn update_comment(&self, id: i64, req: UpdateCommentRequest) -> RepoResult<Option<Comment>>;
    async fn delete_comment(&self, id: i64, user_id: i64) -> RepoResult<bool>;

    // --- Social media ---
    async fn create_social_media(
        &self,
        user_id: i64,
        req: CreateSocialMediaRequest,
    ) -> RepoResult<SocialMedia>;
    async fn get_social_media(&self, id: i64) -> RepoResult<Option<SocialMedia>>;
    async fn list_social_media(&self) -> RepoResult<Vec<SocialMedia>>;
    async fn update_social_media(
        &self,
        id: i64,
        req: UpdateSocialMediaRequest,
    ) -> RepoResult<Option<SocialMedia>>;
    async fn delete_social_media(&self, id: i64, user_id: i64) -> RepoResult<bool>;
}

/// RepositoryState
///
/// The shared handle to the persistence layer carried in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete `Repository`, backed by the pool opened at startup.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table_for(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Photo => "photos",
        ResourceKind::Comment => "comments",
        ResourceKind::SocialMedia => "social_media",
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";
const PHOTO_COLUMNS: &str = "id, title, caption, photo_url, user_id, created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, message, user_id, photo_id, created_at, updated_at";
const SOCIAL_MEDIA_COLUMNS: &str = "id, name, social_media_url, user_id, created_at, updated_at";

#[async_trait]
impl Repository for PostgresRepository {
    async fn create_user(&self, user: NewUser) -> RepoResult<User> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password_hash)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// The table name comes from a closed enum, never from request input.
    async fn owner_of(&self, kind: ResourceKind, id: i64) -> RepoResult<Option<i64>> {
        let sql = format!("SELECT user_id FROM {} WHERE id = $1", table_for(kind));
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    // --- PHOTOS ---

    async fn create_photo(&self, user_id: i64, req: CreatePhotoRequest) -> RepoResult<Photo> {
        let sql = format!(
            "INSERT INTO photos (title, caption, photo_url, user_id) VALUES ($1, $2, $3, $4) RETURNING {PHOTO_COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&sql)
            .bind(req.title)
            .bind(req.caption)
            .bind(req.photo_url)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_photo(&self, id: i64) -> RepoResult<Option<Photo>> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_photos(&self) -> RepoResult<Vec<Photo>> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photos ORDER BY id");
        sqlx::query_as::<_, Photo>(&sql).fetch_all(&self.pool).await
    }

    /// COALESCE keeps the stored value for every field the request leaves out.
    /// A caption sent blank clears it.
    async fn update_photo(&self, id: i64, req: UpdatePhotoRequest) -> RepoResult<Option<Photo>> {
        let sql = format!(
            r#"
            UPDATE photos
            SET title = COALESCE($2, title),
                caption = CASE
                    WHEN $3::TEXT IS NULL THEN caption
                    WHEN BTRIM($3::TEXT) = '' THEN NULL
                    ELSE $3::TEXT
                END,
                photo_url = COALESCE($4, photo_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PHOTO_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Photo>(&sql)
            .bind(id)
            .bind(req.title)
            .bind(req.caption)
            .bind(req.photo_url)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_photo(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- COMMENTS ---

    async fn create_comment(&self, user_id: i64, req: CreateCommentRequest) -> RepoResult<Comment> {
        let sql = format!(
            "INSERT INTO comments (message, user_id, photo_id) VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(req.message)
            .bind(user_id)
            .bind(req.photo_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_comment(&self, id: i64) -> RepoResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_comments(&self) -> RepoResult<Vec<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments ORDER BY id");
        sqlx::query_as::<_, Comment>(&sql).fetch_all(&self.pool).await
    }

    async fn update_comment(&self, id: i64, req: UpdateCommentRequest) -> RepoResult<Option<Comment>> {
        let sql = format!(
            "UPDATE comments SET message = $2, updated_at = NOW() WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .bind(req.message)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_comment(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- SOCIAL MEDIA ---

    async fn create_social_media(
        &self,
        user_id: i64,
        req: CreateSocialMediaRequest,
    ) -> RepoResult<SocialMedia> {
        let sql = format!(
            "INSERT INTO social_media (name, social_media_url, user_id) VALUES ($1, $2, $3) RETURNING {SOCIAL_MEDIA_COLUMNS}"
        );
        sqlx::query_as::<_, SocialMedia>(&sql)
            .bind(req.name)
            .bind(req.social_media_url)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_social_media(&self, id: i64) -> RepoResult<Option<SocialMedia>> {
        let sql = format!("SELECT {SOCIAL_MEDIA_COLUMNS} FROM social_media WHERE id = $1");
        sqlx::query_as::<_, SocialMedia>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_social_media(&self) -> RepoResult<Vec<SocialMedia>> {
        let sql = format!("SELECT {SOCIAL_MEDIA_COLUMNS} FROM social_media ORDER BY id");
        sqlx::query_as::<_, SocialMedia>(&sql).fetch_all(&self.pool).await
    }

    async fn update_social_media(
        &self,
        id: i64,
        req: UpdateSocialMediaRequest,
    ) -> RepoResult<Option<SocialMedia>> {
        let sql = format!(
            r#"
            UPDATE social_media
            SET name = COALESCE($2, name),
                social_media_url = COALESCE($3, social_media_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {SOCIAL_MEDIA_COLUMNS}
            "#
        );
        sqlx::query_as::<_, SocialMedia>(&sql)
            .bind(id)
            .bind(req.name)
            .bind(req.social_media_url)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_social_media(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM social_media WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
