use mygram_api::{
    database,
    error::AppError,
    models::{
        CreateCommentRequest, CreatePhotoRequest, CreateSocialMediaRequest, ResourceKind,
        UpdatePhotoRequest, UpdateSocialMediaRequest, User,
    },
    repository::{NewUser, PostgresRepository, Repository},
};
use axum::http::StatusCode;
use sqlx::PgPool;

// --- Test Context and Setup ---

/// Holds the pool for one test. Run with
/// `DATABASE_URL=postgres://... cargo test -- --ignored`.
struct DbTestContext {
    pool: PgPool,
}

impl DbTestContext {
    async fn setup() -> Self {
        dotenv::dotenv().ok();

        let db_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set to run integration tests");

        let pool = PgPool::connect(&db_url)
            .await
            .expect("Failed to connect to database for integration tests.");

        database::migrate(&pool)
            .await
            .expect("Failed to migrate the schema.");

        DbTestContext { pool }
    }

    fn repository(&self) -> PostgresRepository {
        PostgresRepository::new(self.pool.clone())
    }
}

// --- Test Data Helpers ---

/// Tests share one database, so every user gets a fresh email.
fn unique_email(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{nanos}@test.com")
}

async fn create_test_user(repo: &PostgresRepository, prefix: &str) -> User {
    repo.create_user(NewUser {
        username: None,
        email: unique_email(prefix),
        password_hash: "not-a-real-hash".to_string(),
    })
    .await
    .expect("Failed to create test user")
}

fn photo_request(title: &str) -> CreatePhotoRequest {
    CreatePhotoRequest {
        title: title.to_string(),
        caption: None,
        photo_url: "https://img.example.com/p.jpg".to_string(),
    }
}

// --- Tests ---

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_migrate_is_idempotent() {
    let ctx = DbTestContext::setup().await;
    database::migrate(&ctx.pool).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_duplicate_email_maps_to_bad_request() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let user = create_test_user(&repo, "dup").await;

    let err = repo
        .create_user(NewUser {
            username: None,
            email: user.email.clone(),
            password_hash: "x".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(AppError::from(err).status(), StatusCode::BAD_REQUEST);
    let found = repo.find_user_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.password_hash, "not-a-real-hash");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_photo_crud_and_ownership() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let owner = create_test_user(&repo, "owner").await;
    let other = create_test_user(&repo, "other").await;

    let photo = repo.create_photo(owner.id, photo_request("first")).await.unwrap();
    assert_eq!(photo.user_id, owner.id);
    assert_eq!(
        repo.owner_of(ResourceKind::Photo, photo.id).await.unwrap(),
        Some(owner.id)
    );

    let updated = repo
        .update_photo(
            photo.id,
            UpdatePhotoRequest {
                caption: Some("with caption".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "first");
    assert_eq!(updated.caption.as_deref(), Some("with caption"));
    assert!(updated.updated_at >= photo.updated_at);

    let cleared = repo
        .update_photo(
            photo.id,
            UpdatePhotoRequest {
                caption: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.caption, None);
    assert_eq!(cleared.title, "first");

    assert!(!repo.delete_photo(photo.id, other.id).await.unwrap());
    assert!(repo.get_photo(photo.id).await.unwrap().is_some());

    assert!(repo.delete_photo(photo.id, owner.id).await.unwrap());
    assert!(repo.get_photo(photo.id).await.unwrap().is_none());
    assert_eq!(repo.owner_of(ResourceKind::Photo, photo.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_deleting_photo_cascades_to_comments() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let owner = create_test_user(&repo, "cascade").await;
    let fan = create_test_user(&repo, "fan").await;

    let photo = repo.create_photo(owner.id, photo_request("busy")).await.unwrap();
    let comment = repo
        .create_comment(
            fan.id,
            CreateCommentRequest {
                message: "nice".to_string(),
                photo_id: photo.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(
        repo.owner_of(ResourceKind::Comment, comment.id).await.unwrap(),
        Some(fan.id)
    );

    repo.delete_photo(photo.id, owner.id).await.unwrap();

    assert!(repo.get_comment(comment.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_comment_on_missing_photo_violates_foreign_key() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let user = create_test_user(&repo, "fk").await;

    let err = repo
        .create_comment(
            user.id,
            CreateCommentRequest {
                message: "orphan".to_string(),
                photo_id: i64::MAX,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(AppError::from(err).status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_social_media_listing_is_ordered_by_id() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let user = create_test_user(&repo, "social").await;

    let first = repo
        .create_social_media(
            user.id,
            CreateSocialMediaRequest {
                name: "github".to_string(),
                social_media_url: "https://github.com/a".to_string(),
            },
        )
        .await
        .unwrap();
    let second = repo
        .create_social_media(
            user.id,
            CreateSocialMediaRequest {
                name: "instagram".to_string(),
                social_media_url: "https://instagram.com/a".to_string(),
            },
        )
        .await
        .unwrap();

    let ids: Vec<i64> = repo
        .list_social_media()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    let first_pos = ids.iter().position(|&id| id == first.id).unwrap();
    let second_pos = ids.iter().position(|&id| id == second.id).unwrap();
    assert!(first_pos < second_pos);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let renamed = repo
        .update_social_media(
            second.id,
            UpdateSocialMediaRequest {
                name: Some("ig".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "ig");
    assert_eq!(renamed.social_media_url, "https://instagram.com/a");

    assert!(repo.update_social_media(i64::MAX, UpdateSocialMediaRequest::default()).await.unwrap().is_none());
}
