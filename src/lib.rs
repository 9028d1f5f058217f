use axum::{Router, extract::FromRef, http::HeaderName, middleware::from_fn_with_state};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod validation;

pub mod routes;
use routes::{authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::AppError;
pub use repository::{PostgresRepository, Repository, RepositoryState};

/// ApiDoc
///
/// The OpenAPI document for every handler and payload, served at
/// `/api-docs/openapi.json` and rendered by Swagger UI at `/docs`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::users::register_user, handlers::users::login_user,
        handlers::photos::create_photo, handlers::photos::get_photos, handlers::photos::get_photo,
        handlers::photos::update_photo, handlers::photos::delete_photo,
        handlers::comments::create_comment, handlers::comments::get_comments,
        handlers::comments::get_comment, handlers::comments::update_comment,
        handlers::comments::delete_comment,
        handlers::social_media::create_social_media, handlers::social_media::get_all_social_media,
        handlers::social_media::get_social_media, handlers::social_media::update_social_media,
        handlers::social_media::delete_social_media,
    ),
    components(
        schemas(
            models::User, models::Photo, models::Comment, models::SocialMedia,
            models::RegisterUserRequest, models::LoginRequest, models::LoginResponse,
            models::CreatePhotoRequest, models::UpdatePhotoRequest,
            models::CreateCommentRequest, models::UpdateCommentRequest,
            models::CreateSocialMediaRequest, models::UpdateSocialMediaRequest,
            models::MessageResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "photo", description = "Photo posts"),
        (name = "comment", description = "Comments on photos"),
        (name = "social media", description = "Social media links on a user's profile")
    ),
    info(title = "MyGram API", description = "Add photos, comment on them, and store the social media of users")
)]
struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// AppState
///
/// Everything a request needs, built once in `main` and cloned into every handler.
/// The repository is the only path to the database; there is no global handle.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway (Postgres in production, in-memory in tests).
    pub repo: RepositoryState,
    pub config: AppConfig,
}

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles public and protected routes, applies the Authentication gate to the
/// protected ones, and wraps everything in the request-id, tracing and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // Authentication wraps the whole protected tree, so it always runs before
        // the per-resource Authorization layers nested inside.
        .merge(
            authenticated::authenticated_routes(state.clone())
                .route_layer(from_fn_with_state(state.clone(), middleware::authenticate)),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span. `user_id` starts empty and is filled in by the
/// Authentication gate once the token is verified.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
        user_id = tracing::field::Empty,
    )
}
