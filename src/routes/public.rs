use crate::{AppState, handlers::users};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers and monitoring.
        .route("/health", get(|| async { "ok" }))
        // POST /users/register
        .route("/users/register", post(users::register_user))
        // POST /users/login
        // Verifies credentials and issues the bearer token used by every other route.
        .route("/users/login", post(users::login_user))
}
