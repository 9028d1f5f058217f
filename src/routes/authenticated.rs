use crate::{
    AppState,
    handlers::{comments, photos, social_media},
    middleware::{authorize_comment, authorize_photo, authorize_social_media},
};
use axum::{
    Router,
    middleware,
    routing::get,
};

/// Authenticated Router Module
///
/// Every route here expects the Authentication layer to be applied by the caller
/// (see `create_router`). The id routes of each family additionally carry their
/// own Authorization layer, which runs after Authentication and before the handler.
pub fn authenticated_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(photo_routes(state.clone()))
        .merge(comment_routes(state.clone()))
        .merge(social_media_routes(state))
}

fn photo_routes(state: AppState) -> Router<AppState> {
    let owned = Router::new()
        // GET/PUT/DELETE /photo/{id}
        .route(
            "/photo/{id}",
            get(photos::get_photo)
                .put(photos::update_photo)
                .delete(photos::delete_photo),
        )
        .route_layer(middleware::from_fn_with_state(state, authorize_photo));

    Router::new()
        // POST /photo, GET /photo
        .route("/photo", get(photos::get_photos).post(photos::create_photo))
        .merge(owned)
}

fn comment_routes(state: AppState) -> Router<AppState> {
    let owned = Router::new()
        .route(
            "/comment/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(state, authorize_comment));

    Router::new()
        .route(
            "/comment",
            get(comments::get_comments).post(comments::create_comment),
        )
        .merge(owned)
}

fn social_media_routes(state: AppState) -> Router<AppState> {
    let owned = Router::new()
        .route(
            "/socialmedia/{id}",
            get(social_media::get_social_media)
                .put(social_media::update_social_media)
                .delete(social_media::delete_social_media),
        )
        .route_layer(middleware::from_fn_with_state(state, authorize_social_media));

    Router::new()
        .route(
            "/socialmedia",
            get(social_media::get_all_social_media).post(social_media::create_social_media),
        )
        .merge(owned)
}
