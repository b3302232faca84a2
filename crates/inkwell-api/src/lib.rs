use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod comments;
pub mod error;
pub mod media;
pub mod posts;
pub mod users;
pub mod validate;

pub use auth::{AppState, AppStateInner, AuthUser};

/// The full application router. Public and owner-gated routes share paths;
/// authentication is enforced per-handler via the [`AuthUser`] extractor.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/slug/{slug}", get(posts::get_post_by_slug))
        .route(
            "/api/posts/{post_id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/api/posts/{post_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/api/comments/{comment_id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route(
            "/api/posts/{post_id}/media",
            get(media::list_media).post(media::add_media),
        )
        .route(
            "/api/media/{media_id}",
            get(media::get_media)
                .put(media::update_media)
                .delete(media::delete_media),
        )
        .route(
            "/api/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
