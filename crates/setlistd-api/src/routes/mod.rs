//! Route definitions
//!
//! Auth routes live under /auth, everything else under /api.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{artists, auth, events, health, posts, reviews, uploads, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(event_routes())
        .merge(artist_routes())
        .merge(user_routes())
        .merge(post_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Event and review routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::search_events))
        .route("/events/save", post(events::save_event))
        .route("/saved-events", get(events::list_saved_events))
        .route(
            "/saved-events/:id",
            get(events::get_saved_event).delete(events::delete_saved_event),
        )
        // Reviews are keyed by catalog id
        .route(
            "/events/:event_id/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/events/:event_id/reviews/:review_id",
            put(reviews::update_review).delete(reviews::delete_review),
        )
}

fn artist_routes() -> Router<AppState> {
    Router::new().route("/artists/:artist_name/rating", get(artists::artist_rating))
}

/// User routes
///
/// Static segments win over `:user`, which holds a username for the
/// profile route and a user id elsewhere.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/init", post(users::init_user))
        .route("/users/search", get(users::search_users))
        .route("/users/profile", put(users::update_profile))
        .route(
            "/users/upload-profile-picture",
            post(uploads::upload_profile_picture),
        )
        .route("/users/upload-banner", post(uploads::upload_banner))
        .route(
            "/users/follow/:target_user_id",
            post(users::follow_user).delete(users::unfollow_user),
        )
        .route(
            "/users/concerts/:list/:event_id",
            post(users::add_concert).delete(users::remove_concert),
        )
        .route("/users/:user", get(users::get_profile))
        .route("/users/:user/followers", get(users::get_followers))
        .route("/users/:user/following", get(users::get_following))
        .route("/users/:user/concerts/:list", get(users::get_concerts))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/feed", get(posts::get_feed))
        .route("/posts/media", post(uploads::upload_post_media))
        .route("/posts/user/:user_id", get(posts::get_user_posts))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:post_id/like", post(posts::toggle_like))
        .route("/posts/:post_id/comments", post(posts::add_comment))
        .route(
            "/posts/:post_id/comments/:comment_id",
            axum::routing::delete(posts::delete_comment),
        )
}
