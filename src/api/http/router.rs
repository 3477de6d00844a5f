use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::store::GraphStore;

use super::{
    handlers::{health, restaurants, social, users},
    state::AppState,
};

pub fn create_router<S: GraphStore>(state: AppState<S>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::check))
        .route("/get-friends", get(social::get_friends::<S>))
        .route("/get-person", get(social::get_non_friends::<S>))
        .route("/get-all", get(social::get_all::<S>))
        .route(
            "/get-restaurants",
            get(restaurants::get_restaurants::<S>).post(restaurants::post_restaurants::<S>),
        )
        .route(
            "/get-recommendations",
            get(restaurants::get_recommendations::<S>),
        )
        .route(
            "/get-best",
            get(restaurants::get_best::<S>).post(restaurants::post_best::<S>),
        )
        .route("/get-credentials", get(users::get_credentials::<S>))
        .route("/like", post(restaurants::like::<S>))
        .route("/dislike", post(restaurants::dislike::<S>))
        .route("/create-user", post(users::create_user::<S>))
        .route("/make-friends", post(social::make_friends::<S>))
        .route("/delete-friends", post(social::delete_friends::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
