use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::http::{error::HttpError, state::AppState};
use crate::store::GraphStore;

use super::PersonQuery;

#[derive(Debug, Serialize)]
pub struct FriendsResponse {
    pub friends: Vec<String>,
}

pub async fn get_friends<S: GraphStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<PersonQuery>,
) -> Result<Json<FriendsResponse>, HttpError> {
    let person = params.person.unwrap_or_default();
    let friends = state.engine.find_friends(&person).await?;
    Ok(Json(FriendsResponse { friends }))
}

#[derive(Debug, Serialize)]
pub struct NonFriendsResponse {
    pub person: Vec<String>,
}

pub async fn get_non_friends<S: GraphStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<PersonQuery>,
) -> Result<Json<NonFriendsResponse>, HttpError> {
    let person = params.person.unwrap_or_default();
    let strangers = state.engine.find_non_friends(&person).await?;
    Ok(Json(NonFriendsResponse { person: strangers }))
}

#[derive(Debug, Serialize)]
pub struct AllPersonsResponse {
    pub all: Vec<String>,
}

pub async fn get_all<S: GraphStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<AllPersonsResponse>, HttpError> {
    let all = state.engine.find_all_persons().await?;
    Ok(Json(AllPersonsResponse { all }))
}

#[derive(Debug, Deserialize)]
pub struct FriendPairBody {
    pub p1: Option<String>,
    pub p2: Option<String>,
}

pub async fn make_friends<S: GraphStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<FriendPairBody>,
) -> Result<StatusCode, HttpError> {
    state
        .engine
        .make_friends(
            &body.p1.unwrap_or_default(),
            &body.p2.unwrap_or_default(),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_friends<S: GraphStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<FriendPairBody>,
) -> Result<StatusCode, HttpError> {
    state
        .engine
        .delete_friends(
            &body.p1.unwrap_or_default(),
            &body.p2.unwrap_or_default(),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
