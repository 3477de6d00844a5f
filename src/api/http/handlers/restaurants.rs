use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::http::{error::HttpError, state::AppState};
use crate::core::model::{BestRow, Recommendation, RestaurantRow};
use crate::store::{BestFilter, GraphStore, RestaurantFilter};

use super::{flag, non_blank, person_list, PersonQuery};

#[derive(Debug, Deserialize)]
pub struct RestaurantsParams {
    pub cuisine: Option<String>,
    pub location: Option<String>,
    pub person: Option<String>,
}

impl RestaurantsParams {
    fn into_filter(self) -> RestaurantFilter {
        RestaurantFilter {
            cuisine: non_blank(self.cuisine),
            location: non_blank(self.location),
            person: non_blank(self.person),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<RestaurantRow>,
}

pub async fn get_restaurants<S: GraphStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<RestaurantsParams>,
) -> Result<Json<RestaurantsResponse>, HttpError> {
    let restaurants = state.engine.find_restaurants(params.into_filter()).await?;
    Ok(Json(RestaurantsResponse { restaurants }))
}

pub async fn post_restaurants<S: GraphStore>(
    State(state): State<AppState<S>>,
    Json(params): Json<RestaurantsParams>,
) -> Result<Json<RestaurantsResponse>, HttpError> {
    let restaurants = state.engine.find_restaurants(params.into_filter()).await?;
    Ok(Json(RestaurantsResponse { restaurants }))
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

pub async fn get_recommendations<S: GraphStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<PersonQuery>,
) -> Result<Json<RecommendationsResponse>, HttpError> {
    let person = params.person.unwrap_or_default();
    let recommendations = state.engine.find_recommendations(&person).await?;
    Ok(Json(RecommendationsResponse { recommendations }))
}

#[derive(Debug, Deserialize)]
pub struct BestParams {
    pub cuisine: Option<String>,
    pub location: Option<String>,
    /// Comma-separated list of person names.
    pub person: Option<String>,
    pub max: Option<String>,
}

pub async fn get_best<S: GraphStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<BestParams>,
) -> Result<Json<Vec<BestRow>>, HttpError> {
    let filter = BestFilter {
        cuisine: non_blank(params.cuisine),
        location: non_blank(params.location),
        persons: person_list(params.person),
    };
    let best = state.engine.find_best(filter, flag(params.max)).await?;
    Ok(Json(best))
}

#[derive(Debug, Deserialize)]
pub struct BestBody {
    pub cuisine: Option<String>,
    pub location: Option<String>,
    /// Comma-separated list of person names.
    pub person: Option<String>,
    #[serde(default)]
    pub max: bool,
}

pub async fn post_best<S: GraphStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<BestBody>,
) -> Result<Json<Vec<BestRow>>, HttpError> {
    let filter = BestFilter {
        cuisine: non_blank(body.cuisine),
        location: non_blank(body.location),
        persons: person_list(body.person),
    };
    let best = state.engine.find_best(filter, body.max).await?;
    Ok(Json(best))
}

#[derive(Debug, Deserialize)]
pub struct PreferenceBody {
    pub person: Option<String>,
    pub restaurant: Option<String>,
}

pub async fn like<S: GraphStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<PreferenceBody>,
) -> Result<StatusCode, HttpError> {
    state
        .engine
        .like_restaurant(
            &body.person.unwrap_or_default(),
            &body.restaurant.unwrap_or_default(),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn dislike<S: GraphStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<PreferenceBody>,
) -> Result<StatusCode, HttpError> {
    state
        .engine
        .dislike_restaurant(
            &body.person.unwrap_or_default(),
            &body.restaurant.unwrap_or_default(),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
