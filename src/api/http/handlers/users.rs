use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::http::{error::HttpError, state::AppState};
use crate::core::model::LoginOutcome;
use crate::store::GraphStore;

#[derive(Debug, Deserialize)]
pub struct CredentialsQuery {
    pub login: Option<String>,
    pub password: Option<String>,
}

/// Credential check. Returns `{name, authenticated}`; the stored hash never
/// crosses this boundary.
pub async fn get_credentials<S: GraphStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<CredentialsQuery>,
) -> Result<Json<LoginOutcome>, HttpError> {
    let outcome = state
        .engine
        .verify_login(
            &params.login.unwrap_or_default(),
            &params.password.unwrap_or_default(),
        )
        .await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub name: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub name: String,
}

pub async fn create_user<S: GraphStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let name = state
        .engine
        .create_user(
            &body.name.unwrap_or_default(),
            &body.login.unwrap_or_default(),
            &body.password.unwrap_or_default(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { name })))
}
