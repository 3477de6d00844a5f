//! Gateway-level tests: routing, request parsing, and error mapping.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use platepick::api::http::{create_router, AppState};
use platepick::services::Recommender;
use platepick::store::MemoryStore;

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    store.add_restaurant("Pasta", "italian", "warsaw");
    store.add_restaurant("Sushi", "japanese", "krakow");

    let state = AppState::new(Recommender::new(store));
    create_router(state, Duration::from_secs(5))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_user(app: &Router, name: &str, login: &str) {
    let response = app
        .clone()
        .oneshot(post(
            "/create-user",
            json!({ "name": name, "login": login, "password": "pw123456" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn health_endpoint_responds() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_user_returns_created_name_and_conflicts_on_duplicate() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post(
            "/create-user",
            json!({ "name": "Ann", "login": "ann01", "password": "pw123456" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, json!({ "name": "Ann" }));

    let response = app
        .oneshot(post(
            "/create-user",
            json!({ "name": "Ann", "login": "other", "password": "pw123456" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_required_fields_are_bad_requests() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/get-friends"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post("/make-friends", json!({ "p1": "Ann" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mutations_on_unknown_entities_are_not_found() {
    let app = app();
    create_user(&app, "Ann", "ann01").await;

    let response = app
        .clone()
        .oneshot(post("/make-friends", json!({ "p1": "Ann", "p2": "Bob" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post("/like", json!({ "person": "Ann", "restaurant": "Nowhere" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn friendship_flow_end_to_end() {
    let app = app();
    create_user(&app, "Ann", "ann01").await;
    create_user(&app, "Bob", "bob01").await;

    let response = app
        .clone()
        .oneshot(post("/make-friends", json!({ "p1": "Ann", "p2": "Bob" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get("/get-friends?person=Bob"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "friends": ["Ann"] }));

    let response = app
        .clone()
        .oneshot(post("/delete-friends", json!({ "p1": "Bob", "p2": "Ann" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get("/get-friends?person=Ann"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!({ "friends": [] }));
}

#[tokio::test]
async fn recommendations_flow_end_to_end() {
    let app = app();
    for (name, login) in [("Ann", "ann01"), ("Bob", "bob01"), ("Cid", "cid01")] {
        create_user(&app, name, login).await;
    }
    for body in [
        json!({ "p1": "Ann", "p2": "Bob" }),
        json!({ "p1": "Ann", "p2": "Cid" }),
    ] {
        let response = app.clone().oneshot(post("/make-friends", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
    for body in [
        json!({ "person": "Bob", "restaurant": "Pasta" }),
        json!({ "person": "Cid", "restaurant": "Pasta" }),
        json!({ "person": "Cid", "restaurant": "Sushi" }),
    ] {
        let response = app.clone().oneshot(post("/like", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .oneshot(get("/get-recommendations?person=Ann"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "recommendations": [
                { "name": "Pasta", "recommenders": ["Bob", "Cid"], "count": 2 },
                { "name": "Sushi", "recommenders": ["Cid"], "count": 1 },
            ]
        })
    );
}

#[tokio::test]
async fn get_best_supports_query_and_json_variants() {
    let app = app();
    create_user(&app, "Ann", "ann01").await;
    create_user(&app, "Bob", "bob01").await;
    for body in [
        json!({ "person": "Ann", "restaurant": "Pasta" }),
        json!({ "person": "Bob", "restaurant": "Pasta" }),
        json!({ "person": "Bob", "restaurant": "Sushi" }),
    ] {
        let response = app.clone().oneshot(post("/like", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app.clone().oneshot(get("/get-best?max=true")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{ "restaurant": "Pasta", "likers": ["Ann", "Bob"], "occurrence": 2 }])
    );

    let response = app
        .oneshot(post(
            "/get-best",
            json!({ "person": "Bob", "max": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            { "restaurant": "Pasta", "likers": ["Bob"], "occurrence": 1 },
            { "restaurant": "Sushi", "likers": ["Bob"], "occurrence": 1 },
        ])
    );
}

#[tokio::test]
async fn restaurant_search_with_wildcards_and_filters() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/get-restaurants?cuisine=&location=&person="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(post("/get-restaurants", json!({ "cuisine": "italian" })))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(
        body["restaurants"],
        json!([{
            "restaurant": "Pasta",
            "cuisine": "italian",
            "location": "warsaw",
            "likers": [],
        }])
    );
}

#[tokio::test]
async fn credentials_check_never_exposes_the_stored_secret() {
    let app = app();
    create_user(&app, "Ann", "ann01").await;

    let response = app
        .clone()
        .oneshot(get("/get-credentials?login=ann01&password=pw123456"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "name": "Ann", "authenticated": true })
    );

    let response = app
        .clone()
        .oneshot(get("/get-credentials?login=ann01&password=nope"))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "name": null, "authenticated": false })
    );

    let response = app
        .oneshot(get("/get-credentials?login=ghost&password=pw123456"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "name": null, "authenticated": false })
    );
}
