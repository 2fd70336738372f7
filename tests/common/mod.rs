//! Shared helpers for HTTP-level tests. Requests go straight to the router via `tower::ServiceExt`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use starwars_favorites::{app, apply_migrations, App, AppState, ServerConfig};

/// Build the full application (same middleware as `main`) on a freshly migrated database.
pub async fn test_app(pool: PgPool) -> App {
    apply_migrations(&pool).await.unwrap();
    app(AppState::new(pool), &ServerConfig::default())
}

async fn send(app: &App, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &App, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &App, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &App, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: &App, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body.to_string()).await
}

/// Send a raw body with a JSON content type, for malformed-payload tests.
pub async fn send_json(app: &App, method: Method, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

pub fn tatooine() -> Value {
    json!({
        "name": "Tatooine",
        "climate": "arid",
        "diameter": "10465",
        "gravity": "1",
        "population": "200000",
        "terrain": "desert"
    })
}

pub fn luke(planet_id: Option<i64>) -> Value {
    json!({
        "name": "Luke Skywalker",
        "birth_year": "19BBY",
        "height": "172",
        "mass": "77",
        "hair_color": "blond",
        "eye_color": "blue",
        "gender": "male",
        "planet_id": planet_id
    })
}

pub fn han() -> Value {
    json!({ "name": "Han Solo", "username": "solo", "password": "falcon" })
}

/// Create through the API and return the new id.
pub async fn create(app: &App, uri: &str, body: Value) -> i64 {
    let json = expect(post_json(app, uri, body).await, StatusCode::OK).await;
    json["data"]["id"].as_i64().unwrap()
}

/// A user, a planet and a character, returned as (user_id, planet_id, character_id).
pub async fn seed(app: &App) -> (i64, i64, i64) {
    let user = create(app, "/add_user", han()).await;
    let planet = create(app, "/add_planet", tatooine()).await;
    let character = create(app, "/add_character", luke(Some(planet))).await;
    (user, planet, character)
}
