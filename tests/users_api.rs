//! HTTP-level tests for the user routes and per-user favorites.

mod common;

use axum::http::StatusCode;
use common::{create, delete, expect, get, han, luke, post_json, put_json, seed};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = false)]
async fn created_user_never_exposes_password(pool: PgPool) {
    let app = common::test_app(pool).await;
    let json = expect(post_json(&app, "/add_user", han()).await, StatusCode::OK).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert!(json["data"].get("password").is_none());

    let json = expect(get(&app, &format!("/user/{id}")).await, StatusCode::OK).await;
    assert_eq!(json, json!({ "id": id, "name": "Han Solo", "username": "solo", "favorites": [] }));

    let list = expect(get(&app, "/users").await, StatusCode::OK).await;
    assert!(list[0].get("password").is_none());
}

#[sqlx::test(migrations = false)]
async fn missing_password_is_400(pool: PgPool) {
    let app = common::test_app(pool).await;
    let response = post_json(&app, "/add_user", json!({ "name": "Han", "username": "solo" })).await;
    let json = expect(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["message"], "missing field `password`");
}

#[sqlx::test(migrations = false)]
async fn overlong_username_is_400(pool: PgPool) {
    let app = common::test_app(pool).await;
    let mut body = han();
    body["username"] = json!("x".repeat(51));
    let json = expect(post_json(&app, "/add_user", body).await, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["message"], "`username` must be at most 50 characters");
}

#[sqlx::test(migrations = false)]
async fn user_lists_their_favorites(pool: PgPool) {
    let app = common::test_app(pool).await;
    let (user, planet, character) = seed(&app).await;

    let response = post_json(
        &app,
        &format!("/users/{user}/favorites"),
        json!({ "planet_id": planet, "character_id": character }),
    )
    .await;
    let json = expect(response, StatusCode::OK).await;
    assert_eq!(json["message"], "All good, added");
    assert_eq!(json["data"]["user_id"], user);

    let favorites = expect(get(&app, &format!("/users/{user}/favorites")).await, StatusCode::OK).await;
    assert_eq!(favorites.as_array().unwrap().len(), 1);
    assert_eq!(favorites[0]["character"]["name"], "Luke Skywalker");
    assert_eq!(favorites[0]["planet"]["name"], "Tatooine");

    let json = expect(get(&app, &format!("/user/{user}")).await, StatusCode::OK).await;
    assert_eq!(json["favorites"], favorites);
}

#[sqlx::test(migrations = false)]
async fn favorites_of_unknown_user_are_404(pool: PgPool) {
    let app = common::test_app(pool).await;
    let json = expect(get(&app, "/users/77/favorites").await, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "User not found");

    let response = post_json(
        &app,
        "/users/77/favorites",
        json!({ "planet_id": 1, "character_id": 1 }),
    )
    .await;
    let json = expect(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "User not found");
}

#[sqlx::test(migrations = false)]
async fn update_changes_only_given_fields(pool: PgPool) {
    let app = common::test_app(pool).await;
    let id = create(&app, "/add_user", han()).await;

    let response = put_json(&app, &format!("/update_user/{id}"), json!({ "name": "Captain Solo" })).await;
    let json = expect(response, StatusCode::OK).await;
    assert_eq!(json["data"]["name"], "Captain Solo");
    assert_eq!(json["data"]["username"], "solo");
}

#[sqlx::test(migrations = false)]
async fn deleting_user_removes_their_favorites(pool: PgPool) {
    let app = common::test_app(pool).await;
    let (user, planet, character) = seed(&app).await;
    let favorite = create(
        &app,
        "/add_favorite",
        json!({ "user_id": user, "planet_id": planet, "character_id": character }),
    )
    .await;

    expect(delete(&app, &format!("/delete_user/{user}")).await, StatusCode::OK).await;
    expect(delete(&app, &format!("/delete_user/{user}")).await, StatusCode::NOT_FOUND).await;
    expect(get(&app, &format!("/favorite/{favorite}")).await, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = false)]
async fn unknown_user_is_404(pool: PgPool) {
    let app = common::test_app(pool).await;
    let json = expect(get(&app, "/user/9").await, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "User not found");

    let response = put_json(&app, "/update_user/9", json!({ "name": "Lando" })).await;
    let json = expect(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "User not found");

    let json = expect(delete(&app, "/delete_user/9").await, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "User not found");

    let json = expect(get(&app, "/user/99999999999").await, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "User not found");
}

#[sqlx::test(migrations = false)]
async fn reads_stay_whole_while_characters_are_deleted(pool: PgPool) {
    let app = common::test_app(pool).await;
    let (user, planet, _) = seed(&app).await;

    for _ in 0..100 {
        let character = create(&app, "/add_character", luke(Some(planet))).await;
        create(
            &app,
            "/add_favorite",
            json!({ "user_id": user, "planet_id": planet, "character_id": character }),
        )
        .await;

        let mut readers = Vec::new();
        for uri in [
            "/users".to_string(),
            format!("/user/{user}"),
            "/favorites".to_string(),
            format!("/users/{user}/favorites"),
        ] {
            let app = app.clone();
            readers.push(tokio::spawn(async move {
                let response = get(&app, &uri).await;
                (uri, response.status())
            }));
        }
        let deleter = {
            let app = app.clone();
            tokio::spawn(async move {
                delete(&app, &format!("/delete_character/{character}")).await.status()
            })
        };

        for reader in readers {
            let (uri, status) = reader.await.unwrap();
            assert_eq!(status, StatusCode::OK, "{uri}");
        }
        assert_eq!(deleter.await.unwrap(), StatusCode::OK);
    }

    let json = expect(get(&app, "/favorites").await, StatusCode::OK).await;
    assert_eq!(json, json!([]));
}
