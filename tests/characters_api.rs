//! HTTP-level tests for the character routes.

mod common;

use axum::http::StatusCode;
use common::{create, delete, expect, get, luke, post_json, put_json, tatooine};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = false)]
async fn create_then_get_round_trips(pool: PgPool) {
    let app = common::test_app(pool).await;
    let planet = create(&app, "/add_planet", tatooine()).await;
    let id = create(&app, "/add_character", luke(Some(planet))).await;

    let json = expect(get(&app, &format!("/character/{id}")).await, StatusCode::OK).await;
    assert_eq!(json["id"], id);
    for (key, value) in luke(Some(planet)).as_object().unwrap() {
        assert_eq!(&json[key], value, "{key}");
    }
}

#[sqlx::test(migrations = false)]
async fn homeworld_is_optional(pool: PgPool) {
    let app = common::test_app(pool).await;
    let mut body = luke(None);
    body.as_object_mut().unwrap().remove("planet_id");

    let json = expect(post_json(&app, "/add_character", body).await, StatusCode::OK).await;
    assert!(json["data"]["planet_id"].is_null());
}

#[sqlx::test(migrations = false)]
async fn unknown_homeworld_is_404(pool: PgPool) {
    let app = common::test_app(pool).await;
    let json = expect(
        post_json(&app, "/add_character", luke(Some(4242))).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["message"], "Planet not found");

    let json = expect(get(&app, "/characters").await, StatusCode::OK).await;
    assert_eq!(json, json!([]));
}

#[sqlx::test(migrations = false)]
async fn renaming_leaves_other_fields_alone(pool: PgPool) {
    let app = common::test_app(pool).await;
    let planet = create(&app, "/add_planet", tatooine()).await;
    let id = create(&app, "/add_character", luke(Some(planet))).await;

    let response = put_json(&app, &format!("/update_character/{id}"), json!({ "name": "Leia" })).await;
    expect(response, StatusCode::OK).await;

    let json = expect(get(&app, &format!("/character/{id}")).await, StatusCode::OK).await;
    assert_eq!(json["name"], "Leia");
    assert_eq!(json["birth_year"], "19BBY");
    assert_eq!(json["height"], "172");
    assert_eq!(json["mass"], "77");
    assert_eq!(json["hair_color"], "blond");
    assert_eq!(json["eye_color"], "blue");
    assert_eq!(json["gender"], "male");
    assert_eq!(json["planet_id"], planet);
}

#[sqlx::test(migrations = false)]
async fn homeworld_can_be_moved_and_cleared(pool: PgPool) {
    let app = common::test_app(pool).await;
    let tatooine_id = create(&app, "/add_planet", tatooine()).await;
    let mut alderaan = tatooine();
    alderaan["name"] = json!("Alderaan");
    let alderaan_id = create(&app, "/add_planet", alderaan).await;
    let id = create(&app, "/add_character", luke(Some(tatooine_id))).await;
    let uri = format!("/update_character/{id}");

    let json = expect(
        put_json(&app, &uri, json!({ "planet_id": alderaan_id })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["planet_id"], alderaan_id);

    let json = expect(put_json(&app, &uri, json!({ "planet_id": null })).await, StatusCode::OK).await;
    assert!(json["data"]["planet_id"].is_null());

    let response = put_json(&app, &uri, json!({ "planet_id": 9999 })).await;
    expect(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = false)]
async fn null_for_text_field_is_400(pool: PgPool) {
    let app = common::test_app(pool).await;
    let id = create(&app, "/add_character", luke(None)).await;

    let json = expect(
        put_json(&app, &format!("/update_character/{id}"), json!({ "gender": null })).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["message"], "`gender` cannot be null");
}

#[sqlx::test(migrations = false)]
async fn unknown_character_is_404(pool: PgPool) {
    let app = common::test_app(pool).await;
    let json = expect(get(&app, "/character/5").await, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "Character not found");

    let response = put_json(&app, "/update_character/5", json!({ "name": "Leia" })).await;
    expect(response, StatusCode::NOT_FOUND).await;
    expect(delete(&app, "/delete_character/5").await, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = false)]
async fn deleting_twice_is_404(pool: PgPool) {
    let app = common::test_app(pool).await;
    let id = create(&app, "/add_character", luke(None)).await;
    let uri = format!("/delete_character/{id}");

    let json = expect(delete(&app, &uri).await, StatusCode::OK).await;
    assert_eq!(json["message"], "All good, deleted");
    let json = expect(delete(&app, &uri).await, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "Character not found");
    expect(get(&app, &format!("/character/{id}")).await, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = false)]
async fn list_is_ordered_by_id(pool: PgPool) {
    let app = common::test_app(pool).await;
    let first = create(&app, "/add_character", luke(None)).await;
    let mut leia = luke(None);
    leia["name"] = json!("Leia Organa");
    let second = create(&app, "/add_character", leia).await;

    let json = expect(get(&app, "/characters").await, StatusCode::OK).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}
