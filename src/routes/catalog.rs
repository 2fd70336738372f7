//! Catalog routes. One table drives both the router and the sitemap.

use crate::handlers::sitemap::RouteEntry;
use crate::handlers::{characters, favorites, planets, users};
use crate::state::AppState;
use axum::routing::{delete, get, post, put, MethodRouter};

type Route = (RouteEntry, MethodRouter<AppState>);

fn entry(path: &'static str, methods: &'static [&'static str], router: MethodRouter<AppState>) -> Route {
    (RouteEntry { path, methods }, router)
}

/// Every catalog path in sitemap order.
pub fn catalog() -> Vec<Route> {
    vec![
        entry("/users", &["GET"], get(users::list)),
        entry("/user/:id", &["GET"], get(users::read)),
        entry("/add_user", &["POST"], post(users::create)),
        entry("/update_user/:id", &["PUT"], put(users::update)),
        entry("/delete_user/:id", &["DELETE"], delete(users::delete)),
        entry(
            "/users/:id/favorites",
            &["GET", "POST"],
            get(favorites::list_for_user).post(favorites::create_for_user),
        ),
        entry("/planets", &["GET"], get(planets::list)),
        entry("/planet/:id", &["GET"], get(planets::read)),
        entry("/add_planet", &["POST"], post(planets::create)),
        entry("/update_planet/:id", &["PUT"], put(planets::update)),
        entry("/delete_planet/:id", &["DELETE"], delete(planets::delete)),
        entry("/characters", &["GET"], get(characters::list)),
        entry("/character/:id", &["GET"], get(characters::read)),
        entry("/add_character", &["POST"], post(characters::create)),
        entry("/update_character/:id", &["PUT"], put(characters::update)),
        entry("/delete_character/:id", &["DELETE"], delete(characters::delete)),
        entry("/favorites", &["GET"], get(favorites::list)),
        entry("/favorite/:id", &["GET"], get(favorites::read)),
        entry("/add_favorite", &["POST"], post(favorites::create)),
        entry("/update_favorite/:id", &["PUT"], put(favorites::update)),
        entry("/delete_favorite/:id", &["DELETE"], delete(favorites::delete)),
    ]
}
