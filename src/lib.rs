//! Star Wars favorites catalog: REST API over users, planets, characters and favorites.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod serialize;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app, App};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
