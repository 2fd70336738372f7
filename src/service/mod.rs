//! Persistence and serialization for each resource. Handlers call these with the pooled connection.

mod characters;
mod crud;
mod favorites;
mod planets;
mod users;
pub mod validation;

pub use characters::CharacterService;
pub use favorites::FavoriteService;
pub use planets::PlanetService;
pub use users::UserService;
pub use validation::{Payload, RequestValidator};
