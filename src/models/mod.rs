//! Row types, create payloads and partial-update payloads for each entity.

pub mod character;
pub mod favorite;
pub mod planet;
pub mod user;

pub use character::{Character, CharacterChanges, NewCharacter};
pub use favorite::{Favorite, FavoriteChanges, NewFavorite, NewUserFavorite};
pub use planet::{NewPlanet, Planet, PlanetChanges};
pub use user::{NewUser, User, UserChanges};

use serde::{Deserialize, Deserializer};

/// Primary and foreign key type (`SERIAL` / `INTEGER`).
pub type DbId = i32;

/// A row type addressed by id in routes. `KIND` is the name used in "not found" errors.
pub trait Entity {
    const KIND: &'static str;
}

impl Entity for Planet {
    const KIND: &'static str = "Planet";
}

impl Entity for Character {
    const KIND: &'static str = "Character";
}

impl Entity for User {
    const KIND: &'static str = "User";
}

impl Entity for Favorite {
    const KIND: &'static str = "Favorite";
}

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
