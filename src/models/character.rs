use super::{double_option, DbId};
use serde::{Deserialize, Serialize};

/// A stored character row. `planet_id` is the homeworld, if any.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub birth_year: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub eye_color: String,
    pub gender: String,
    pub planet_id: Option<DbId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    pub birth_year: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub eye_color: String,
    pub gender: String,
    #[serde(default)]
    pub planet_id: Option<DbId>,
}

/// `planet_id: Some(None)` clears the homeworld; `None` leaves it alone.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CharacterChanges {
    pub name: Option<String>,
    pub birth_year: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub planet_id: Option<Option<DbId>>,
}
