use super::DbId;
use serde::{Deserialize, Serialize};

/// Join row linking a user to one planet and one character.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub planet_id: DbId,
    pub character_id: DbId,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewFavorite {
    pub user_id: DbId,
    pub planet_id: DbId,
    pub character_id: DbId,
}

/// Body of `POST /users/{id}/favorites`; the user comes from the path.
#[derive(Clone, Debug, Deserialize)]
pub struct NewUserFavorite {
    pub planet_id: DbId,
    pub character_id: DbId,
}

impl NewUserFavorite {
    pub fn for_user(self, user_id: DbId) -> NewFavorite {
        NewFavorite {
            user_id,
            planet_id: self.planet_id,
            character_id: self.character_id,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FavoriteChanges {
    pub user_id: Option<DbId>,
    pub planet_id: Option<DbId>,
    pub character_id: Option<DbId>,
}
