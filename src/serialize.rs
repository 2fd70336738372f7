//! Response shapes: each entity's own columns plus one level of related rows.

use crate::error::AppError;
use crate::models::{Character, DbId, Favorite, Planet, User};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct PlanetBody {
    #[serde(flatten)]
    pub planet: Planet,
    /// Characters whose homeworld is this planet.
    pub characters: Vec<Character>,
}

pub type CharacterBody = Character;

#[derive(Clone, Debug, Serialize)]
pub struct FavoriteBody {
    #[serde(flatten)]
    pub favorite: Favorite,
    pub character: CharacterBody,
    pub planet: PlanetBody,
}

#[derive(Clone, Debug, Serialize)]
pub struct UserBody {
    #[serde(flatten)]
    pub user: User,
    pub favorites: Vec<FavoriteBody>,
}

/// Rows referenced by a batch of favorites, loaded up front so serialization never hits the database.
#[derive(Clone, Debug, Default)]
pub struct Related {
    pub planets: HashMap<DbId, Planet>,
    pub characters: HashMap<DbId, Character>,
    /// Characters grouped by homeworld id.
    pub residents: HashMap<DbId, Vec<Character>>,
}

impl Related {
    pub fn residents_of(&self, planet_id: DbId) -> &[Character] {
        self.residents.get(&planet_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Group characters by homeworld, dropping those without one.
pub fn group_by_planet(characters: Vec<Character>) -> HashMap<DbId, Vec<Character>> {
    let mut out: HashMap<DbId, Vec<Character>> = HashMap::new();
    for c in characters {
        if let Some(pid) = c.planet_id {
            out.entry(pid).or_default().push(c);
        }
    }
    out
}

pub fn planet(planet: Planet, residents: &[Character]) -> PlanetBody {
    PlanetBody {
        planet,
        characters: residents.to_vec(),
    }
}

/// Fails with NotFound when the referenced planet or character is missing from `related`.
pub fn favorite(favorite: Favorite, related: &Related) -> Result<FavoriteBody, AppError> {
    let character = related
        .characters
        .get(&favorite.character_id)
        .cloned()
        .ok_or(AppError::NotFound("Character"))?;
    let fav_planet = related
        .planets
        .get(&favorite.planet_id)
        .cloned()
        .ok_or(AppError::NotFound("Planet"))?;
    let residents = related.residents_of(fav_planet.id);
    Ok(FavoriteBody {
        favorite,
        character,
        planet: planet(fav_planet, residents),
    })
}

pub fn user(user: User, favorites: Vec<Favorite>, related: &Related) -> Result<UserBody, AppError> {
    let favorites = favorites
        .into_iter()
        .map(|f| favorite(f, related))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(UserBody { user, favorites })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tatooine() -> Planet {
        Planet {
            id: 1,
            name: "Tatooine".into(),
            climate: "arid".into(),
            diameter: "10465".into(),
            gravity: "1".into(),
            population: "200000".into(),
            terrain: "desert".into(),
        }
    }

    fn luke() -> Character {
        Character {
            id: 5,
            name: "Luke Skywalker".into(),
            birth_year: "19BBY".into(),
            height: "172".into(),
            mass: "77".into(),
            hair_color: "blond".into(),
            eye_color: "blue".into(),
            gender: "male".into(),
            planet_id: Some(1),
        }
    }

    fn related() -> Related {
        Related {
            planets: HashMap::from([(1, tatooine())]),
            characters: HashMap::from([(5, luke())]),
            residents: group_by_planet(vec![luke()]),
        }
    }

    #[test]
    fn planet_embeds_its_characters() {
        let body = serde_json::to_value(planet(tatooine(), &[luke()])).unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["terrain"], "desert");
        assert_eq!(body["characters"][0]["name"], "Luke Skywalker");
        assert_eq!(body["characters"][0]["planet_id"], 1);
    }

    #[test]
    fn favorite_embeds_character_and_planet() {
        let fav = Favorite {
            id: 9,
            user_id: 2,
            planet_id: 1,
            character_id: 5,
        };
        let body = serde_json::to_value(favorite(fav, &related()).unwrap()).unwrap();
        assert_eq!(body["id"], 9);
        assert_eq!(body["user_id"], 2);
        assert_eq!(body["character"]["id"], 5);
        assert_eq!(body["planet"]["name"], "Tatooine");
        assert_eq!(body["planet"]["characters"][0]["id"], 5);
    }

    #[test]
    fn unresolvable_reference_is_not_found() {
        let fav = Favorite {
            id: 9,
            user_id: 2,
            planet_id: 1,
            character_id: 77,
        };
        let err = favorite(fav, &related()).unwrap_err();
        assert_eq!(err.to_string(), "Character not found");
    }

    #[test]
    fn user_never_carries_a_password() {
        let u = User {
            id: 2,
            name: "Han".into(),
            username: "solo".into(),
        };
        let body = serde_json::to_value(user(u, Vec::new(), &Related::default()).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({ "id": 2, "name": "Han", "username": "solo", "favorites": [] })
        );
    }

    #[test]
    fn homeless_characters_are_not_grouped() {
        let mut drifter = luke();
        drifter.planet_id = None;
        let grouped = group_by_planet(vec![drifter, luke()]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&1].len(), 1);
    }
}
