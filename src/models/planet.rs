use super::DbId;
use serde::{Deserialize, Serialize};

/// A stored planet row.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Planet {
    pub id: DbId,
    pub name: String,
    pub climate: String,
    pub diameter: String,
    pub gravity: String,
    pub population: String,
    pub terrain: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub climate: String,
    pub diameter: String,
    pub gravity: String,
    pub population: String,
    pub terrain: String,
}

/// Fields absent from the request stay `None` and are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlanetChanges {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub diameter: Option<String>,
    pub gravity: Option<String>,
    pub population: Option<String>,
    pub terrain: Option<String>,
}
