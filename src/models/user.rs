use super::DbId;
use serde::{Deserialize, Serialize};

/// A stored user row. The password column is never selected into this type.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub username: String,
}

#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Default, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}
