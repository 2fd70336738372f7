//! Request validation against per-entity field rules.

use crate::error::AppError;
use crate::migration::TEXT_MAX_LEN;
use crate::models::{
    CharacterChanges, FavoriteChanges, NewCharacter, NewFavorite, NewPlanet, NewUser,
    NewUserFavorite, PlanetChanges, UserChanges,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text bounded by the column length.
    Text,
    /// Reference to another row's integer id.
    Id,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

const fn text(name: &'static str) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Text,
        required: true,
        nullable: false,
    }
}

const fn id(name: &'static str) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Id,
        required: true,
        nullable: false,
    }
}

pub const USER_FIELDS: &[FieldRule] = &[text("name"), text("username"), text("password")];

pub const PLANET_FIELDS: &[FieldRule] = &[
    text("name"),
    text("climate"),
    text("diameter"),
    text("gravity"),
    text("population"),
    text("terrain"),
];

pub const CHARACTER_FIELDS: &[FieldRule] = &[
    text("name"),
    text("birth_year"),
    text("height"),
    text("mass"),
    text("hair_color"),
    text("eye_color"),
    text("gender"),
    FieldRule {
        name: "planet_id",
        kind: FieldKind::Id,
        required: false,
        nullable: true,
    },
];

pub const FAVORITE_FIELDS: &[FieldRule] = &[id("user_id"), id("planet_id"), id("character_id")];

pub const USER_FAVORITE_FIELDS: &[FieldRule] = &[id("planet_id"), id("character_id")];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body: every required field must be present and every present field well-formed.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            match body.get(rule.name) {
                None if rule.required => {
                    return Err(AppError::BadRequest(format!("missing field `{}`", rule.name)))
                }
                None => {}
                Some(v) => validate_field(rule, v)?,
            }
        }
        Ok(())
    }

    /// Validate only the fields present in body (for PUT). Required is not enforced for missing fields.
    pub fn validate_partial(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            if let Some(v) = body.get(rule.name) {
                validate_field(rule, v)?;
            }
        }
        Ok(())
    }
}

fn validate_field(rule: &FieldRule, v: &Value) -> Result<(), AppError> {
    if v.is_null() {
        if rule.nullable {
            return Ok(());
        }
        return Err(AppError::BadRequest(format!("`{}` cannot be null", rule.name)));
    }
    match rule.kind {
        FieldKind::Text => {
            let s = v
                .as_str()
                .ok_or_else(|| AppError::BadRequest(format!("`{}` must be a string", rule.name)))?;
            if s.chars().count() > TEXT_MAX_LEN {
                return Err(AppError::BadRequest(format!(
                    "`{}` must be at most {} characters",
                    rule.name, TEXT_MAX_LEN
                )));
            }
        }
        FieldKind::Id => {
            let ok = v
                .as_i64()
                .map(|n| n > 0 && n <= i64::from(i32::MAX))
                .unwrap_or(false);
            if !ok {
                return Err(AppError::BadRequest(format!(
                    "`{}` must be a positive integer id",
                    rule.name
                )));
            }
        }
    }
    Ok(())
}

/// A JSON request body type with field rules checked before deserialization.
pub trait Payload: DeserializeOwned {
    const FIELDS: &'static [FieldRule];
    /// Partial payloads only check the fields that are present.
    const PARTIAL: bool;

    fn from_object(body: Map<String, Value>) -> Result<Self, AppError> {
        if Self::PARTIAL {
            RequestValidator::validate_partial(&body, Self::FIELDS)?;
        } else {
            RequestValidator::validate(&body, Self::FIELDS)?;
        }
        serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

macro_rules! payload {
    ($ty:ty, $fields:expr, $partial:expr) => {
        impl Payload for $ty {
            const FIELDS: &'static [FieldRule] = $fields;
            const PARTIAL: bool = $partial;
        }
    };
}

payload!(NewUser, USER_FIELDS, false);
payload!(UserChanges, USER_FIELDS, true);
payload!(NewPlanet, PLANET_FIELDS, false);
payload!(PlanetChanges, PLANET_FIELDS, true);
payload!(NewCharacter, CHARACTER_FIELDS, false);
payload!(CharacterChanges, CHARACTER_FIELDS, true);
payload!(NewFavorite, FAVORITE_FIELDS, false);
payload!(FavoriteChanges, FAVORITE_FIELDS, true);
payload!(NewUserFavorite, USER_FAVORITE_FIELDS, false);
