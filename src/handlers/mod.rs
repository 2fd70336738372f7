//! HTTP handlers, one module per resource, plus the root sitemap.

pub mod characters;
pub mod favorites;
pub mod planets;
pub mod sitemap;
pub mod users;
