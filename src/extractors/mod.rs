pub mod json;
pub mod path;

pub use json::ValidJson;
pub use path::EntityId;
