//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where
//!   the entity is patchable

pub mod battle;
pub mod collection;
pub mod game;
pub mod location;
pub mod miniature;
pub mod owner_image;
