//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod battle_repo;
pub mod collection_repo;
pub mod game_repo;
pub mod location_repo;
pub mod miniature_repo;
pub mod owner_image_repo;

pub use battle_repo::BattleRepo;
pub use collection_repo::CollectionRepo;
pub use game_repo::GameRepo;
pub use location_repo::LocationRepo;
pub use miniature_repo::MiniatureRepo;
pub use owner_image_repo::OwnerImageRepo;
