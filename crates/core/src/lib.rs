//! Brushlog domain core.
//!
//! Pure domain logic shared by the persistence, event, gallery and API
//! crates. Nothing in here touches the database; callers pass in
//! pre-loaded data and get deterministic results back.

pub mod carousel;
pub mod error;
pub mod image_resolution;
pub mod images;
pub mod source;
pub mod ttl_cache;
pub mod types;
