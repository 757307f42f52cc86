//! Brushlog event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ImageEvent`]: the image-change event that invalidates cached display
//!   state, keyed by owner.

pub mod bus;
pub mod image_events;

pub use bus::EventBus;
pub use image_events::{ImageEvent, ImageEventKind};
