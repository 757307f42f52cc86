//! Display-state runtime for owner image cards.
//!
//! A list view mounts one [`DisplaySlot`] per card through a [`Gallery`].
//! Each slot defers its fetch until its [`VisibilityTrigger`] fires,
//! resolves the owner's images once per generation, and drives a single
//! rotation timer while it shows a carousel and is not paused. Image-change
//! events on the bus invalidate affected slots.

pub mod config;
pub mod gallery;
pub mod slot;
mod timer;
pub mod visibility;

pub use config::GalleryConfig;
pub use gallery::Gallery;
pub use slot::{DisplaySlot, DisplaySnapshot};
pub use visibility::{Rect, VisibilityTrigger};

#[cfg(test)]
pub(crate) mod test_support;
