//! Carousel rotation state.
//!
//! Pure index bookkeeping for one display element. The timer that drives
//! [`CarouselState::tick`] lives in the gallery crate; this type only
//! decides whether rotation is allowed and where the index goes next.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time between carousel advances.
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_millis(4000);

/// Lifecycle phase of one display element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPhase {
    /// Nothing fetched yet.
    Idle,
    /// Fetch in flight.
    Loading,
    /// One image, no rotation.
    ReadyStatic,
    /// Two or more images.
    ReadyCarousel,
}

impl DisplayPhase {
    /// Phase reached after resolving `total` images.
    pub fn ready_for(total: usize) -> Self {
        if total > 1 {
            Self::ReadyCarousel
        } else {
            Self::ReadyStatic
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::ReadyStatic | Self::ReadyCarousel)
    }
}

/// Rotation index over a resolved image list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselState {
    current_index: usize,
    total: usize,
    paused: bool,
}

impl CarouselState {
    pub fn new(total: usize) -> Self {
        Self {
            current_index: 0,
            total,
            paused: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Rotation is live: more than one image and not paused.
    pub fn is_rotating(&self) -> bool {
        self.total > 1 && !self.paused
    }

    /// Replace the image count. The index restarts at zero; pause is kept.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.current_index = 0;
    }

    /// Advance one step, wrapping at the end. Returns the new index, or
    /// `None` when rotation is not live.
    pub fn tick(&mut self) -> Option<usize> {
        if !self.is_rotating() {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.total;
        Some(self.current_index)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_wrap_around() {
        let mut state = CarouselState::new(3);
        let seq: Vec<usize> = (0..7).filter_map(|_| state.tick()).collect();
        assert_eq!(seq, vec![1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn single_image_never_rotates() {
        let mut state = CarouselState::new(1);
        assert!(!state.is_rotating());
        assert_eq!(state.tick(), None);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn pause_holds_index() {
        let mut state = CarouselState::new(4);
        state.tick();
        state.tick();
        state.pause();
        assert_eq!(state.tick(), None);
        assert_eq!(state.current_index(), 2);
        state.resume();
        assert_eq!(state.tick(), Some(3));
    }

    #[test]
    fn set_total_restarts_index() {
        let mut state = CarouselState::new(3);
        state.tick();
        state.pause();
        state.set_total(5);
        assert_eq!(state.current_index(), 0);
        assert!(state.is_paused());
    }

    #[test]
    fn ready_phase_follows_count() {
        assert_eq!(DisplayPhase::ready_for(0), DisplayPhase::ReadyStatic);
        assert_eq!(DisplayPhase::ready_for(1), DisplayPhase::ReadyStatic);
        assert_eq!(DisplayPhase::ready_for(2), DisplayPhase::ReadyCarousel);
        assert!(!DisplayPhase::Loading.is_ready());
    }
}
