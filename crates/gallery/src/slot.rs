//! Per-card display state machine.
//!
//! ```text
//! Idle --fetch--> Loading --resolved--> ReadyStatic | ReadyCarousel
//!   ^                                        |
//!   +--------------- invalidate -------------+
//! ```

use std::sync::Arc;

use brushlog_core::carousel::{CarouselState, DisplayPhase};
use brushlog_core::image_resolution::{
    resolve_or_placeholder, ResolvedImages, PLACEHOLDER_IMAGE,
};
use brushlog_core::images::OwnerRef;
use brushlog_core::source::ImageOwnerSource;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::config::GalleryConfig;
use crate::timer::spawn_rotation;
use crate::visibility::{Rect, VisibilityTrigger};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// What a renderer needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySnapshot {
    pub image_src: String,
    pub is_carousel: bool,
    pub loading: bool,
    pub all_images: Vec<String>,
    pub current_index: usize,
    pub total_images: usize,
    /// The image is the parent game's; draw it dimmed.
    pub is_game_fallback: bool,
    pub phase: DisplayPhase,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub(crate) struct SlotState {
    phase: DisplayPhase,
    generation: u64,
    resolved: Option<ResolvedImages>,
    pub(crate) carousel: CarouselState,
    trigger: VisibilityTrigger,
    timer: Option<CancellationToken>,
    mounted: bool,
}

impl SlotState {
    fn cancel_timer(&mut self) {
        if let Some(token) = self.timer.take() {
            token.cancel();
        }
    }
}

pub(crate) struct SlotInner {
    pub(crate) owner: OwnerRef,
    source: Arc<dyn ImageOwnerSource>,
    config: GalleryConfig,
    pub(crate) state: Mutex<SlotState>,
}

impl SlotInner {
    /// Make the live timer match the carousel: cancel whatever is running,
    /// then start exactly one new timer if rotation is allowed.
    fn sync_timer(self: &Arc<Self>, state: &mut SlotState) {
        state.cancel_timer();
        if state.mounted && state.carousel.is_rotating() {
            let token = CancellationToken::new();
            spawn_rotation(
                Arc::downgrade(self),
                token.clone(),
                self.config.rotation_interval,
            );
            state.timer = Some(token);
        }
    }
}

impl Drop for SlotInner {
    fn drop(&mut self) {
        self.state.get_mut().cancel_timer();
    }
}

// ---------------------------------------------------------------------------
// DisplaySlot
// ---------------------------------------------------------------------------

/// Runtime display state for one mounted card.
///
/// Cheaply cloneable handle; all clones share one state. Methods that may
/// start a rotation timer must run inside a Tokio runtime.
#[derive(Clone)]
pub struct DisplaySlot {
    pub(crate) inner: Arc<SlotInner>,
}

impl DisplaySlot {
    pub fn new(owner: OwnerRef, source: Arc<dyn ImageOwnerSource>, config: GalleryConfig) -> Self {
        let state = SlotState {
            phase: DisplayPhase::Idle,
            generation: 0,
            resolved: None,
            carousel: CarouselState::default(),
            trigger: VisibilityTrigger::new(config.visibility_margin_px),
            timer: None,
            mounted: true,
        };
        Self {
            inner: Arc::new(SlotInner {
                owner,
                source,
                config,
                state: Mutex::new(state),
            }),
        }
    }

    pub fn owner(&self) -> OwnerRef {
        self.inner.owner
    }

    /// Load and resolve the owner's images.
    ///
    /// Only the first call per generation reads from the source; calls made
    /// while loading, once ready, or after unmount return immediately. A
    /// failed read is logged and resolves to the placeholder. A result that
    /// arrives after invalidation or unmount is discarded.
    pub async fn fetch_images(&self) {
        let owner = self.inner.owner;
        let generation = {
            let mut state = self.inner.state.lock().await;
            if !state.mounted || state.phase != DisplayPhase::Idle {
                return;
            }
            state.phase = DisplayPhase::Loading;
            state.generation
        };

        tracing::debug!(
            owner_kind = %owner.kind,
            owner_id = owner.id,
            generation,
            "Fetching display images"
        );

        let data = match self.inner.source.fetch_owner_with_images(owner).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    owner_kind = %owner.kind,
                    owner_id = owner.id,
                    error = %e,
                    "Display image fetch failed, using placeholder"
                );
                None
            }
        };
        let resolved = resolve_or_placeholder(data.as_ref());

        let mut state = self.inner.state.lock().await;
        if !state.mounted || state.generation != generation {
            tracing::debug!(
                owner_id = owner.id,
                generation,
                current = state.generation,
                "Discarding stale display fetch"
            );
            return;
        }

        let total = resolved.images.len();
        state.phase = DisplayPhase::ready_for(total);
        state.carousel.set_total(total);
        state.resolved = Some(resolved);
        self.inner.sync_timer(&mut state);
    }

    /// Report the card's position. Starts the fetch the first time the card
    /// comes near the viewport and returns whether it did.
    pub async fn report_visibility(&self, element: Rect, viewport: Rect) -> bool {
        let fired = self
            .inner
            .state
            .lock()
            .await
            .trigger
            .observe(element, viewport);
        if fired {
            self.fetch_images().await;
        }
        fired
    }

    /// Pointer entered the card: hold the current image.
    pub async fn pointer_enter(&self) {
        let mut state = self.inner.state.lock().await;
        state.carousel.pause();
        state.cancel_timer();
    }

    /// Pointer left the card: resume rotating from the held image.
    pub async fn pointer_leave(&self) {
        let mut state = self.inner.state.lock().await;
        state.carousel.resume();
        self.inner.sync_timer(&mut state);
    }

    /// Drop cached images and return to `Idle`, re-arming the visibility
    /// trigger. Any fetch still in flight will be discarded.
    pub async fn invalidate(&self) {
        let mut state = self.inner.state.lock().await;
        state.generation += 1;
        state.phase = DisplayPhase::Idle;
        state.resolved = None;
        state.carousel.set_total(0);
        state.cancel_timer();
        state.trigger.rearm();
        tracing::debug!(
            owner_kind = %self.inner.owner.kind,
            owner_id = self.inner.owner.id,
            generation = state.generation,
            "Display slot invalidated"
        );
    }

    /// The card left the screen for good. Stops the timer and ignores any
    /// later fetch results.
    pub async fn unmount(&self) {
        let mut state = self.inner.state.lock().await;
        state.mounted = false;
        state.resolved = None;
        state.cancel_timer();
    }

    /// Whether a rotation timer is currently live.
    pub async fn has_live_timer(&self) -> bool {
        self.inner
            .state
            .lock()
            .await
            .timer
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }

    pub async fn snapshot(&self) -> DisplaySnapshot {
        let state = self.inner.state.lock().await;
        let loading = state.phase == DisplayPhase::Loading;

        match &state.resolved {
            Some(resolved) => {
                let index = state.carousel.current_index();
                DisplaySnapshot {
                    image_src: resolved
                        .images
                        .get(index)
                        .cloned()
                        .unwrap_or_else(|| resolved.primary_src().to_string()),
                    is_carousel: resolved.is_carousel(),
                    loading,
                    all_images: resolved.images.clone(),
                    current_index: index,
                    total_images: resolved.images.len(),
                    is_game_fallback: resolved.is_game_fallback(),
                    phase: state.phase,
                }
            }
            None => DisplaySnapshot {
                image_src: PLACEHOLDER_IMAGE.to_string(),
                is_carousel: false,
                loading,
                all_images: Vec::new(),
                current_index: 0,
                total_images: 0,
                is_game_fallback: false,
                phase: state.phase,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
