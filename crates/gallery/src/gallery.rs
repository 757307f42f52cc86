//! Registry of mounted display slots and bus-driven invalidation.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use brushlog_core::images::OwnerRef;
use brushlog_core::source::ImageOwnerSource;
use brushlog_events::ImageEvent;
use tokio::sync::{broadcast, RwLock};

use crate::config::GalleryConfig;
use crate::slot::{DisplaySlot, SlotInner};

/// Creates display slots and invalidates them when their owner changes.
///
/// Slots are tracked weakly: dropping every handle of a slot unregisters
/// it. Designed to be shared via `Arc<Gallery>`.
pub struct Gallery {
    source: Arc<dyn ImageOwnerSource>,
    config: GalleryConfig,
    slots: RwLock<HashMap<OwnerRef, Vec<Weak<SlotInner>>>>,
}

impl Gallery {
    pub fn new(source: Arc<dyn ImageOwnerSource>, config: GalleryConfig) -> Self {
        Self {
            source,
            config,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Create and register a slot for `owner`.
    ///
    /// The same owner may be mounted several times (e.g. in two lists).
    pub async fn mount(&self, owner: OwnerRef) -> DisplaySlot {
        let slot = DisplaySlot::new(owner, Arc::clone(&self.source), self.config);
        let mut slots = self.slots.write().await;
        let entry = slots.entry(owner).or_default();
        entry.retain(|weak| weak.strong_count() > 0);
        entry.push(Arc::downgrade(&slot.inner));
        slot
    }

    /// Invalidate every live slot of `owner`. Returns how many were reset.
    ///
    /// Dead entries for `owner` are dropped, and the owner is unregistered
    /// once none are left.
    pub async fn invalidate(&self, owner: OwnerRef) -> usize {
        let slots = self.take_live(owner).await;
        futures::future::join_all(slots.iter().map(DisplaySlot::invalidate)).await;
        slots.len()
    }

    async fn take_live(&self, owner: OwnerRef) -> Vec<DisplaySlot> {
        let mut slots = self.slots.write().await;
        let Some(weaks) = slots.get_mut(&owner) else {
            return Vec::new();
        };
        let live: Vec<DisplaySlot> = weaks
            .iter()
            .filter_map(Weak::upgrade)
            .map(|inner| DisplaySlot { inner })
            .collect();
        weaks.retain(|weak| weak.strong_count() > 0);
        if weaks.is_empty() {
            slots.remove(&owner);
        }
        live
    }

    /// Drop registry entries whose slots are gone.
    pub async fn prune(&self) {
        let mut slots = self.slots.write().await;
        slots.retain(|_, weaks| {
            weaks.retain(|weak| weak.strong_count() > 0);
            !weaks.is_empty()
        });
    }

    /// Consume the event bus and invalidate slots whose owner changed.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](brushlog_events::EventBus) is dropped).
    pub async fn run_invalidation(self: Arc<Self>, mut receiver: broadcast::Receiver<ImageEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let count = self.invalidate(event.owner).await;
                    tracing::debug!(
                        event = %event.kind,
                        owner_kind = %event.owner.kind,
                        owner_id = event.owner.id,
                        count,
                        "Invalidated display slots"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Missed events may have touched any owner.
                    tracing::warn!(skipped = n, "Gallery invalidation lagged, resetting all slots");
                    self.invalidate_all().await;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, gallery invalidation shutting down");
                    break;
                }
            }
        }
    }

    async fn invalidate_all(&self) {
        self.prune().await;
        let owners: Vec<OwnerRef> = self.slots.read().await.keys().copied().collect();
        for owner in owners {
            self.invalidate(owner).await;
        }
    }
}
