//! In-process fan-out over a `tokio::sync::broadcast` channel.
//!
//! Shared via `Arc<EventBus>` between the API handlers that mutate images
//! and the listeners that invalidate display state.

use tokio::sync::broadcast;

use crate::image_events::ImageEvent;

const DEFAULT_CAPACITY: usize = 1024;

/// Publish/subscribe hub.
///
/// When the buffer is full the oldest unread events are dropped and slow
/// receivers observe `RecvError::Lagged`.
///
/// ```rust
/// use brushlog_core::images::OwnerRef;
/// use brushlog_events::{EventBus, ImageEvent, ImageEventKind};
///
/// let bus: EventBus = EventBus::default();
/// let mut rx = bus.subscribe();
/// bus.publish(ImageEvent::new(ImageEventKind::Added, OwnerRef::battle(1), 7));
/// assert!(rx.try_recv().is_ok());
/// ```
pub struct EventBus<E = ImageEvent> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> EventBus<E> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send `event` to every current subscriber and return how many there
    /// were. With no subscribers the event is dropped.
    pub fn publish(&self, event: E) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
