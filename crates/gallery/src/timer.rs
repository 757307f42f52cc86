use std::sync::Weak;
use std::time::Duration;

use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::slot::SlotInner;

/// Spawn the rotation loop for one slot.
///
/// The first advance happens one full `period` after spawning. The loop
/// exits when `token` is cancelled or the slot has been dropped. The token
/// is re-checked under the slot lock so a tick racing a cancellation is
/// never applied.
pub(crate) fn spawn_rotation(
    slot: Weak<SlotInner>,
    token: CancellationToken,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                () = token.cancelled() => break,
                _ = interval.tick() => {
                    let Some(inner) = slot.upgrade() else { break };
                    let mut state = inner.state.lock().await;
                    if token.is_cancelled() {
                        break;
                    }
                    if let Some(index) = state.carousel.tick() {
                        tracing::trace!(
                            owner_id = inner.owner.id,
                            index,
                            "Carousel advanced"
                        );
                    }
                }
            }
        }
    })
}
