//! In-memory [`ImageOwnerSource`] for runtime tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use brushlog_core::error::CoreError;
use brushlog_core::image_resolution::OwnerDisplayData;
use brushlog_core::images::{ImageCandidate, OwnerRef};
use brushlog_core::source::ImageOwnerSource;

/// Owner data keyed by owner, with a call counter, optional latency, and
/// one-shot failure injection.
#[derive(Default)]
pub struct MemorySource {
    owners: Mutex<HashMap<OwnerRef, OwnerDisplayData>>,
    calls: AtomicUsize,
    delay: Duration,
    fail_next: AtomicBool,
}

impl MemorySource {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn insert(&self, owner: OwnerRef, data: OwnerDisplayData) {
        self.owners.lock().unwrap().insert(owner, data);
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageOwnerSource for MemorySource {
    async fn fetch_owner_with_images(
        &self,
        owner: OwnerRef,
    ) -> Result<Option<OwnerDisplayData>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CoreError::Internal("connection reset".into()));
        }
        Ok(self.owners.lock().unwrap().get(&owner).cloned())
    }
}

/// Owner data with one image per URL, in the given display order.
pub fn data_with_images(urls: &[&str]) -> OwnerDisplayData {
    OwnerDisplayData {
        images: (0_i32..)
            .zip(urls)
            .map(|(order, url)| ImageCandidate {
                id: i64::from(order) + 1,
                image_url: (*url).to_string(),
                display_order: order,
                is_primary: false,
            })
            .collect(),
        ..Default::default()
    }
}
