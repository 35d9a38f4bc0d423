//! Per-listing mutual exclusion
//!
//! The [conflict-check, insert-or-update] sequence in `create` and
//! `transition(->Confirmed)` must be serialized against all other
//! mutations on the same listing. Operations on different listings
//! proceed in parallel with no coordination.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct ListingLocks {
    inner: DashMap<i32, Arc<Mutex<()>>>,
}

impl ListingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for one listing, created on first use
    pub fn for_listing(&self, listing_id: i32) -> Arc<Mutex<()>> {
        self.inner
            .entry(listing_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
