//! Ad scripts as a scoped capability: a view acquires a lease on entry and the
//! lease gives its slot back when dropped, whatever path the handler exits by.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdScript {
    pub src: String,
    #[serde(rename = "async")]
    pub async_load: bool,
}

impl AdScript {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            async_load: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdSlots {
    scripts: Arc<[AdScript]>,
    active: Arc<AtomicUsize>,
}

impl AdSlots {
    pub fn new(scripts: Vec<AdScript>) -> Self {
        Self {
            scripts: scripts.into(),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn acquire(&self, view: &'static str) -> AdLease {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(view, active, "ad lease acquired");
        AdLease {
            scripts: Arc::clone(&self.scripts),
            active: Arc::clone(&self.active),
            view,
        }
    }

    /// Leases not yet released.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

impl Default for AdSlots {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug)]
pub struct AdLease {
    scripts: Arc<[AdScript]>,
    active: Arc<AtomicUsize>,
    view: &'static str,
}

impl AdLease {
    pub fn scripts(&self) -> &[AdScript] {
        &self.scripts
    }
}

impl Drop for AdLease {
    fn drop(&mut self) {
        let active = self.active.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(view = self.view, active, "ad lease released");
    }
}
