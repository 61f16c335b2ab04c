use std::collections::HashSet;
use tokio::sync::Mutex;

/// Set of addresses already claimed during one crawl.
///
/// Entries are never removed. The lock is held only for the
/// check-and-insert, never across a fetch.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `address` is claimed, `false` afterwards.
    pub async fn claim(&self, address: &str) -> bool {
        let mut seen = self.seen.lock().await;
        if seen.contains(address) {
            false
        } else {
            seen.insert(address.to_string());
            true
        }
    }

    pub async fn contains(&self, address: &str) -> bool {
        self.seen.lock().await.contains(address)
    }

    pub async fn len(&self) -> usize {
        self.seen.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.seen.lock().await.is_empty()
    }
}
