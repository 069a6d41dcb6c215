use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Tracks which trigger keys have a submission pending.
///
/// A key stays taken for as long as the returned [`InFlightPermit`] lives.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Releases its key when dropped
#[derive(Debug)]
pub struct InFlightPermit {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    // A panic while holding the lock cannot leave the set half-updated
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take `key`, or `None` when a submission with the same key is pending
    pub fn try_acquire(&self, key: &str) -> Option<InFlightPermit> {
        if !lock(&self.in_flight).insert(key.to_string()) {
            return None;
        }

        Some(InFlightPermit {
            key: key.to_string(),
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.key);
        tracing::debug!("Released in-flight key {}", self.key);
    }
}
