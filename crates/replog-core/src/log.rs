use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::message::Message;

struct LogInner {
    entries: HashMap<u32, Arc<str>>,
    /// Smallest id not yet present — the length of the gap-free prefix.
    next_contiguous: u32,
}

/// The ordered log store, plus the primary's id-assigning writer.
///
/// Ids are dense on the primary: after `n` successful appends the key set is
/// exactly `{0,..,n-1}`. On a secondary ids may be sparse transiently (workers
/// race independently) but an accepted `(id, payload)` is permanent.
pub struct Log {
    inner: Mutex<LogInner>,
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}

impl Log {
    pub fn new() -> Self {
        Log {
            inner: Mutex::new(LogInner {
                entries: HashMap::new(),
                next_contiguous: 0,
            }),
        }
    }

    /// Inserts `(id, payload)`. Returns `false` without mutating if `id` was
    /// already present — this is the secondary's de-duplication point.
    pub fn insert(&self, id: u32, payload: impl Into<Arc<str>>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.entries.contains_key(&id) {
            return false;
        }
        inner.entries.insert(id, payload.into());
        while inner.entries.contains_key(&inner.next_contiguous) {
            inner.next_contiguous += 1;
        }
        true
    }

    /// The longest contiguous `[0..k)` prefix currently present, as a snapshot.
    pub fn prefix(&self) -> Vec<Arc<str>> {
        let inner = self.inner.lock().unwrap();
        (0..inner.next_contiguous)
            .map(|id| inner.entries.get(&id).expect("prefix id must be present").clone())
            .collect()
    }

    /// Total number of entries held, which may exceed `prefix().len()` if
    /// there's a gap (ids beyond the gap are present but not yet readable).
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Test-only: drops all entries and resets the contiguity counter.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.next_contiguous = 0;
    }

    /// Primary-only writer. Assigns the next id under the same lock
    /// `insert` uses, so the client-observable append order is exactly the
    /// lock acquisition order. A failure to insert a freshly assigned id
    /// means the density invariant is already broken elsewhere — that's a
    /// logic bug, not a recoverable condition, so this panics rather than
    /// returning a `Result`.
    pub fn append_raw(&self, payload: impl Into<Arc<str>>) -> Message {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.entries.len() as u32;
        let payload = payload.into();
        let inserted = inner.entries.insert(id, payload.clone()).is_none();
        assert!(inserted, "primary log density invariant violated at id {id}");
        while inner.entries.contains_key(&inner.next_contiguous) {
            inner.next_contiguous += 1;
        }
        Message { id, payload }
    }
}
