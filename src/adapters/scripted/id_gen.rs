//! Predictable id generators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::ports::IdGenerator;

/// Returns the queued ids in order, one per call.
pub struct ScriptedIdGenerator {
    ids: Mutex<VecDeque<String>>,
}

impl ScriptedIdGenerator {
    /// Creates a generator that will serve `ids` in order.
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { ids: Mutex::new(ids.into_iter().map(Into::into).collect()) }
    }
}

impl IdGenerator for ScriptedIdGenerator {
    fn generate_id(&self) -> String {
        self.ids
            .lock()
            .expect("scripted id lock poisoned")
            .pop_front()
            .expect("ScriptedIdGenerator exhausted: more ids requested than scripted")
    }
}

/// Produces `<prefix>-1`, `<prefix>-2`, ... and never repeats.
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id is `<prefix>-1`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicU64::new(1) }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
