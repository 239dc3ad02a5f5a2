//! Clock that replays a fixed list of instants.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Returns the queued instants in order, one per call.
pub struct ScriptedClock {
    instants: Mutex<VecDeque<DateTime<Utc>>>,
}

impl ScriptedClock {
    /// Creates a clock that will serve `instants` in order.
    #[must_use]
    pub fn new(instants: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        Self { instants: Mutex::new(instants.into_iter().collect()) }
    }

    /// Creates a clock from RFC 3339 strings.
    ///
    /// # Panics
    ///
    /// Panics if any string is not a valid RFC 3339 timestamp.
    #[must_use]
    pub fn from_rfc3339(instants: &[&str]) -> Self {
        Self::new(instants.iter().map(|s| {
            DateTime::parse_from_rfc3339(s)
                .unwrap_or_else(|e| panic!("ScriptedClock: bad timestamp {s:?}: {e}"))
                .with_timezone(&Utc)
        }))
    }

}

impl Clock for ScriptedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instants
            .lock()
            .expect("scripted clock lock poisoned")
            .pop_front()
            .expect("ScriptedClock exhausted: more calls to now() than scripted instants")
    }
}
