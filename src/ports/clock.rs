//! Clock port for timestamping tasks.

use chrono::{DateTime, Utc};

/// Source of `createdAt` / `updatedAt` values.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
