//! Bundle of capabilities a repository is built from.

use std::sync::Arc;

use crate::adapters::live::{DiskFileSystem, SystemClock, UuidGenerator};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;

/// Holds one instance of each port.
///
/// Build it once at process start and hand it to
/// [`TaskRepository::new`](crate::repository::TaskRepository::new). Fields
/// are `Arc`s because the repository moves them into blocking file work.
#[derive(Clone)]
pub struct StoreContext {
    /// Timestamps for `createdAt` / `updatedAt`.
    pub clock: Arc<dyn Clock>,
    /// Where the backing file lives.
    pub fs: Arc<dyn FileSystem>,
    /// Id policy for new tasks.
    pub id_gen: Arc<dyn IdGenerator>,
}

impl StoreContext {
    /// System clock, real disk, random UUIDs.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            fs: Arc::new(DiskFileSystem),
            id_gen: Arc::new(UuidGenerator),
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the filesystem.
    #[must_use]
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replaces the id generator.
    #[must_use]
    pub fn with_id_gen(mut self, id_gen: impl IdGenerator + 'static) -> Self {
        self.id_gen = Arc::new(id_gen);
        self
    }
}

impl Default for StoreContext {
    fn default() -> Self {
        Self::live()
    }
}
