//! Deterministic adapters for tests and demos.
//!
//! These serve pre-loaded values instead of touching the real clock,
//! random number generator or disk, so repository behaviour can be
//! asserted exactly.

pub mod clock;
pub mod filesystem;
pub mod id_gen;

pub use clock::ScriptedClock;
pub use filesystem::{Fault, MemoryFileSystem};
pub use id_gen::{ScriptedIdGenerator, SequentialIdGenerator};
