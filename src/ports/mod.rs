//! Port traits for the capabilities the store consumes.
//!
//! Each trait is a boundary between the store and something outside it
//! (time, identifier policy, the filesystem). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
