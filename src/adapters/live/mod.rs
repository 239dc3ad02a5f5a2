//! Production adapters backed by the system clock, random UUIDs and `std::fs`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;

pub use clock::SystemClock;
pub use filesystem::DiskFileSystem;
pub use id_gen::UuidGenerator;
