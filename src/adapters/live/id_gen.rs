//! Random task ids.

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Hands out random version 4 UUIDs in hyphenated form.
///
/// With 122 random bits a repeat is not a practical concern, which is what
/// lets deleted ids stay retired without keeping tombstones.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
