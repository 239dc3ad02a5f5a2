//! Identifier policy port.

/// Produces ids for newly created tasks.
///
/// Implementations must never hand out the same id twice over the
/// lifetime of a store, including ids of tasks that have since been
/// deleted. The repository only guards against collisions with live
/// records.
pub trait IdGenerator: Send + Sync {
    /// Generates a new identifier.
    fn generate_id(&self) -> String;
}
