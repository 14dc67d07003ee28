//! Node identifiers.
//!
//! Ids only need to be unique within one build, but a v4 UUID per node makes
//! them unique across builds too, so ids from repeated conversions can be
//! mixed in a frontend without collisions. Each call draws independently
//! from the thread-local generator; concurrent builds share no state.

use uuid::Uuid;

/// A fresh opaque node id.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
