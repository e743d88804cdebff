//! ID generation utilities.

use uuid::Uuid;

/// Generates a new unique identifier as a string.
///
/// Used for presentation identities (alerts) where only uniqueness matters.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
