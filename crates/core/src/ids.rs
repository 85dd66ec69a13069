//! Identifiers for records created during a session.
//!
//! Seeded records keep whatever ids the catalog gives them (`P-001`, `AL-004`, ...). Records
//! created from forms get `<PREFIX>-<32 lowercase hex>`, where the hex part is the canonical
//! simple form of a v4 UUID, so they can never collide with seeded ids or with each other.

use crate::error::{WardError, WardResult};
use uuid::Uuid;

/// Allocates a fresh id with the given prefix.
pub fn new_entity_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Checks that `id` has the generated shape for `prefix`.
///
/// # Errors
/// Returns [`WardError::InvalidInput`] if the prefix differs or the suffix is not 32 lowercase
/// hex characters.
pub fn parse_generated_id<'a>(prefix: &str, id: &'a str) -> WardResult<&'a str> {
    let suffix = id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(|| WardError::InvalidInput(format!("id {id:?} does not start with {prefix}-")))?;

    let canonical = suffix.len() == 32
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !canonical {
        return Err(WardError::InvalidInput(format!(
            "id {id:?} must end in 32 lowercase hex characters"
        )));
    }
    Ok(suffix)
}
