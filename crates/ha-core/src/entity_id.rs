//! Entity id helper for `domain.object_id` strings
//!
//! Snapshot entity ids are taken as the server delivers them and are never
//! validated, so the helper works on plain `&str` and never fails.

/// Return the domain part of an entity id
///
/// The domain is everything before the first `.`. An id without any `.` is
/// returned whole.
pub fn split_domain(entity_id: &str) -> &str {
    match entity_id.split_once('.') {
        Some((domain, _)) => domain,
        None => entity_id,
    }
}
