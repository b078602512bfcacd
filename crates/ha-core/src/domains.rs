//! Domain names and prefix matching
//!
//! Only the read-only measurement domains are named here; the report never
//! looks at any other domain.

/// Domain of numeric and text sensors
pub const SENSOR: &str = "sensor";

/// Domain of on/off sensors
pub const BINARY_SENSOR: &str = "binary_sensor";

/// Check whether an entity id starts with `<domain>.`
///
/// This is a pure prefix test: `binary_sensor.door` does not belong to the
/// `sensor` domain, and an id without a separator belongs to no domain.
pub fn has_domain(entity_id: &str, domain: &str) -> bool {
    entity_id
        .strip_prefix(domain)
        .is_some_and(|rest| rest.starts_with('.'))
}
