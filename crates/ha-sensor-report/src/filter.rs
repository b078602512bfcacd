//! Splits a snapshot into the two domains the report covers

use ha_core::{has_domain, State, BINARY_SENSOR, SENSOR};

/// Sensors and binary sensors of one snapshot, each in snapshot order
#[derive(Debug, Default)]
pub struct DomainPartition<'a> {
    pub sensors: Vec<&'a State>,
    pub binary_sensors: Vec<&'a State>,
}

/// Partition states by entity id prefix
///
/// Only the id is inspected. Ids that are neither `sensor.*` nor
/// `binary_sensor.*` are dropped without error.
pub fn partition(states: &[State]) -> DomainPartition<'_> {
    let mut result = DomainPartition::default();
    for state in states {
        if has_domain(&state.entity_id, SENSOR) {
            result.sensors.push(state);
        } else if has_domain(&state.entity_id, BINARY_SENSOR) {
            result.binary_sensors.push(state);
        }
    }
    result
}
