//! Core types for Home Assistant state snapshots
//!
//! This crate provides the types shared by the snapshot client and the report
//! pipeline: the raw entity `State` as delivered by `GET /api/states`, entity
//! id helpers, and the well-known domain and attribute names.

mod domains;
mod entity_id;
mod state;

pub use domains::{has_domain, BINARY_SENSOR, SENSOR};
pub use entity_id::split_domain;
pub use state::{is_unknown_or_unavailable, State};

/// State value reported when an entity's value is not known
pub const STATE_UNKNOWN: &str = "unknown";

/// State value reported when an entity cannot be reached
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// Well-known attribute keys carried in `State::attributes`
pub mod attributes {
    /// Human readable name of the entity
    pub const FRIENDLY_NAME: &str = "friendly_name";

    /// Unit the state value is expressed in (e.g. "°C")
    pub const UNIT_OF_MEASUREMENT: &str = "unit_of_measurement";

    /// Device class (e.g. "temperature", "door")
    pub const DEVICE_CLASS: &str = "device_class";

    /// State class for long-term statistics (e.g. "measurement")
    pub const STATE_CLASS: &str = "state_class";

    /// Material Design icon name
    pub const ICON: &str = "icon";

    /// Attribution text set by the integration providing the data
    pub const ATTRIBUTION: &str = "attribution";

    /// Set when the state was restored from the previous run
    pub const RESTORED: &str = "restored";

    /// Bitmask of features the entity supports
    pub const SUPPORTED_FEATURES: &str = "supported_features";
}
