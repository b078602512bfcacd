//! The flat, fixed-schema record every report artifact is built from

use ha_core::{attributes, split_domain, State};
use serde::Serialize;
use serde_json::{Number, Value};

/// Placeholder written for any attribute the entity does not carry
pub const NOT_AVAILABLE: &str = "N/A";

/// Column names in output order; matches the serialized field names
pub const COLUMNS: [&str; 13] = [
    "Entity ID",
    "Friendly Name",
    "State",
    "Unit",
    "Device Class",
    "State Class",
    "Icon",
    "Last Updated",
    "Last Changed",
    "Domain",
    "Integration",
    "Restored",
    "Supported Features",
];

/// The `supported_features` attribute, or its placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SupportedFeatures {
    /// Any numeric value, kept exactly as the server sent it
    Number(Number),
    /// `N/A` when absent, the string itself, or the JSON text of anything else
    Text(String),
}

impl SupportedFeatures {
    fn from_state(state: &State) -> Self {
        match state.attribute_value(attributes::SUPPORTED_FEATURES) {
            None => SupportedFeatures::Text(NOT_AVAILABLE.to_string()),
            Some(Value::Number(n)) => SupportedFeatures::Number(n.clone()),
            Some(Value::String(s)) => SupportedFeatures::Text(s.clone()),
            Some(other) => SupportedFeatures::Text(other.to_string()),
        }
    }
}

/// One sensor or binary sensor, flattened
///
/// Every field is always populated: missing attributes become `N/A`
/// (or `false` for `restored`), so renderers never branch on absence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorRecord {
    #[serde(rename = "Entity ID")]
    pub entity_id: String,
    #[serde(rename = "Friendly Name")]
    pub friendly_name: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Device Class")]
    pub device_class: String,
    #[serde(rename = "State Class")]
    pub state_class: String,
    #[serde(rename = "Icon")]
    pub icon: String,
    #[serde(rename = "Last Updated")]
    pub last_updated: String,
    #[serde(rename = "Last Changed")]
    pub last_changed: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Integration")]
    pub integration: String,
    #[serde(rename = "Restored")]
    pub restored: bool,
    #[serde(rename = "Supported Features")]
    pub supported_features: SupportedFeatures,
}

impl SensorRecord {
    /// Flatten one entity state. Never fails.
    pub fn from_state(state: &State) -> Self {
        let text = |key: &str| {
            state
                .attribute_text(key)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        Self {
            entity_id: state.entity_id.clone(),
            friendly_name: text(attributes::FRIENDLY_NAME),
            state: state.state.clone(),
            unit: text(attributes::UNIT_OF_MEASUREMENT),
            device_class: text(attributes::DEVICE_CLASS),
            state_class: text(attributes::STATE_CLASS),
            icon: text(attributes::ICON),
            last_updated: state.last_updated.clone(),
            last_changed: state.last_changed.clone(),
            domain: split_domain(&state.entity_id).to_string(),
            integration: text(attributes::ATTRIBUTION),
            restored: state.attribute::<bool>(attributes::RESTORED).unwrap_or(false),
            supported_features: SupportedFeatures::from_state(state),
        }
    }

    /// Normalize a sequence of states, keeping their order
    pub fn from_states<'a>(states: impl IntoIterator<Item = &'a State>) -> Vec<Self> {
        states.into_iter().map(Self::from_state).collect()
    }
}
