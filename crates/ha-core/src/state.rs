//! State type representing one entity in a `GET /api/states` snapshot

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{STATE_UNAVAILABLE, STATE_UNKNOWN};

/// The state of an entity as delivered by the state server
///
/// Timestamps are kept as the server's strings; the snapshot is only read and
/// re-emitted, never compared. Every field tolerates being missing or `null`
/// so a single odd entity cannot fail the whole snapshot. Extra keys such as
/// `context` or `last_reported` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct State {
    /// The entity id (e.g. "sensor.outdoor_temperature")
    #[serde(default, deserialize_with = "lenient_string")]
    pub entity_id: String,

    /// The state value (e.g. "on", "23.5", "unavailable")
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,

    /// Attributes associated with the state
    #[serde(default, deserialize_with = "lenient_attributes")]
    pub attributes: HashMap<String, Value>,

    /// When the state was last updated (even if the value didn't change)
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_updated: String,

    /// When the state value last changed
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_changed: String,
}

impl State {
    /// Get a raw attribute value, treating `null` as absent
    pub fn attribute_value(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// Get an attribute value by key, converted to `T`
    ///
    /// Returns `None` when the attribute is absent or has a different shape.
    pub fn attribute<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attribute_value(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Get an attribute rendered as text
    ///
    /// Strings are returned as-is; any other JSON value is rendered as its
    /// compact JSON text.
    pub fn attribute_text(&self, key: &str) -> Option<String> {
        self.attribute_value(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Check if a state value is exactly "unknown" or "unavailable"
///
/// Case and whitespace are significant; "Unknown" is an ordinary value.
pub fn is_unknown_or_unavailable(state: &str) -> bool {
    state == STATE_UNKNOWN || state == STATE_UNAVAILABLE
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn lenient_attributes<'de, D>(deserializer: D) -> Result<HashMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => map.into_iter().collect(),
        _ => HashMap::new(),
    })
}
