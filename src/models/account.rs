//! Account envelope types.
//!
//! The proxy relays account JSON, so decoding then encoding an envelope must
//! give back the same document: absent keys stay absent and explicit `null`s
//! stay `null`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Wrapper used by the upstream API for every account payload: `{"data": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccountEnvelope {
    pub data: Account,
}

/// A bank account resource as owned by the upstream API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Account {
    /// Upstream identifier, opaque to the proxy.
    pub id: String,

    pub organisation_id: String,

    /// Resource type discriminator (`"accounts"`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Optimistic concurrency version, required by upstream deletes.
    /// `Some(None)` is an explicit `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<Option<i64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AccountAttributes>,

    /// Fields this crate does not model (timestamps, relationships, links).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    /// The version number, if upstream sent one.
    pub fn current_version(&self) -> Option<i64> {
        self.version.flatten()
    }
}

/// Bank identifiers, names and flags. Passed through without validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AccountAttributes(Map<String, Value>);

impl AccountAttributes {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn country(&self) -> Option<&str> {
        self.text("country")
    }

    pub fn iban(&self) -> Option<&str> {
        self.text("iban")
    }

    /// Account holder names, skipping any non-string entries.
    pub fn name(&self) -> Option<Vec<&str>> {
        self.0
            .get("name")?
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }
}

/// Deserializes a present key, `null` included, as `Some`. Absent keys fall
/// back to the field default.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
