use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An adhesion request against an ata item.
///
/// The endpoint does not publish a stable schema, so the record is kept as the
/// JSON object the API returned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Adhesion {
    pub fields: Map<String, Value>,
}

impl Adhesion {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field rendered as text: strings as-is, other scalars via JSON.
    pub fn get_text(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
