//! Lenient field deserializers. The open-data API is not consistent about
//! sending codes as strings or numbers, and sends `null` for blank fields.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

/// Accepts a string, a number, or `null` (as an empty string).
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        Some(StringOrNumber::String(s)) => s,
        Some(StringOrNumber::Int(n)) => n.to_string(),
        Some(StringOrNumber::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Accepts a string or `null` (as an empty string).
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses the leading `YYYY-MM-DD` of a date or datetime string.
pub(crate) fn parse_date_prefix(value: &str) -> Option<chrono::NaiveDate> {
    let prefix = value.get(..10)?;
    chrono::NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
