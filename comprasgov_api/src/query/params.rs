//! Raw parameter mapping sent as the query string of a request.

use std::fmt;

use url::Url;

/// A single query parameter value. The API accepts text and integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
}

impl ParamValue {
    /// Empty text is never sent. Zero is a real value and is kept.
    pub fn is_empty(&self) -> bool {
        matches!(self, ParamValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

/// Ordered mapping from parameter name to value.
///
/// Setting a name that is already present replaces its value in place, so the
/// serialized order is the order in which names were first set. Absent and
/// empty values never reach the URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value for the same key.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> &mut Self {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    /// Sets `key` only when a value is present.
    pub fn set_opt<V: Into<ParamValue>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Merges `other` into `self`; keys in `other` win.
    pub fn extend(&mut self, other: &QueryParams) -> &mut Self {
        for (key, value) in &other.pairs {
            self.set(key, value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Pairs that will actually be sent, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.pairs
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Appends the non-empty parameters to `url`.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (key, value) in self.iter() {
            url.query_pairs_mut()
                .append_pair(key, value.to_string().as_str());
        }
        url
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: AsRef<str>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.set(key.as_ref(), value);
        }
        params
    }
}
