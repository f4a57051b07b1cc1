//! Export request parameters and their query-string encoding
//!
//! Parameters are passed to the remote API opaquely. Two conventions exist for
//! multi-valued parameters and callers choose one by how they name the key:
//!
//! - array style: `idApp[]` with a list value, emitted as repeated keys
//! - CSV style: `idApp` with a comma-joined string
//!
//! Commas stay literal in the final query string. Everything else outside the
//! unreserved set is percent-encoded, spaces become `+`.

use serde_json::Value;
use std::fmt;

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Rendered once as `key=value`
    Scalar(String),
    /// Rendered as one `key=item` pair per element
    List(Vec<String>),
}

impl ParamValue {
    /// Builds a value from JSON; nested objects are rejected
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(scalar_from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            other => scalar_from_json(other).map(Self::Scalar),
        }
    }
}

fn scalar_from_json(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("Unsupported parameter value: {other}")),
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Scalar(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl<T: ToString> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.iter().map(ToString::to_string).collect())
    }
}

/// Insertion-ordered parameter mapping for create/get/cancel calls
///
/// # Examples
///
/// ```
/// use mytracker::domain::ExportParams;
///
/// let params = ExportParams::new()
///     .with("dateFrom", "2022-05-01")
///     .with("idApp[]", vec![1, 2, 3])
///     .with("selectors", "tsEvent,idApp");
///
/// assert_eq!(
///     params.encode(),
///     "dateFrom=2022-05-01&idApp%5B%5D=1&idApp%5B%5D=2&idApp%5B%5D=3&selectors=tsEvent,idApp"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportParams {
    entries: Vec<(String, ParamValue)>,
}

impl ExportParams {
    /// Creates an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Appends `value` to `key`, turning a scalar into a list on repetition
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let Some((_, entry)) = self.entries.iter_mut().find(|(k, _)| *k == key) else {
            self.entries.push((key, ParamValue::Scalar(value)));
            return;
        };
        match entry {
            ParamValue::List(items) => items.push(value),
            ParamValue::Scalar(first) => {
                let first = std::mem::take(first);
                *entry = ParamValue::List(vec![first, value]);
            }
        }
    }

    /// Looks up a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates keys and values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Builds parameters from a JSON object
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "Export parameters must be a JSON object".to_string())?;

        let mut params = Self::new();
        for (key, value) in object {
            let value = ParamValue::from_json(value).map_err(|e| format!("{key}: {e}"))?;
            params.insert(key.clone(), value);
        }
        Ok(params)
    }

    /// Encodes the parameters as a query string (without the leading `?`)
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.entries {
            let key = form_encode(key);
            match value {
                ParamValue::Scalar(v) => pairs.push(format!("{key}={}", form_encode(v))),
                ParamValue::List(items) => {
                    for item in items {
                        pairs.push(format!("{key}={}", form_encode(item)));
                    }
                }
            }
        }
        pairs.join("&").replace("%2C", ",")
    }
}

impl fmt::Display for ExportParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K, V> FromIterator<(K, V)> for ExportParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Form-style percent-encoding: unreserved characters (`A-Z a-z 0-9 - . _ ~`)
/// pass through, space becomes `+`, everything else becomes `%XX`
pub fn form_encode(input: &str) -> String {
    urlencoding::encode(input).replace("%20", "+")
}
