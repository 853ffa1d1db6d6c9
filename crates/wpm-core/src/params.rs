//! Ordered request parameter mapping.
//!
//! WPM requests carry their parameters either as `&key=value` pairs appended
//! to a GET query string or as a JSON object body for POST and PUT. Both
//! forms keep the caller's insertion order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Insertion-ordered mapping of parameter names to JSON values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    pairs: Vec<(String, Value)>,
}

impl Params {
    /// Create a new, empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Build a mapping from any value that serializes to a JSON object.
    ///
    /// Struct fields keep their declaration order and `None` fields skipped
    /// by serde are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not serialize to a JSON object.
    pub fn from_serializable<T>(value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Null => Ok(Self::new()),
            other => Err(Error::InvalidRequest(format!(
                "parameters must serialize to a JSON object, got `{other}`"
            ))),
        }
    }

    /// Set a parameter, replacing any existing value for the key in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Set a parameter when the value is present.
    pub fn push_opt<T>(&mut self, key: impl Into<String>, value: Option<T>)
    where
        T: Into<Value>,
    {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Set a parameter using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: impl Into<String>, value: Option<T>, map: F)
    where
        F: FnOnce(T) -> Value,
    {
        if let Some(value) = value {
            self.push(key, map(value));
        }
    }

    /// Builder-style variant of [`Params::push`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Look up a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Render the parameters as `&key=value` query pairs, unencoded.
    #[must_use]
    pub fn to_query_suffix(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("&{key}={}", render_value(value)))
            .collect()
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, Value)> {
        self.pairs
    }
}

/// Render a JSON value the way it appears in a query string.
///
/// Strings are written without quotes; everything else uses its JSON text.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (key, value) in &self.pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Conversion of typed request models into a parameter mapping.
///
/// Implemented for everything that serializes to a JSON object, including
/// [`Params`] itself and `serde_json::Value` maps.
pub trait ToParams {
    /// Produce the parameter mapping for this value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as parameters.
    fn to_params(&self) -> Result<Params>;
}

impl<T> ToParams for T
where
    T: Serialize + ?Sized,
{
    fn to_params(&self) -> Result<Params> {
        Params::from_serializable(self)
    }
}

/// Serde adapter for lists the API expects as one comma-joined string.
///
/// Use with `#[serde(with = "wpm_core::params::comma_separated")]` on a
/// `Vec<T>` field.
pub mod comma_separated {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    /// Serialize as `a,b,c`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<T, S>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        let joined = items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        serializer.serialize_str(&joined)
    }

    /// Deserialize from `a,b,c`; an empty string yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if an element fails to parse.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| item.parse::<T>().map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Serde adapter for optional switches the API takes as `1`/`0`.
///
/// Use with `#[serde(default, with = "wpm_core::params::flag",
/// skip_serializing_if = "Option::is_none")]` on an `Option<bool>` field.
/// Reading accepts a bool, a number or a string such as `"1"` or `"true"`.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    /// Serialize `Some(true)` as `1` and `Some(false)` as `0`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(flag: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match flag {
            Some(flag) => serializer.serialize_u8(u8::from(*flag)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize a loosely typed switch.
    ///
    /// # Errors
    ///
    /// Returns an error for a string that is not a recognised switch value.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawFlag>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawFlag::Bool(flag)) => Ok(Some(flag)),
            Some(RawFlag::Number(n)) => Ok(Some(n != 0)),
            Some(RawFlag::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => Ok(Some(true)),
                "0" | "false" => Ok(Some(false)),
                other => Err(serde::de::Error::custom(format!("`{other}` is not a switch"))),
            },
        }
    }
}
