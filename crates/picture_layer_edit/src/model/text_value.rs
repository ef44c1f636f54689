//! Serde helpers for the host's string typed scalars.
//!
//! Reading accepts the string form (`"255"`, `"true"`) as well as bare JSON
//! scalars. An empty string or `null` reads as 0 / false, which is what the
//! host's `Number()` conversion does. Writing always produces the string form.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Parses user or file text into a host integer.
///
/// Blank text is 0. Integral decimals such as `"12.0"` are accepted.
pub fn parse_number_text(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    if let Ok(value) = text.parse::<i32>() {
        return Some(value);
    }
    let value = text.parse::<f64>().ok()?;
    integral(value)
}

/// Parses a host boolean. Only `true` and `false` (any case) and blank text
/// are recognised.
pub fn parse_flag_text(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("false") {
        Some(false)
    } else if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else {
        None
    }
}

fn integral(value: f64) -> Option<i32> {
    if value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

/// A decimal host number kept in the text it was read from.
///
/// Position, scale and opacity are read by the host with `Number()`, so
/// values such as `"12.5"` or `""` are valid there. The text is written back
/// unchanged; [`Self::value`] is what the host computes from it.
#[derive(Debug, Clone, PartialEq)]
pub struct HostNumber {
    text: String,
    value: f64,
}

impl HostNumber {
    /// Parses edited text. Blank text is 0; non-finite values are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let value = if text.is_empty() {
            0.0
        } else {
            text.parse::<f64>().ok().filter(|value| value.is_finite())?
        };
        Some(Self { text: text.to_string(), value })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::String(text) => Self::parse(text)
                .map(|number| Self { text: text.clone(), ..number })
                .ok_or_else(|| format!("expected a number, found \"{text}\"")),
            Value::Number(number) => number
                .as_f64()
                .map(|value| Self {
                    text: number.to_string(),
                    value,
                })
                .ok_or_else(|| format!("number out of range: {number}")),
            other => Err(format!("expected a number, found {other}")),
        }
    }
}

impl Default for HostNumber {
    fn default() -> Self {
        Self::from(0)
    }
}

impl From<i32> for HostNumber {
    fn from(value: i32) -> Self {
        Self {
            text: value.to_string(),
            value: f64::from(value),
        }
    }
}

impl fmt::Display for HostNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for HostNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for HostNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(de::Error::custom)
    }
}

pub(crate) fn number_from_value(value: &Value) -> Result<i32, String> {
    match value {
        Value::Null => Ok(0),
        Value::String(text) => parse_number_text(text).ok_or_else(|| format!("expected an integer, found \"{text}\"")),
        Value::Number(number) => number
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .or_else(|| number.as_f64().and_then(integral))
            .ok_or_else(|| format!("integer out of range: {number}")),
        other => Err(format!("expected an integer, found {other}")),
    }
}

pub(crate) fn flag_from_value(value: &Value) -> Result<bool, String> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => parse_flag_text(text).ok_or_else(|| format!("expected \"true\" or \"false\", found \"{text}\"")),
        other => Err(format!("expected a boolean, found {other}")),
    }
}

pub(crate) mod number {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::number_from_value(&value).map_err(de::Error::custom)
    }
}

pub(crate) mod flag {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::flag_from_value(&value).map_err(de::Error::custom)
    }
}

/// Free text; numbers and booleans written by other tools are taken as
/// their JSON text.
pub(crate) mod text {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(String::new()),
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(de::Error::custom(format!("expected text, found {other}"))),
        }
    }
}
