//! Plugin parameters and plugin command arguments.
//!
//! The host hands both over as string maps. The getters apply the host's
//! conversions: a missing or blank number is 0 (or the declared default),
//! a boolean is true only for the literal `"true"`.

use std::collections::BTreeMap;

use picture_layer_edit::{decode_struct_list, parse_number_text};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{HostError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginParameters(BTreeMap<String, String>);

/// Arguments of one plugin command invocation.
pub type CommandArgs = PluginParameters;

impl PluginParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder style [`Self::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Raw text, empty if missing
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Integer value. Missing and blank read as 0.
    pub fn number(&self, name: &str) -> Result<i32> {
        self.number_or(name, 0)
    }

    /// Integer value, `default` if the parameter is missing or blank
    pub fn number_or(&self, name: &str, default: i32) -> Result<i32> {
        match self.get(name).map(str::trim) {
            None | Some("") => Ok(default),
            Some(text) => parse_number_text(text).ok_or_else(|| invalid(name, text)),
        }
    }

    /// Decimal value, `default` if the parameter is missing or blank
    pub fn float_or(&self, name: &str, default: f64) -> Result<f64> {
        match self.get(name).map(str::trim) {
            None | Some("") => Ok(default),
            Some(text) => text.parse::<f64>().ok().filter(|value| value.is_finite()).ok_or_else(|| invalid(name, text)),
        }
    }

    /// True only for `"true"`
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| value.trim() == "true")
    }

    /// Boolean value, `default` if the parameter is missing or blank
    pub fn flag_or(&self, name: &str, default: bool) -> bool {
        match self.get(name).map(str::trim) {
            None | Some("") => default,
            Some(text) => text == "true",
        }
    }

    /// Decodes a `struct<T>[]` parameter
    pub fn struct_list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        Ok(decode_struct_list(self.text(name))?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PluginParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn invalid(name: &str, value: &str) -> HostError {
    HostError::Parameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}
