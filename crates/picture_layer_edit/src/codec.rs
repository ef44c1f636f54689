//! Double encoded picture list text.
//!
//! ```text
//! ["{\"Name\":\"A\",\"ActorId\":\"1\",\"FileList\":\"[\\\"{...}\\\"]\"}", ...]
//! ```
//!
//! The outer value is a JSON array of strings, each string is the JSON of one
//! layer, and the layer's `FileList` is a JSON string holding an array of JSON
//! strings, one per file. The same struct-list encoding is used by the host
//! for every `struct<...>[]` plugin parameter, so the generic helpers below
//! serve those as well.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{EditorError, PictureLayer, Result};

/// Decodes picture list text. Every layer gets a fresh [`crate::LayerId`].
///
/// Fails without partial results on the first malformed element.
pub fn decode_layers(text: &str) -> Result<Vec<PictureLayer>> {
    decode_struct_list(text)
}

/// Encodes layers into the host's picture list text. Layer ids are not part
/// of the output.
pub fn encode_layers(layers: &[PictureLayer]) -> Result<String> {
    encode_struct_list(layers)
}

/// Decodes a host `struct<T>[]` parameter: a JSON array whose elements are
/// JSON encoded `T` objects. Blank text is an empty list.
pub fn decode_struct_list<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let outer: Vec<Value> = serde_json::from_str(text).map_err(|source| EditorError::Decode { index: None, source })?;

    outer
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::String(item) => serde_json::from_str::<T>(&item).map_err(|source| EditorError::decode_at(index, source)),
            _ => Err(EditorError::NotEncodedString { index }),
        })
        .collect()
}

/// Encodes items as a host `struct<T>[]` parameter.
pub fn encode_struct_list<T: Serialize>(items: &[T]) -> Result<String> {
    let encoded = items
        .iter()
        .map(|item| serde_json::to_string(item).map_err(EditorError::Encode))
        .collect::<Result<Vec<String>>>()?;
    serde_json::to_string(&encoded).map_err(EditorError::Encode)
}
