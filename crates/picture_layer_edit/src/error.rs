use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Malformed picture list: {source}")]
    Decode {
        /// Position of the offending element in the outer array, if known.
        index: Option<usize>,
        source: serde_json::Error,
    },

    #[error("Picture list entry {index} is not an encoded string")]
    NotEncodedString { index: usize },

    #[error("Failed to encode picture list: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to scan pictures in '{path}': {message}")]
    ImageScan { path: PathBuf, message: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("No prompt is waiting for an answer")]
    NoPendingPrompt,
}

impl EditorError {
    pub(crate) fn decode_at(index: usize, source: serde_json::Error) -> Self {
        EditorError::Decode { index: Some(index), source }
    }

    /// Returns true for errors caused by malformed input text.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, EditorError::Decode { .. } | EditorError::NotEncodedString { .. })
    }
}
