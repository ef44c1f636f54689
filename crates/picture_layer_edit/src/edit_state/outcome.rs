use std::fmt;

use crate::LayerId;

/// Result of a mutation.
///
/// Invalid requests (unknown ids, out of range indices, blank input) are not
/// errors: the operation leaves the state untouched and reports why.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Applied(T),
    Ignored(Noop),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// Get the applied value, if any
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Ignored(_) => None,
        }
    }

    /// Get the reason the operation was ignored, if it was
    pub fn noop(&self) -> Option<&Noop> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Ignored(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::Ignored(reason) => Outcome::Ignored(reason),
        }
    }

    /// Logs and builds an ignored outcome.
    pub(crate) fn ignored(operation: &str, reason: Noop) -> Self {
        log::warn!("{operation} ignored: {reason}");
        Outcome::Ignored(reason)
    }
}

/// Why an operation left the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Noop {
    UnknownLayer(LayerId),
    FileIndexOutOfRange { layer: LayerId, index: usize, len: usize },
    /// A confirmed file is no longer at the position it was asked for.
    FileChanged { layer: LayerId, index: usize, expected: String },
    RowOutOfRange { row: usize, len: usize },
    AtBoundary,
    EmptySelection,
    BlankValue,
    InvalidNumber(String),
    InvalidValue { field: &'static str, value: String },
    NotVisible(LayerId),
    NoFiles(LayerId),
    NoImagesSelected,
    UnknownImage(String),
    InvalidTarget(String),
}

impl fmt::Display for Noop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Noop::UnknownLayer(id) => write!(f, "no layer {id}"),
            Noop::FileIndexOutOfRange { layer, index, len } => write!(f, "file {index} out of range for layer {layer} with {len} files"),
            Noop::FileChanged { layer, index, expected } => write!(f, "file {index} of layer {layer} is no longer '{expected}'"),
            Noop::RowOutOfRange { row, len } => write!(f, "row {row} out of range, {len} rows visible"),
            Noop::AtBoundary => f.write_str("already at the boundary"),
            Noop::EmptySelection => f.write_str("nothing selected"),
            Noop::BlankValue => f.write_str("value is blank"),
            Noop::InvalidNumber(text) => write!(f, "'{text}' is not a number"),
            Noop::InvalidValue { field, value } => write!(f, "'{value}' is not valid for {field}"),
            Noop::NotVisible(id) => write!(f, "layer {id} is hidden by the filter"),
            Noop::NoFiles(id) => write!(f, "layer {id} has no files"),
            Noop::NoImagesSelected => f.write_str("no images selected"),
            Noop::UnknownImage(path) => write!(f, "'{path}' is not an available image"),
            Noop::InvalidTarget(answer) => write!(f, "invalid layer number '{answer}'"),
        }
    }
}
