//! Picture list records
//!
//! Field names and value conventions follow the host plugin's parameter
//! structs (`PictureList` / `FileList`). Every number and boolean is written
//! as a JSON string; see [`text_value`] for the reading rules.

mod file;
mod layer;
mod layer_id;
pub(crate) mod text_value;

pub use file::{FileField, PictureFile, VariableOperator};
pub use layer::{LayerField, PictureLayer};
pub use layer_id::LayerId;
pub use text_value::{parse_flag_text, parse_number_text, HostNumber};

/// Direction of a reorder operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the start of the sequence.
    Up,
    /// Towards the end of the sequence.
    Down,
}

impl MoveDirection {
    /// Index of the neighbour of `index` in a sequence of `len` items,
    /// or `None` at the respective boundary.
    pub fn neighbour(self, index: usize, len: usize) -> Option<usize> {
        match self {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => (index + 1 < len).then_some(index + 1),
        }
    }
}

/// Last `/` separated segment of a picture path.
pub fn last_path_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
