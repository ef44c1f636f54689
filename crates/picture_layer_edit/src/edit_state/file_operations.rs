//! File operations
//!
//! Files have no identity; they are addressed by `(layer id, index)`. Out of
//! range indices and unknown layers leave everything untouched.

use crate::{last_path_segment, parse_number_text, LayerId, MoveDirection, PictureFile};

use super::{Noop, Outcome, PictureListEditState};

/// Name segment used when a split file has no file name.
const SPLIT_FALLBACK_NAME: &str = "Split";

impl PictureListEditState {
    /// Append a default file to a layer. Returns the index of the new file.
    pub fn add_file(&mut self, id: LayerId) -> Outcome<usize> {
        self.append_files(id, [PictureFile::default()])
    }

    /// Remove a file. Returns the removed file.
    pub fn delete_file(&mut self, id: LayerId, index: usize) -> Outcome<PictureFile> {
        if let Err(reason) = self.check_file_index(id, index) {
            return Outcome::ignored("delete file", reason);
        }
        let Some(layer) = self.layer_mut(id) else {
            return Outcome::ignored("delete file", Noop::UnknownLayer(id));
        };
        let file = layer.file_list.remove(index);
        self.is_dirty = true;
        log::debug!("deleted file {index} '{}' of layer {id}", file.file_name);
        Outcome::Applied(file)
    }

    /// Swap a file with its neighbour inside the layer
    pub fn move_file(&mut self, id: LayerId, index: usize, direction: MoveDirection) -> Outcome {
        if let Err(reason) = self.check_file_index(id, index) {
            return Outcome::ignored("move file", reason);
        }
        let Some(layer) = self.layer_mut(id) else {
            return Outcome::ignored("move file", Noop::UnknownLayer(id));
        };
        let Some(target) = direction.neighbour(index, layer.file_list.len()) else {
            return Outcome::ignored("move file", Noop::AtBoundary);
        };
        layer.file_list.swap(index, target);
        self.is_dirty = true;
        log::debug!("moved file {index} of layer {id} to {target}");
        Outcome::Applied(())
    }

    /// Move one file into a new layer appended at the end.
    ///
    /// The new layer copies every attribute of the source except its files
    /// and is named `<name>_<last path segment>`, or just the segment when
    /// the source has no name. Returns the new layer's id.
    pub fn split_file_to_new_layer(&mut self, id: LayerId, index: usize) -> Outcome<LayerId> {
        if let Err(reason) = self.check_file_index(id, index) {
            return Outcome::ignored("split file", reason);
        }
        let Some(source) = self.layer_mut(id) else {
            return Outcome::ignored("split file", Noop::UnknownLayer(id));
        };
        let file = source.file_list.remove(index);

        let mut layer = source.duplicate_attributes();
        let file_name = if file.file_name.is_empty() { SPLIT_FALLBACK_NAME } else { file.file_name.as_str() };
        let segment = last_path_segment(file_name);
        layer.name = if layer.name.is_empty() {
            segment.to_string()
        } else {
            format!("{}_{segment}", layer.name)
        };
        layer.file_list.push(file);

        let new_id = self.push_layer(layer);
        log::debug!("split file {index} of layer {id} into layer {new_id}");
        Outcome::Applied(new_id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Layer variable id
    // ═══════════════════════════════════════════════════════════════════════

    /// Get the variable id shown for a layer: the first file's, 0 without files
    pub fn layer_variable_id(&self, id: LayerId) -> Option<i32> {
        self.layer(id).map(|layer| layer.variable_id())
    }

    /// Set `Variable` on every file of the layer. Returns the number of files
    /// changed. A layer without files has nothing to hold the value.
    pub fn set_layer_variable_id(&mut self, id: LayerId, value: &str) -> Outcome<usize> {
        let Some(variable) = parse_number_text(value) else {
            return Outcome::ignored("set variable id", Noop::InvalidNumber(value.trim().to_string()));
        };
        let Some(layer) = self.layer_mut(id) else {
            return Outcome::ignored("set variable id", Noop::UnknownLayer(id));
        };
        if layer.file_list.is_empty() {
            return Outcome::ignored("set variable id", Noop::NoFiles(id));
        }
        for file in &mut layer.file_list {
            file.variable = variable;
        }
        let count = layer.file_list.len();
        self.is_dirty = true;
        log::debug!("set variable {variable} on {count} files of layer {id}");
        Outcome::Applied(count)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Internal
    // ═══════════════════════════════════════════════════════════════════════

    /// Append files to a layer, returning the index of the last one
    pub(crate) fn append_files(&mut self, id: LayerId, files: impl IntoIterator<Item = PictureFile>) -> Outcome<usize> {
        let Some(layer) = self.layer_mut(id) else {
            return Outcome::ignored("add file", Noop::UnknownLayer(id));
        };
        let before = layer.file_list.len();
        layer.file_list.extend(files);
        let added = layer.file_list.len() - before;
        let last = layer.file_list.len().saturating_sub(1);
        if added > 0 {
            self.is_dirty = true;
        }
        log::debug!("added {added} files to layer {id}");
        Outcome::Applied(last)
    }

    pub(crate) fn check_file_index(&self, id: LayerId, index: usize) -> Result<(), Noop> {
        let layer = self.layer(id).ok_or(Noop::UnknownLayer(id))?;
        let len = layer.file_list.len();
        if index < len {
            Ok(())
        } else {
            Err(Noop::FileIndexOutOfRange { layer: id, index, len })
        }
    }
}
