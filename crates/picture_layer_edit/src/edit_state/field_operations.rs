use crate::{FileField, LayerField, LayerId};

use super::{Noop, Outcome, PictureListEditState};

impl PictureListEditState {
    /// Set one layer attribute from its textual form.
    ///
    /// Changing `ActorId` under a filter may hide the layer; it then leaves
    /// the selection.
    pub fn update_layer_field(&mut self, id: LayerId, field: LayerField, value: &str) -> Outcome {
        let Some(layer) = self.layer_mut(id) else {
            return Outcome::ignored("update layer", Noop::UnknownLayer(id));
        };
        if !layer.set_field(field, value) {
            return Outcome::ignored(
                "update layer",
                Noop::InvalidValue {
                    field: field.key(),
                    value: value.to_string(),
                },
            );
        }
        self.is_dirty = true;
        if field == LayerField::ActorId {
            self.prune_selection();
        }
        log::debug!("layer {id}: {field} = '{value}'");
        Outcome::Applied(())
    }

    /// Set one attribute of the file at `index` from its textual form
    pub fn update_file_field(&mut self, id: LayerId, index: usize, field: FileField, value: &str) -> Outcome {
        if let Err(reason) = self.check_file_index(id, index) {
            return Outcome::ignored("update file", reason);
        }
        let Some(file) = self.layer_mut(id).and_then(|layer| layer.file_list.get_mut(index)) else {
            return Outcome::ignored("update file", Noop::UnknownLayer(id));
        };
        if !file.set_field(field, value) {
            return Outcome::ignored(
                "update file",
                Noop::InvalidValue {
                    field: field.key(),
                    value: value.to_string(),
                },
            );
        }
        self.is_dirty = true;
        log::debug!("layer {id} file {index}: {field} = '{value}'");
        Outcome::Applied(())
    }
}
