//! Layer operations
//!
//! All operations address layers by id and act on the backing sequence.
//! [`PictureListEditState::move_visible_layer`] is the only one taking a view
//! row; it translates the row to absolute positions first.

use crate::{LayerId, MoveDirection, PictureLayer};

use super::{Noop, Outcome, PictureListEditState};

/// Suffix appended to the name of a duplicated layer.
pub const COPY_SUFFIX: &str = " (Copy)";

impl PictureListEditState {
    /// Append a default layer. Under an active filter it belongs to the
    /// filtered actor so it stays visible.
    pub fn add_layer(&mut self) -> LayerId {
        let actor_id = self.filter.unwrap_or(1);
        let id = self.push_layer(PictureLayer::new(actor_id));
        log::debug!("added layer {id} for actor {actor_id}");
        id
    }

    /// Remove a layer. Returns the removed layer.
    pub fn delete_layer(&mut self, id: LayerId) -> Outcome<PictureLayer> {
        let Some(pos) = self.position(id) else {
            return Outcome::ignored("delete layer", Noop::UnknownLayer(id));
        };
        let layer = self.layers.remove(pos);
        self.rebuild_index();
        self.selected_layers.remove(&id);
        self.is_dirty = true;
        log::debug!("deleted layer {id} '{}'", layer.name);
        Outcome::Applied(layer)
    }

    /// Swap a layer with its neighbour in the backing sequence
    pub fn move_layer(&mut self, id: LayerId, direction: MoveDirection) -> Outcome {
        let Some(pos) = self.position(id) else {
            return Outcome::ignored("move layer", Noop::UnknownLayer(id));
        };
        let Some(target) = direction.neighbour(pos, self.layers.len()) else {
            return Outcome::ignored("move layer", Noop::AtBoundary);
        };
        self.swap_layers(pos, target);
        log::debug!("moved layer {id} from {pos} to {target}");
        Outcome::Applied(())
    }

    /// Move the layer shown at visible `row` past its visible neighbour.
    ///
    /// The two layers trade their absolute positions; hidden layers between
    /// them keep theirs. Without a filter this is [`Self::move_layer`].
    pub fn move_visible_layer(&mut self, row: usize, direction: MoveDirection) -> Outcome {
        let visible = self.visible_ids();
        if row >= visible.len() {
            return Outcome::ignored("move layer", Noop::RowOutOfRange { row, len: visible.len() });
        }
        let Some(target_row) = direction.neighbour(row, visible.len()) else {
            return Outcome::ignored("move layer", Noop::AtBoundary);
        };
        let (Some(a), Some(b)) = (self.position(visible[row]), self.position(visible[target_row])) else {
            return Outcome::ignored("move layer", Noop::UnknownLayer(visible[row]));
        };
        self.swap_layers(a, b);
        log::debug!("moved visible row {row} to {target_row} (positions {a} <-> {b})");
        Outcome::Applied(())
    }

    /// Append a deep copy of every known layer in `ids`, in the given order.
    ///
    /// Copies get a fresh id and `" (Copy)"` appended to their name. Originals,
    /// their positions and the selection are untouched. Unknown ids are
    /// skipped. Returns the ids of the copies.
    pub fn duplicate_layers(&mut self, ids: &[LayerId]) -> Outcome<Vec<LayerId>> {
        let Some(&first) = ids.first() else {
            return Outcome::ignored("duplicate", Noop::EmptySelection);
        };
        let copies: Vec<PictureLayer> = ids
            .iter()
            .filter_map(|id| {
                let layer = self.layer(*id);
                if layer.is_none() {
                    log::warn!("duplicate: skipping unknown layer {id}");
                }
                layer
            })
            .map(|layer| {
                let mut copy = layer.duplicate();
                copy.name.push_str(COPY_SUFFIX);
                copy
            })
            .collect();
        if copies.is_empty() {
            return Outcome::ignored("duplicate", Noop::UnknownLayer(first));
        }

        let new_ids: Vec<LayerId> = copies.into_iter().map(|copy| self.push_layer(copy)).collect();
        log::debug!("duplicated {} layers", new_ids.len());
        Outcome::Applied(new_ids)
    }

    /// Duplicate the selected layers in selection set order
    pub fn duplicate_selected(&mut self) -> Outcome<Vec<LayerId>> {
        let ids: Vec<LayerId> = self.selected_layers().collect();
        self.duplicate_layers(&ids)
    }
}
