//! Layer selection
//!
//! The selection is a set of ids over the visible layers. Iteration order is
//! id order, which is creation order within a session; bulk operations that
//! append (duplicate) follow it.

use crate::LayerId;

use super::{Noop, Outcome, PictureListEditState};

impl PictureListEditState {
    /// Get selected layer ids in selection set order
    pub fn selected_layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.selected_layers.iter().copied()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_layers.len()
    }

    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selected_layers.contains(&id)
    }

    /// Select or deselect a layer. Hidden layers cannot be selected.
    pub fn toggle_select(&mut self, id: LayerId, selected: bool) -> Outcome {
        if self.position(id).is_none() {
            return Outcome::ignored("select", Noop::UnknownLayer(id));
        }
        if selected {
            if !self.is_visible(id) {
                return Outcome::ignored("select", Noop::NotVisible(id));
            }
            self.selected_layers.insert(id);
        } else {
            self.selected_layers.remove(&id);
        }
        Outcome::Applied(())
    }

    /// Select every visible layer
    pub fn select_all_visible(&mut self) {
        self.selected_layers = self.visible_layers().map(|layer| layer.id()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected_layers.clear();
    }

    /// Drop selected ids that are gone or no longer visible
    pub(crate) fn prune_selection(&mut self) {
        let before = self.selected_layers.len();
        let keep: Vec<LayerId> = self.selected_layers.iter().copied().filter(|id| self.is_visible(*id)).collect();
        self.selected_layers = keep.into_iter().collect();
        if self.selected_layers.len() != before {
            log::debug!("dropped {} hidden layers from the selection", before - self.selected_layers.len());
        }
    }
}
