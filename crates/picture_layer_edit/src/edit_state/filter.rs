//! Actor filter and the visible projection
//!
//! Filter values are compared numerically, so `"01"` and `"1"` select the
//! same actor. The projection keeps backing order and never mutates it.

use crate::{parse_number_text, LayerId, PictureLayer};

use super::{Noop, Outcome, PictureListEditState};

impl PictureListEditState {
    // ═══════════════════════════════════════════════════════════════════════
    // Filter
    // ═══════════════════════════════════════════════════════════════════════

    /// Get the active actor filter
    pub fn filter(&self) -> Option<i32> {
        self.filter
    }

    /// Filter by actor id given as text. Blank or non numeric text is ignored.
    pub fn apply_filter(&mut self, actor_id: &str) -> Outcome {
        let actor_id = actor_id.trim();
        if actor_id.is_empty() {
            return Outcome::ignored("apply filter", Noop::BlankValue);
        }
        match parse_number_text(actor_id) {
            Some(actor_id) => {
                self.set_filter(actor_id);
                Outcome::Applied(())
            }
            None => Outcome::ignored("apply filter", Noop::InvalidNumber(actor_id.to_string())),
        }
    }

    /// Filter by actor id. Clears the layer selection.
    pub fn set_filter(&mut self, actor_id: i32) {
        self.filter = Some(actor_id);
        self.selected_layers.clear();
        log::debug!("filter set to actor {actor_id}");
    }

    /// Show all layers again. Clears the layer selection.
    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.selected_layers.clear();
        log::debug!("filter cleared");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Visible projection
    // ═══════════════════════════════════════════════════════════════════════

    /// Layers passing the filter, in backing order
    pub fn visible_layers(&self) -> impl Iterator<Item = &PictureLayer> + '_ {
        self.layers.iter().filter(move |layer| self.passes_filter(layer))
    }

    /// Ids of the visible layers, in backing order
    pub fn visible_ids(&self) -> Vec<LayerId> {
        self.visible_layers().map(PictureLayer::id).collect()
    }

    /// Map a 0-based visible row to its layer
    pub fn visible_row_to_id(&self, row: usize) -> Option<LayerId> {
        self.visible_layers().nth(row).map(PictureLayer::id)
    }

    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layer(id).is_some_and(|layer| self.passes_filter(layer))
    }

    pub(crate) fn passes_filter(&self, layer: &PictureLayer) -> bool {
        self.filter.is_none_or(|actor_id| layer.actor_id == actor_id)
    }
}
