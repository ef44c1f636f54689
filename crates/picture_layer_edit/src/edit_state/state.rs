//! Picture List Edit State
//!
//! The state container behind the picture list editor. The UI layer reads
//! from it and calls methods to change it; nothing else touches the layers.
//!
//! # Layer Store
//!
//! The ordered layer sequence is the source of truth. An id -> position index
//! gives O(1) lookup and is rebuilt after every insert or removal (swaps patch
//! the two affected entries).
//!
//! # Filter and Selection
//!
//! An optional actor filter restricts the *visible* layers. It never changes
//! the backing sequence: all mutations address layers by [`LayerId`] and act on
//! their absolute position. The layer selection only ever holds visible ids;
//! changing the filter clears it.
//!
//! # Prompts
//!
//! Destructive deletes and the "add images to which layer" question are
//! modelled as a pending [`super::Prompt`] that is resolved or cancelled in a
//! later call. At most one prompt is pending.

use std::collections::{BTreeSet, HashMap};

use crate::{codec, ClipboardSink, LayerId, PictureLayer, Result};

use super::{Noop, Outcome, Prompt};

// ═══════════════════════════════════════════════════════════════════════════
// Picture List Edit State
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct PictureListEditState {
    // ═══════════════════════════════════════════════════════════════════════
    // Layer Store
    // ═══════════════════════════════════════════════════════════════════════
    /// Backing sequence, in export order
    pub(crate) layers: Vec<PictureLayer>,

    /// Position of every layer in `layers`
    pub(crate) index: HashMap<LayerId, usize>,

    // ═══════════════════════════════════════════════════════════════════════
    // View
    // ═══════════════════════════════════════════════════════════════════════
    /// Active actor filter
    pub(crate) filter: Option<i32>,

    /// Selected layers, all of them visible
    pub(crate) selected_layers: BTreeSet<LayerId>,

    // ═══════════════════════════════════════════════════════════════════════
    // Image Browser
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) available_images: Vec<String>,
    pub(crate) selected_images: BTreeSet<String>,

    // ═══════════════════════════════════════════════════════════════════════
    // Session
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) pending_prompt: Option<Prompt>,

    /// Changed since the last load or [`Self::mark_saved`]
    pub(crate) is_dirty: bool,
}

/// Counts shown in a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub layer_count: usize,
    pub visible_count: usize,
    pub selected_count: usize,
    pub file_count: usize,
}

impl PictureListEditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state over already decoded layers
    pub fn from_layers(layers: Vec<PictureLayer>) -> Self {
        let mut state = Self { layers, ..Default::default() };
        state.rebuild_index();
        state
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Load / Export
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace the whole collection with decoded `text`.
    ///
    /// Blank text is ignored. On a decode error the current layers stay as
    /// they are. A successful load resets filter, selections and any pending
    /// prompt and returns the number of layers.
    pub fn load(&mut self, text: &str) -> Result<Outcome<usize>> {
        if text.trim().is_empty() {
            return Ok(Outcome::ignored("load", Noop::BlankValue));
        }
        let layers = codec::decode_layers(text)?;
        let count = layers.len();

        self.layers = layers;
        self.rebuild_index();
        self.filter = None;
        self.selected_layers.clear();
        self.selected_images.clear();
        self.pending_prompt = None;
        self.is_dirty = false;

        log::info!("loaded {count} layers");
        Ok(Outcome::Applied(count))
    }

    /// Encode the complete collection, regardless of the filter
    pub fn export(&self) -> Result<String> {
        let text = codec::encode_layers(&self.layers)?;
        log::info!("exported {} layers ({} bytes)", self.layers.len(), text.len());
        Ok(text)
    }

    /// Export and hand the text to `sink`. Returns the exported text.
    pub fn copy_export_to_clipboard(&self, sink: &mut dyn ClipboardSink) -> Result<String> {
        let text = self.export()?;
        sink.set_text(text.clone())?;
        Ok(text)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    /// Get all layers in backing order
    pub fn layers(&self) -> &[PictureLayer] {
        &self.layers
    }

    /// Get a layer by id
    pub fn layer(&self, id: LayerId) -> Option<&PictureLayer> {
        self.position(id).map(|pos| &self.layers[pos])
    }

    /// Get the absolute position of a layer
    pub fn position(&self, id: LayerId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Clear the dirty flag after the exported text was stored
    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    pub fn summary(&self) -> Summary {
        Summary {
            layer_count: self.layers.len(),
            visible_count: self.visible_layers().count(),
            selected_count: self.selected_layers.len(),
            file_count: self.layers.iter().map(|layer| layer.file_list.len()).sum(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Internal
    // ═══════════════════════════════════════════════════════════════════════

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut PictureLayer> {
        let pos = self.position(id)?;
        self.layers.get_mut(pos)
    }

    pub(crate) fn rebuild_index(&mut self) {
        self.index = self.layers.iter().enumerate().map(|(pos, layer)| (layer.id(), pos)).collect();
    }

    pub(crate) fn push_layer(&mut self, layer: PictureLayer) -> LayerId {
        let id = layer.id();
        self.index.insert(id, self.layers.len());
        self.layers.push(layer);
        self.is_dirty = true;
        id
    }

    /// Swap two absolute positions and patch the index
    pub(crate) fn swap_layers(&mut self, a: usize, b: usize) {
        self.layers.swap(a, b);
        self.index.insert(self.layers[a].id(), a);
        self.index.insert(self.layers[b].id(), b);
        self.is_dirty = true;
    }
}
