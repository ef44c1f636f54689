//! Attribute updates applied uniformly to several layers

use std::fmt;
use std::str::FromStr;

use crate::{parse_number_text, LayerField, LayerId};

use super::{Noop, Outcome, PictureListEditState};

/// Layer attributes that can be set on many layers at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAttribute {
    ShowPictureSwitch,
    UnFocusSwitch,
    MirrorSwitch,
    ActorId,
}

impl BatchAttribute {
    pub const ALL: [BatchAttribute; 4] = [
        BatchAttribute::ShowPictureSwitch,
        BatchAttribute::UnFocusSwitch,
        BatchAttribute::MirrorSwitch,
        BatchAttribute::ActorId,
    ];

    pub fn field(self) -> LayerField {
        match self {
            BatchAttribute::ShowPictureSwitch => LayerField::ShowPictureSwitch,
            BatchAttribute::UnFocusSwitch => LayerField::UnFocusSwitch,
            BatchAttribute::MirrorSwitch => LayerField::MirrorSwitch,
            BatchAttribute::ActorId => LayerField::ActorId,
        }
    }

    /// Name shown to the user
    pub fn label(self) -> &'static str {
        match self {
            BatchAttribute::ShowPictureSwitch => "Layer Switch",
            BatchAttribute::UnFocusSwitch => "Unfocus Switch",
            BatchAttribute::MirrorSwitch => "Invert Switch",
            BatchAttribute::ActorId => "Actor ID",
        }
    }
}

impl fmt::Display for BatchAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().key())
    }
}

impl FromStr for BatchAttribute {
    type Err = String;

    /// Accepts the host key (`MirrorSwitch`) or the label (`Invert Switch`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|attr| attr.field().key().eq_ignore_ascii_case(s) || attr.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("'{s}' cannot be batch edited"))
    }
}

impl PictureListEditState {
    /// Set `attribute` to `value` on every known layer in `ids`.
    ///
    /// Ignored when `ids` is empty or `value` is blank. Returns the number of
    /// layers updated.
    pub fn batch_set_attribute(&mut self, ids: &[LayerId], attribute: BatchAttribute, value: &str) -> Outcome<usize> {
        let Some(&first) = ids.first() else {
            return Outcome::ignored("batch update", Noop::EmptySelection);
        };
        let value = value.trim();
        if value.is_empty() {
            return Outcome::ignored("batch update", Noop::BlankValue);
        }
        let Some(number) = parse_number_text(value) else {
            return Outcome::ignored("batch update", Noop::InvalidNumber(value.to_string()));
        };

        let mut updated = 0;
        for id in ids {
            let Some(layer) = self.layer_mut(*id) else {
                log::warn!("batch update: skipping unknown layer {id}");
                continue;
            };
            match attribute {
                BatchAttribute::ShowPictureSwitch => layer.show_picture_switch = number,
                BatchAttribute::UnFocusSwitch => layer.unfocus_switch = number,
                BatchAttribute::MirrorSwitch => layer.mirror_switch = number,
                BatchAttribute::ActorId => layer.actor_id = number,
            }
            updated += 1;
        }
        if updated == 0 {
            return Outcome::ignored("batch update", Noop::UnknownLayer(first));
        }

        self.is_dirty = true;
        if attribute == BatchAttribute::ActorId {
            self.prune_selection();
        }
        log::info!("updated {} for {updated} layers", attribute.label());
        Outcome::Applied(updated)
    }

    /// Batch update over the current selection
    pub fn batch_set_selected(&mut self, attribute: BatchAttribute, value: &str) -> Outcome<usize> {
        let ids: Vec<LayerId> = self.selected_layers().collect();
        self.batch_set_attribute(&ids, attribute, value)
    }
}
