//! Host engine state as seen by the components.
//!
//! Each trait is the slice of engine state one component needs. The map based
//! implementations are usable as save data and in tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Screen space offset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point on the way from `self` to `target` at `t` in `0.0..=1.0`
    pub fn lerp(self, target: Offset, t: f64) -> Offset {
        Offset::new(self.x + (target.x - self.x) * t, self.y + (target.y - self.y) * t)
    }
}

pub trait VariableStore {
    fn variable(&self, id: i32) -> i32;
    fn set_variable(&mut self, id: i32, value: i32);
}

pub trait SwitchStore {
    fn switch(&self, id: i32) -> bool;
    fn set_switch(&mut self, id: i32, value: bool);
}

/// Per actor stand picture offset, stored with the actor in the save file.
pub trait OffsetStore {
    fn offset(&self, actor_id: i32) -> Offset;
    fn set_offset(&mut self, actor_id: i32, offset: Offset);
    /// Every actor that currently exists
    fn actor_ids(&self) -> Vec<i32>;
}

/// Equipment of game actors. Items are database ids, `None` is an empty slot.
pub trait EquipmentHost {
    fn actor_exists(&self, actor_id: i32) -> bool;
    fn equips(&self, actor_id: i32) -> Vec<Option<u32>>;
    /// Equip if the actor can, like the equip menu does
    fn change_equip(&mut self, actor_id: i32, slot: usize, item: Option<u32>) -> Result<()>;
    /// Equip regardless of equip types and party inventory
    fn force_change_equip(&mut self, actor_id: i32, slot: usize, item: Option<u32>) -> Result<()>;
}

/// Global settings file of the game (not part of any save slot).
pub trait ConfigStore {
    fn has_run_initial_setup(&self) -> bool;
    fn set_has_run_initial_setup(&mut self, value: bool);
    fn save(&mut self) -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Map based implementations
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameVariables(pub BTreeMap<i32, i32>);

impl VariableStore for GameVariables {
    fn variable(&self, id: i32) -> i32 {
        self.0.get(&id).copied().unwrap_or(0)
    }

    fn set_variable(&mut self, id: i32, value: i32) {
        self.0.insert(id, value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameSwitches(pub BTreeMap<i32, bool>);

impl SwitchStore for GameSwitches {
    fn switch(&self, id: i32) -> bool {
        self.0.get(&id).copied().unwrap_or(false)
    }

    fn set_switch(&mut self, id: i32, value: bool) {
        self.0.insert(id, value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorOffsets(pub BTreeMap<i32, Offset>);

impl ActorOffsets {
    /// Offsets for the given actors, all at zero
    pub fn with_actors(actor_ids: impl IntoIterator<Item = i32>) -> Self {
        Self(actor_ids.into_iter().map(|id| (id, Offset::ZERO)).collect())
    }
}

impl OffsetStore for ActorOffsets {
    fn offset(&self, actor_id: i32) -> Offset {
        self.0.get(&actor_id).copied().unwrap_or_default()
    }

    fn set_offset(&mut self, actor_id: i32, offset: Offset) {
        self.0.insert(actor_id, offset);
    }

    fn actor_ids(&self) -> Vec<i32> {
        self.0.keys().copied().collect()
    }
}

/// The part of the game's config file the first run handler owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    #[serde(rename = "hasRunInitialSetup", default)]
    pub has_run_initial_setup: bool,

    #[serde(skip)]
    unsaved: bool,
}

impl ConfigData {
    /// Get whether changes are waiting for [`ConfigStore::save`]
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }
}

impl ConfigStore for ConfigData {
    fn has_run_initial_setup(&self) -> bool {
        self.has_run_initial_setup
    }

    fn set_has_run_initial_setup(&mut self, value: bool) {
        self.has_run_initial_setup = value;
        self.unsaved = true;
    }

    fn save(&mut self) -> Result<()> {
        self.unsaved = false;
        log::debug!("config saved (hasRunInitialSetup = {})", self.has_run_initial_setup);
        Ok(())
    }
}
