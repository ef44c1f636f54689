//! Equipment synchronisation between paired actors.
//!
//! Pairs are save data. Whenever an actor's equipment changes, the host calls
//! [`EquipSync::on_equip_changed`], which repeats the change on every partner.
//! The partner changes go through the host again and would come straight back
//! here; a single in-flight flag stops that recursion.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CommandArgs, EquipmentHost, HostError, PluginParameters, Result};

pub const PLUGIN_NAME: &str = "EquipSync";

// ═══════════════════════════════════════════════════════════════════════════
// Pair registry
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPair {
    pub a: i32,
    pub b: i32,
}

impl SyncPair {
    /// Same two actors, in either order
    pub fn connects(&self, id1: i32, id2: i32) -> bool {
        (self.a == id1 && self.b == id2) || (self.a == id2 && self.b == id1)
    }
}

/// Registered pairs in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipSyncPairs(Vec<SyncPair>);

impl EquipSyncPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pair. An existing pair of the same actors, in either
    /// order, is replaced.
    pub fn register(&mut self, id1: i32, id2: i32) {
        self.unregister(id1, id2);
        self.0.push(SyncPair { a: id1, b: id2 });
    }

    pub fn unregister(&mut self, id1: i32, id2: i32) {
        self.0.retain(|pair| !pair.connects(id1, id2));
    }

    pub fn unregister_all(&mut self) {
        self.0.clear();
    }

    /// Actors paired with `actor_id`, each once, in registration order
    pub fn partners(&self, actor_id: i32) -> Vec<i32> {
        let mut partners = Vec::new();
        for pair in &self.0 {
            let partner = if pair.a == actor_id {
                pair.b
            } else if pair.b == actor_id {
                pair.a
            } else {
                continue;
            };
            if !partners.contains(&partner) {
                partners.push(partner);
            }
        }
        partners
    }

    pub fn pairs(&self) -> &[SyncPair] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Sync method
// ═══════════════════════════════════════════════════════════════════════════

/// How a change is repeated on a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMethod {
    /// Equip regardless of equip types or inventory
    #[default]
    Force,
    /// Equip like the menu does; partners that cannot equip the item keep theirs
    Normal,
}

impl FromStr for SyncMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "" | "force" => Ok(SyncMethod::Force),
            "normal" => Ok(SyncMethod::Normal),
            other => Err(format!("unknown sync method '{other}'")),
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMethod::Force => f.write_str("force"),
            SyncMethod::Normal => f.write_str("normal"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipSyncCommand {
    /// Pair two actors and copy every slot of the first to the second
    Bind { actor1: i32, actor2: i32 },
    Unbind { actor1: i32, actor2: i32 },
    UnbindAll,
}

impl EquipSyncCommand {
    pub fn parse(command: &str, args: &CommandArgs) -> Result<Self> {
        match command {
            "bind" => Ok(EquipSyncCommand::Bind {
                actor1: args.number("Actor1")?,
                actor2: args.number("Actor2")?,
            }),
            "unbind" => Ok(EquipSyncCommand::Unbind {
                actor1: args.number("Actor1")?,
                actor2: args.number("Actor2")?,
            }),
            "unbindAll" => Ok(EquipSyncCommand::UnbindAll),
            _ => Err(HostError::UnknownCommand {
                plugin: PLUGIN_NAME,
                command: command.to_string(),
            }),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Equip sync
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct EquipSync {
    method: SyncMethod,
    syncing: Cell<bool>,
}

/// Holds the in-flight flag for its lifetime.
struct SyncGuard<'a>(&'a Cell<bool>);

impl<'a> SyncGuard<'a> {
    fn new(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl EquipSync {
    pub fn new(method: SyncMethod) -> Self {
        Self {
            method,
            syncing: Cell::new(false),
        }
    }

    /// Reads `SyncMethod`, default `force`.
    pub fn from_parameters(params: &PluginParameters) -> Result<Self> {
        let text = params.text("SyncMethod");
        let method = text.parse().map_err(|_| HostError::Parameter {
            name: "SyncMethod".to_string(),
            value: text.to_string(),
        })?;
        Ok(Self::new(method))
    }

    pub fn method(&self) -> SyncMethod {
        self.method
    }

    /// Get whether a sync is currently being propagated
    pub fn is_syncing(&self) -> bool {
        self.syncing.get()
    }

    pub fn execute(&self, command: EquipSyncCommand, pairs: &mut EquipSyncPairs, host: &mut dyn EquipmentHost) -> Result<()> {
        match command {
            EquipSyncCommand::Bind { actor1, actor2 } => self.bind(actor1, actor2, pairs, host),
            EquipSyncCommand::Unbind { actor1, actor2 } => {
                pairs.unregister(actor1, actor2);
                log::debug!("unbound actors {actor1} and {actor2}");
                Ok(())
            }
            EquipSyncCommand::UnbindAll => {
                pairs.unregister_all();
                log::debug!("unbound all actors");
                Ok(())
            }
        }
    }

    /// Register the pair and copy every slot of `actor1` onto `actor2`.
    /// Zero or identical ids are ignored.
    pub fn bind(&self, actor1: i32, actor2: i32, pairs: &mut EquipSyncPairs, host: &mut dyn EquipmentHost) -> Result<()> {
        if actor1 == 0 || actor2 == 0 || actor1 == actor2 {
            log::warn!("equip sync: cannot bind actor {actor1} to actor {actor2}");
            return Ok(());
        }
        pairs.register(actor1, actor2);
        if !host.actor_exists(actor1) || !host.actor_exists(actor2) {
            log::warn!("equip sync: actor {actor1} or {actor2} does not exist, pair registered without copying");
            return Ok(());
        }

        let _guard = SyncGuard::new(&self.syncing);
        for (slot, item) in host.equips(actor1).into_iter().enumerate() {
            self.apply(host, actor2, slot, item)?;
        }
        log::debug!("bound actor {actor2} to actor {actor1}");
        Ok(())
    }

    /// Repeat an equip change of `actor_id` on all its partners.
    ///
    /// Does nothing while a sync is in flight. A failing partner stops the
    /// propagation and is logged. Returns the number of partners changed.
    pub fn on_equip_changed(&self, actor_id: i32, slot: usize, item: Option<u32>, pairs: &EquipSyncPairs, host: &mut dyn EquipmentHost) -> usize {
        if self.syncing.get() {
            return 0;
        }
        let partners = pairs.partners(actor_id);
        if partners.is_empty() {
            return 0;
        }

        let _guard = SyncGuard::new(&self.syncing);
        let mut synced = 0;
        for partner in partners {
            if !host.actor_exists(partner) {
                log::warn!("equip sync: partner {partner} of actor {actor_id} does not exist");
                continue;
            }
            if let Err(err) = self.apply(host, partner, slot, item) {
                log::error!("equip sync of actor {actor_id} slot {slot} to {partner} failed: {err}");
                break;
            }
            synced += 1;
        }
        synced
    }

    fn apply(&self, host: &mut dyn EquipmentHost, actor_id: i32, slot: usize, item: Option<u32>) -> Result<()> {
        match self.method {
            SyncMethod::Force => host.force_change_equip(actor_id, slot, item),
            SyncMethod::Normal => host.change_equip(actor_id, slot, item),
        }
    }
}
