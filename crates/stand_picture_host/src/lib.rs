//! Host side components of the stand picture plugin set.
//!
//! The host engine hands its state to these components through the traits in
//! [`host`] instead of global objects, and forwards the events they react to
//! (equip changes, frame updates, interpreter termination, boot) explicitly.
//!
//! - [`parameters`] - plugin parameter and command argument maps
//! - [`equip_sync`] - keeps the equipment of paired actors identical
//! - [`stand_motion`] - floating, tweened moves and persisted offsets of stand pictures
//! - [`first_run`] - variables and switches set on boot or on the first boot only
//! - [`stand_members`] - stand pictures for actors outside the party

mod error;
pub use error::*;

pub mod host;
pub use host::{ActorOffsets, ConfigData, ConfigStore, EquipmentHost, GameSwitches, GameVariables, Offset, OffsetStore, SwitchStore, VariableStore};

pub mod parameters;
pub use parameters::{CommandArgs, PluginParameters};

pub mod equip_sync;
pub use equip_sync::{EquipSync, EquipSyncCommand, EquipSyncPairs, SyncMethod, SyncPair};

pub mod stand_motion;
pub use stand_motion::{InterpreterKind, MotionCommand, MotionSettings, StandMotion, StandPictureMotion};

pub mod first_run;
pub use first_run::{BootReport, FirstRunCommand, FirstRunVariableHandler, SwitchSetting, VariableSetting};

pub mod stand_members;
pub use stand_members::NonPartyMembers;
