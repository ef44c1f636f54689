//! Stand pictures for actors outside the party.

use crate::{PluginParameters, SwitchStore};

pub const PLUGIN_NAME: &str = "StandPicture_NonPartyPatch";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonPartyMembers {
    /// Switch that must be on to show non party actors, 0 for always
    pub enable_switch_id: i32,
}

impl NonPartyMembers {
    pub fn new(enable_switch_id: i32) -> Self {
        Self { enable_switch_id }
    }

    /// Reads `EnableSwitchId`. Anything that is not a number means no switch.
    pub fn from_parameters(params: &PluginParameters) -> Self {
        let enable_switch_id = params.number("EnableSwitchId").unwrap_or_else(|err| {
            log::warn!("{PLUGIN_NAME}: {err}, showing non party actors unconditionally");
            0
        });
        Self { enable_switch_id }
    }

    pub fn is_enabled(&self, switches: &dyn SwitchStore) -> bool {
        self.enable_switch_id <= 0 || switches.switch(self.enable_switch_id)
    }

    /// The actors that get a stand picture: the party in order, then every
    /// database actor not already in it while enabled.
    pub fn members(&self, party: &[i32], database_actor_ids: &[i32], switches: &dyn SwitchStore) -> Vec<i32> {
        let mut members = party.to_vec();
        if !self.is_enabled(switches) {
            return members;
        }
        for &actor_id in database_actor_ids {
            if actor_id > 0 && !members.contains(&actor_id) {
                members.push(actor_id);
            }
        }
        members
    }
}
