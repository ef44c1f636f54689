//! Equip sync tests
//!
//! The fake host re-enters the equip change hook on every change, the way the
//! game does, so propagation and its recursion stop are tested together.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use stand_picture_host::{CommandArgs, EquipSync, EquipSyncCommand, EquipSyncPairs, EquipmentHost, HostError, PluginParameters, Result, SyncMethod, SyncPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Normal(i32, usize, Option<u32>),
    Force(i32, usize, Option<u32>),
}

#[derive(Default)]
struct FakeEquipment {
    actors: BTreeMap<i32, Vec<Option<u32>>>,
    calls: Vec<Call>,
    fail_for: Option<i32>,
    hook: Option<(Rc<EquipSync>, EquipSyncPairs)>,
}

impl FakeEquipment {
    fn with_actors(ids: &[i32]) -> Self {
        Self {
            actors: ids.iter().map(|id| (*id, vec![None; 5])).collect(),
            ..Default::default()
        }
    }

    fn equip(&mut self, actor_id: i32, slot: usize, item: Option<u32>) -> Result<()> {
        if self.fail_for == Some(actor_id) {
            return Err(HostError::Host(format!("actor {actor_id} cannot equip")));
        }
        if let Some(slots) = self.actors.get_mut(&actor_id) {
            slots[slot] = item;
        }
        if let Some((sync, pairs)) = self.hook.clone() {
            sync.on_equip_changed(actor_id, slot, item, &pairs, self);
        }
        Ok(())
    }

    fn slot(&self, actor_id: i32, slot: usize) -> Option<u32> {
        self.actors[&actor_id][slot]
    }
}

impl EquipmentHost for FakeEquipment {
    fn actor_exists(&self, actor_id: i32) -> bool {
        self.actors.contains_key(&actor_id)
    }

    fn equips(&self, actor_id: i32) -> Vec<Option<u32>> {
        self.actors.get(&actor_id).cloned().unwrap_or_default()
    }

    fn change_equip(&mut self, actor_id: i32, slot: usize, item: Option<u32>) -> Result<()> {
        self.calls.push(Call::Normal(actor_id, slot, item));
        self.equip(actor_id, slot, item)
    }

    fn force_change_equip(&mut self, actor_id: i32, slot: usize, item: Option<u32>) -> Result<()> {
        self.calls.push(Call::Force(actor_id, slot, item));
        self.equip(actor_id, slot, item)
    }
}

fn pairs_of(pairs: &[(i32, i32)]) -> EquipSyncPairs {
    let mut result = EquipSyncPairs::new();
    for (a, b) in pairs {
        result.register(*a, *b);
    }
    result
}

fn hooked_host(sync: &Rc<EquipSync>, pairs: &EquipSyncPairs, actors: &[i32]) -> FakeEquipment {
    let mut host = FakeEquipment::with_actors(actors);
    host.hook = Some((sync.clone(), pairs.clone()));
    host
}

// ============================================================================
// Pair registry
// ============================================================================

#[test]
fn test_register_replaces_pair_in_either_orientation() {
    let mut pairs = pairs_of(&[(1, 2), (3, 4)]);

    pairs.register(2, 1);

    assert_eq!(pairs.pairs(), &[SyncPair { a: 3, b: 4 }, SyncPair { a: 2, b: 1 }]);
}

#[test]
fn test_unregister_either_orientation() {
    let mut pairs = pairs_of(&[(1, 2), (1, 3)]);

    pairs.unregister(2, 1);

    assert_eq!(pairs.pairs(), &[SyncPair { a: 1, b: 3 }]);
    pairs.unregister_all();
    assert!(pairs.is_empty());
}

#[test]
fn test_partners_are_deduplicated_in_registration_order() {
    let pairs = pairs_of(&[(3, 1), (1, 2), (4, 5), (2, 3)]);

    assert_eq!(pairs.partners(1), vec![3, 2]);
    assert_eq!(pairs.partners(3), vec![1, 2]);
    assert_eq!(pairs.partners(9), Vec::<i32>::new());
}

#[test]
fn test_pairs_serialize_as_save_data() {
    let pairs = pairs_of(&[(1, 2)]);

    let json = serde_json::to_string(&pairs).unwrap();

    assert_eq!(json, r#"[{"a":1,"b":2}]"#);
    assert_eq!(serde_json::from_str::<EquipSyncPairs>(&json).unwrap(), pairs);
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_parse_commands() {
    let args: CommandArgs = [("Actor1", "1"), ("Actor2", "4")].into_iter().collect();

    assert_eq!(EquipSyncCommand::parse("bind", &args).unwrap(), EquipSyncCommand::Bind { actor1: 1, actor2: 4 });
    assert_eq!(EquipSyncCommand::parse("unbind", &args).unwrap(), EquipSyncCommand::Unbind { actor1: 1, actor2: 4 });
    assert_eq!(EquipSyncCommand::parse("unbindAll", &CommandArgs::new()).unwrap(), EquipSyncCommand::UnbindAll);
    assert!(matches!(EquipSyncCommand::parse("swap", &args), Err(HostError::UnknownCommand { .. })));
}

#[test]
fn test_sync_method_parameter() {
    assert_eq!(EquipSync::from_parameters(&PluginParameters::new()).unwrap().method(), SyncMethod::Force);
    let normal = PluginParameters::new().with("SyncMethod", "normal");
    assert_eq!(EquipSync::from_parameters(&normal).unwrap().method(), SyncMethod::Normal);
    let bad = PluginParameters::new().with("SyncMethod", "sometimes");
    assert!(EquipSync::from_parameters(&bad).is_err());
}

#[test]
fn test_bind_copies_every_slot() {
    let sync = EquipSync::new(SyncMethod::Force);
    let mut pairs = EquipSyncPairs::new();
    let mut host = FakeEquipment::with_actors(&[1, 2]);
    host.actors.insert(1, vec![Some(10), None, Some(30)]);

    sync.execute(EquipSyncCommand::Bind { actor1: 1, actor2: 2 }, &mut pairs, &mut host).unwrap();

    assert_eq!(pairs.partners(1), vec![2]);
    assert_eq!(host.calls, vec![Call::Force(2, 0, Some(10)), Call::Force(2, 1, None), Call::Force(2, 2, Some(30))]);
    assert!(!sync.is_syncing());
}

#[test]
fn test_bind_ignores_zero_and_identical_ids() {
    let sync = EquipSync::default();
    let mut pairs = EquipSyncPairs::new();
    let mut host = FakeEquipment::with_actors(&[1, 2]);

    sync.execute(EquipSyncCommand::Bind { actor1: 0, actor2: 2 }, &mut pairs, &mut host).unwrap();
    sync.execute(EquipSyncCommand::Bind { actor1: 2, actor2: 2 }, &mut pairs, &mut host).unwrap();

    assert!(pairs.is_empty());
    assert!(host.calls.is_empty());
}

#[test]
fn test_bind_error_propagates_and_clears_flag() {
    let sync = EquipSync::default();
    let mut pairs = EquipSyncPairs::new();
    let mut host = FakeEquipment::with_actors(&[1, 2]);
    host.fail_for = Some(2);

    let result = sync.execute(EquipSyncCommand::Bind { actor1: 1, actor2: 2 }, &mut pairs, &mut host);

    assert!(matches!(result, Err(HostError::Host(_))));
    assert!(!sync.is_syncing());
}

#[test]
fn test_unbind_commands() {
    let sync = EquipSync::default();
    let mut pairs = pairs_of(&[(1, 2), (3, 4)]);
    let mut host = FakeEquipment::with_actors(&[]);

    sync.execute(EquipSyncCommand::Unbind { actor1: 2, actor2: 1 }, &mut pairs, &mut host).unwrap();
    assert_eq!(pairs.len(), 1);

    sync.execute(EquipSyncCommand::UnbindAll, &mut pairs, &mut host).unwrap();
    assert!(pairs.is_empty());
}

// ============================================================================
// Equip change hook
// ============================================================================

#[test]
fn test_change_propagates_to_partners_only_once() {
    let sync = Rc::new(EquipSync::new(SyncMethod::Force));
    let pairs = pairs_of(&[(1, 2), (2, 3)]);
    let mut host = hooked_host(&sync, &pairs, &[1, 2, 3]);

    host.change_equip(1, 0, Some(7)).unwrap();

    assert_eq!(host.slot(1, 0), Some(7));
    assert_eq!(host.slot(2, 0), Some(7));
    // the change on 2 comes back while syncing and is not repeated on 3
    assert_eq!(host.slot(3, 0), None);
    assert_eq!(host.calls, vec![Call::Normal(1, 0, Some(7)), Call::Force(2, 0, Some(7))]);
    assert!(!sync.is_syncing());
}

#[test]
fn test_normal_method_uses_change_equip() {
    let sync = Rc::new(EquipSync::new(SyncMethod::Normal));
    let pairs = pairs_of(&[(1, 2)]);
    let mut host = hooked_host(&sync, &pairs, &[1, 2]);

    host.force_change_equip(2, 3, None).unwrap();

    assert_eq!(host.calls, vec![Call::Force(2, 3, None), Call::Normal(1, 3, None)]);
}

#[test]
fn test_failing_partner_stops_propagation() {
    let sync = EquipSync::default();
    let pairs = pairs_of(&[(1, 2), (1, 3), (1, 4)]);
    let mut host = FakeEquipment::with_actors(&[1, 2, 3, 4]);
    host.fail_for = Some(3);

    let synced = sync.on_equip_changed(1, 0, Some(9), &pairs, &mut host);

    assert_eq!(synced, 1);
    assert_eq!(host.slot(2, 0), Some(9));
    assert_eq!(host.slot(4, 0), None);
    assert!(!sync.is_syncing());
}

#[test]
fn test_missing_partner_is_skipped() {
    let sync = EquipSync::default();
    let pairs = pairs_of(&[(1, 5), (1, 2)]);
    let mut host = FakeEquipment::with_actors(&[1, 2]);

    let synced = sync.on_equip_changed(1, 1, Some(3), &pairs, &mut host);

    assert_eq!(synced, 1);
    assert_eq!(host.slot(2, 1), Some(3));
}
