//! Stand picture motion tests

#![allow(dead_code)]

use pretty_assertions::assert_eq;
use stand_picture_host::{
    ActorOffsets, CommandArgs, GameVariables, HostError, InterpreterKind, MotionCommand, MotionSettings, Offset, OffsetStore, PluginParameters, StandMotion,
    StandPictureMotion, VariableStore,
};

const BASE: Offset = Offset { x: 100.0, y: 200.0 };

fn still() -> MotionSettings {
    MotionSettings {
        enable_float: false,
        ..Default::default()
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

/// Plugin with float disabled and the sprite of actor 1 attached and positioned once
fn create_test_motion(offsets: &ActorOffsets) -> StandPictureMotion {
    let mut motion = StandPictureMotion::new(still(), false);
    motion.attach(1, offsets);
    motion.position(1, BASE, &GameVariables::default());
    motion
}

// ============================================================================
// Settings and commands
// ============================================================================

#[test]
fn test_settings_defaults() {
    let settings = MotionSettings::from_parameters(&PluginParameters::new()).unwrap();

    assert_eq!(settings, MotionSettings::default());
    assert!(settings.enable_float);
    assert_eq!(settings.float_speed, 0.05);
    assert_eq!(settings.float_power, 5.0);
}

#[test]
fn test_zero_float_speed_falls_back_to_default() {
    let params: PluginParameters = [("FloatSpeed", "0"), ("FloatPower", "12"), ("EnableFloat", "false"), ("OffsetVariableX", "4")]
        .into_iter()
        .collect();

    let settings = MotionSettings::from_parameters(&params).unwrap();

    assert_eq!(settings.float_speed, 0.05);
    assert_eq!(settings.float_power, 12.0);
    assert!(!settings.enable_float);
    assert_eq!(settings.offset_variable_x, 4);
}

#[test]
fn test_parse_move_defaults() {
    let args: CommandArgs = [("X", "40"), ("Y", "-8")].into_iter().collect();

    let command = MotionCommand::parse("MoveStandPicture", &args).unwrap();

    assert_eq!(
        command,
        MotionCommand::MoveStandPicture {
            actor_id: 1,
            x: 40.0,
            y: -8.0,
            duration: 60,
            wait: false
        }
    );
}

#[test]
fn test_parse_relative_and_toggles() {
    let args: CommandArgs = [("ActorId", "3"), ("OffsetX", "5"), ("Duration", "0"), ("Wait", "true")].into_iter().collect();

    assert_eq!(
        MotionCommand::parse("MoveStandPictureRelative", &args).unwrap(),
        MotionCommand::MoveStandPictureRelative {
            actor_id: 3,
            offset_x: 5.0,
            offset_y: 0.0,
            duration: 0,
            wait: true
        }
    );
    assert_eq!(MotionCommand::parse("EnableAutoReset", &CommandArgs::new()).unwrap(), MotionCommand::EnableAutoReset);
    assert_eq!(MotionCommand::parse("DisableAutoReset", &CommandArgs::new()).unwrap(), MotionCommand::DisableAutoReset);
    assert!(matches!(MotionCommand::parse("Jump", &args), Err(HostError::UnknownCommand { .. })));
}

// ============================================================================
// Position
// ============================================================================

#[test]
fn test_attach_restores_persisted_offset() {
    let mut offsets = ActorOffsets::with_actors([1]);
    offsets.set_offset(1, Offset::new(12.0, -4.0));

    let mut sprite = StandMotion::attach(1, &offsets);

    assert_eq!(sprite.manual_offset(), Offset::new(12.0, -4.0));
    assert_eq!(sprite.position(BASE, &still(), &GameVariables::default()), Offset::new(112.0, 196.0));
}

#[test]
fn test_variable_offsets_are_added() {
    let offsets = ActorOffsets::with_actors([1]);
    let mut variables = GameVariables::default();
    variables.set_variable(7, 30);
    variables.set_variable(8, -10);
    let settings = MotionSettings {
        offset_variable_x: 7,
        offset_variable_y: 8,
        ..still()
    };
    let mut sprite = StandMotion::attach(1, &offsets);

    assert_eq!(sprite.position(BASE, &settings, &variables), Offset::new(130.0, 190.0));
}

#[test]
fn test_float_phase_and_offset() {
    let mut offsets = ActorOffsets::with_actors([1]);
    let settings = MotionSettings {
        float_speed: 0.5,
        float_power: 10.0,
        ..Default::default()
    };
    let mut sprite = StandMotion::attach(1, &offsets);

    sprite.update(&settings, &mut offsets);
    let position = sprite.position(BASE, &settings, &GameVariables::default());

    assert_close(sprite.float_count(), 0.5);
    assert_close(position.y, 200.0 + 0.5_f64.sin() * 10.0);
    assert_close(sprite.last_float_offset(), 0.5_f64.sin() * 10.0);
}

#[test]
fn test_float_phase_wraps() {
    let mut offsets = ActorOffsets::with_actors([1]);
    let settings = MotionSettings {
        float_speed: 4.0,
        ..Default::default()
    };
    let mut sprite = StandMotion::attach(1, &offsets);

    sprite.update(&settings, &mut offsets);
    sprite.update(&settings, &mut offsets);

    assert_close(sprite.float_count(), 8.0 - std::f64::consts::TAU);
}

// ============================================================================
// Moves
// ============================================================================

#[test]
fn test_instant_move_persists_offset() {
    let mut offsets = ActorOffsets::with_actors([1]);
    let mut motion = create_test_motion(&offsets);

    let wait = motion.execute(
        MotionCommand::MoveStandPicture {
            actor_id: 1,
            x: 150.0,
            y: 180.0,
            duration: 0,
            wait: true,
        },
        &mut offsets,
    );

    assert_eq!(wait, None);
    assert_eq!(offsets.offset(1), Offset::new(50.0, -20.0));
    assert_eq!(motion.position(1, BASE, &GameVariables::default()), Some(Offset::new(150.0, 180.0)));
}

#[test]
fn test_tweened_move() {
    let mut offsets = ActorOffsets::with_actors([1]);
    let mut motion = create_test_motion(&offsets);

    let wait = motion.execute(
        MotionCommand::MoveStandPicture {
            actor_id: 1,
            x: 140.0,
            y: 200.0,
            duration: 4,
            wait: true,
        },
        &mut offsets,
    );
    assert_eq!(wait, Some(4));

    motion.update(&mut offsets);
    motion.update(&mut offsets);
    assert_eq!(offsets.offset(1), Offset::new(20.0, 0.0));
    assert!(motion.sprite(1).is_some_and(StandMotion::is_moving));

    motion.update(&mut offsets);
    motion.update(&mut offsets);
    assert_eq!(offsets.offset(1), Offset::new(40.0, 0.0));
    assert!(!motion.sprite(1).is_some_and(StandMotion::is_moving));
}

#[test]
fn test_relative_move_ignores_float() {
    let mut offsets = ActorOffsets::with_actors([1]);
    let settings = MotionSettings {
        float_speed: 1.0,
        float_power: 8.0,
        ..Default::default()
    };
    let mut sprite = StandMotion::attach(1, &offsets);
    sprite.update(&settings, &mut offsets);
    sprite.position(BASE, &settings, &GameVariables::default());

    sprite.start_move_relative(Offset::new(-10.0, 25.0), 0, &mut offsets);

    assert_close(sprite.manual_offset().x, -10.0);
    assert_close(sprite.manual_offset().y, 25.0);
    assert_eq!(offsets.offset(1), sprite.manual_offset());
}

#[test]
fn test_move_of_unshown_actor_is_ignored() {
    let mut offsets = ActorOffsets::with_actors([1, 2]);
    let mut motion = create_test_motion(&offsets);

    let wait = motion.execute(
        MotionCommand::MoveStandPictureRelative {
            actor_id: 2,
            offset_x: 10.0,
            offset_y: 10.0,
            duration: 30,
            wait: true,
        },
        &mut offsets,
    );

    assert_eq!(wait, None);
    assert_eq!(offsets.offset(2), Offset::ZERO);
}

// ============================================================================
// Auto reset
// ============================================================================

#[test]
fn test_auto_reset_after_map_event() {
    let mut offsets = ActorOffsets::with_actors([1, 2]);
    offsets.set_offset(2, Offset::new(5.0, 5.0));
    let params = PluginParameters::new().with("AutoReset", "true").with("EnableFloat", "false");
    let mut motion = StandPictureMotion::from_parameters(&params).unwrap();
    motion.attach(1, &offsets);
    motion.position(1, BASE, &GameVariables::default());
    let _ = motion.execute(
        MotionCommand::MoveStandPicture {
            actor_id: 1,
            x: 0.0,
            y: 0.0,
            duration: 10,
            wait: false,
        },
        &mut offsets,
    );
    motion.update(&mut offsets);

    assert!(!motion.on_interpreter_terminated(InterpreterKind::Other, &mut offsets));
    assert!(motion.on_interpreter_terminated(InterpreterKind::Map, &mut offsets));

    assert_eq!(offsets.offset(1), Offset::ZERO);
    assert_eq!(offsets.offset(2), Offset::ZERO);
    let sprite = motion.sprite(1).unwrap();
    assert!(!sprite.is_moving());
    assert_eq!(sprite.manual_offset(), Offset::ZERO);
}

#[test]
fn test_auto_reset_toggle_commands() {
    let mut offsets = ActorOffsets::with_actors([1]);
    offsets.set_offset(1, Offset::new(3.0, 3.0));
    let mut motion = StandPictureMotion::new(still(), false);

    assert!(!motion.on_interpreter_terminated(InterpreterKind::Troop, &mut offsets));

    let _ = motion.execute(MotionCommand::EnableAutoReset, &mut offsets);
    assert!(motion.auto_reset());
    assert!(motion.on_interpreter_terminated(InterpreterKind::Troop, &mut offsets));
    assert_eq!(offsets.offset(1), Offset::ZERO);

    let _ = motion.execute(MotionCommand::DisableAutoReset, &mut offsets);
    assert!(!motion.auto_reset());
}
