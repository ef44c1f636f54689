//! Floating animation, tweened moves and persisted offsets of stand pictures.
//!
//! The host draws a stand picture per actor and asks [`StandPictureMotion`]
//! twice a frame: [`StandPictureMotion::update`] advances float phase and move
//! tweens, [`StandPictureMotion::position`] turns the base position the host
//! computed into the final one. Manual offsets are written back to the actor
//! through [`OffsetStore`] whenever they change so they survive saving.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::{CommandArgs, HostError, Offset, OffsetStore, PluginParameters, Result, VariableStore};

pub const PLUGIN_NAME: &str = "StandPicture_MovementPatch";

const DEFAULT_FLOAT_SPEED: f64 = 0.05;
const DEFAULT_FLOAT_POWER: f64 = 5.0;
const DEFAULT_MOVE_DURATION: i32 = 60;

// ═══════════════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    /// Game variable added to x, 0 for none
    pub offset_variable_x: i32,
    /// Game variable added to y, 0 for none
    pub offset_variable_y: i32,
    pub enable_float: bool,
    /// Phase advance per frame in radians
    pub float_speed: f64,
    /// Float amplitude in pixels
    pub float_power: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            offset_variable_x: 0,
            offset_variable_y: 0,
            enable_float: true,
            float_speed: DEFAULT_FLOAT_SPEED,
            float_power: DEFAULT_FLOAT_POWER,
        }
    }
}

impl MotionSettings {
    /// Reads the plugin parameters. A float speed or power of 0 falls back to
    /// the default like a missing one.
    pub fn from_parameters(params: &PluginParameters) -> Result<Self> {
        let float_speed = params.float_or("FloatSpeed", DEFAULT_FLOAT_SPEED)?;
        let float_power = params.float_or("FloatPower", DEFAULT_FLOAT_POWER)?;
        Ok(Self {
            offset_variable_x: params.number("OffsetVariableX")?,
            offset_variable_y: params.number("OffsetVariableY")?,
            enable_float: params.flag_or("EnableFloat", true),
            float_speed: if float_speed == 0.0 { DEFAULT_FLOAT_SPEED } else { float_speed },
            float_power: if float_power == 0.0 { DEFAULT_FLOAT_POWER } else { float_power },
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Per sprite motion
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    start: Offset,
    target: Offset,
    duration: u32,
    time: u32,
}

/// Motion state of one stand picture.
#[derive(Debug, Clone, PartialEq)]
pub struct StandMotion {
    actor_id: i32,
    float_count: f64,
    manual_offset: Offset,
    last_float_offset: f64,
    last_position: Offset,
    tween: Option<Tween>,
}

impl StandMotion {
    /// Starts with the offset persisted for the actor.
    pub fn attach(actor_id: i32, offsets: &dyn OffsetStore) -> Self {
        let manual_offset = offsets.offset(actor_id);
        Self {
            actor_id,
            float_count: 0.0,
            manual_offset,
            last_float_offset: 0.0,
            last_position: manual_offset,
            tween: None,
        }
    }

    pub fn actor_id(&self) -> i32 {
        self.actor_id
    }

    pub fn float_count(&self) -> f64 {
        self.float_count
    }

    pub fn manual_offset(&self) -> Offset {
        self.manual_offset
    }

    pub fn last_float_offset(&self) -> f64 {
        self.last_float_offset
    }

    /// Get the position computed by the last [`Self::position`] call
    pub fn last_position(&self) -> Offset {
        self.last_position
    }

    pub fn is_moving(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance one frame.
    pub fn update(&mut self, settings: &MotionSettings, offsets: &mut dyn OffsetStore) {
        if settings.enable_float {
            self.float_count = (self.float_count + settings.float_speed) % TAU;
        }

        let Some(mut tween) = self.tween else {
            return;
        };
        tween.time += 1;
        if tween.time >= tween.duration {
            self.tween = None;
            self.apply_manual_offset(tween.target, offsets);
        } else {
            self.tween = Some(tween);
            let t = f64::from(tween.time) / f64::from(tween.duration);
            self.apply_manual_offset(tween.start.lerp(tween.target, t), offsets);
        }
    }

    /// Final position for the base position the host computed.
    pub fn position(&mut self, base: Offset, settings: &MotionSettings, variables: &dyn VariableStore) -> Offset {
        let mut position = base;
        if settings.offset_variable_x != 0 {
            position.x += f64::from(variables.variable(settings.offset_variable_x));
        }
        if settings.offset_variable_y != 0 {
            position.y += f64::from(variables.variable(settings.offset_variable_y));
        }
        position.x += self.manual_offset.x;
        position.y += self.manual_offset.y;

        self.last_float_offset = 0.0;
        if settings.enable_float {
            let float_offset = self.float_count.sin() * settings.float_power;
            position.y += float_offset;
            self.last_float_offset = float_offset;
        }
        self.last_position = position;
        position
    }

    /// Position without the float component
    fn stable_position(&self) -> Offset {
        Offset::new(self.last_position.x, self.last_position.y - self.last_float_offset)
    }

    /// Move the picture so it ends at `target` on screen. A duration of 0
    /// moves instantly.
    pub fn start_move_to(&mut self, target: Offset, duration: i32, offsets: &mut dyn OffsetStore) {
        let stable = self.stable_position();
        let start = self.manual_offset;
        let end = Offset::new(start.x + target.x - stable.x, start.y + target.y - stable.y);

        if duration <= 0 {
            self.tween = None;
            self.apply_manual_offset(end, offsets);
            return;
        }
        self.tween = Some(Tween {
            start,
            target: end,
            duration: duration.unsigned_abs(),
            time: 0,
        });
    }

    /// Move by `delta` from the current position.
    pub fn start_move_relative(&mut self, delta: Offset, duration: i32, offsets: &mut dyn OffsetStore) {
        let stable = self.stable_position();
        self.start_move_to(Offset::new(stable.x + delta.x, stable.y + delta.y), duration, offsets);
    }

    /// Stop moving and drop the manual offset. The actor's persisted offset is
    /// left to the caller.
    pub fn reset(&mut self) {
        self.tween = None;
        self.manual_offset = Offset::ZERO;
    }

    fn apply_manual_offset(&mut self, offset: Offset, offsets: &mut dyn OffsetStore) {
        self.manual_offset = offset;
        offsets.set_offset(self.actor_id, offset);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    MoveStandPicture { actor_id: i32, x: f64, y: f64, duration: i32, wait: bool },
    MoveStandPictureRelative { actor_id: i32, offset_x: f64, offset_y: f64, duration: i32, wait: bool },
    EnableAutoReset,
    DisableAutoReset,
}

impl MotionCommand {
    pub fn parse(command: &str, args: &CommandArgs) -> Result<Self> {
        match command {
            "MoveStandPicture" => Ok(MotionCommand::MoveStandPicture {
                actor_id: args.number_or("ActorId", 1)?,
                x: args.float_or("X", 0.0)?,
                y: args.float_or("Y", 0.0)?,
                duration: args.number_or("Duration", DEFAULT_MOVE_DURATION)?,
                wait: args.flag("Wait"),
            }),
            "MoveStandPictureRelative" => Ok(MotionCommand::MoveStandPictureRelative {
                actor_id: args.number_or("ActorId", 1)?,
                offset_x: args.float_or("OffsetX", 0.0)?,
                offset_y: args.float_or("OffsetY", 0.0)?,
                duration: args.number_or("Duration", DEFAULT_MOVE_DURATION)?,
                wait: args.flag("Wait"),
            }),
            "EnableAutoReset" => Ok(MotionCommand::EnableAutoReset),
            "DisableAutoReset" => Ok(MotionCommand::DisableAutoReset),
            _ => Err(HostError::UnknownCommand {
                plugin: PLUGIN_NAME,
                command: command.to_string(),
            }),
        }
    }
}

/// Which interpreter finished running an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterKind {
    Map,
    Troop,
    /// Common events, parallel processes and other child interpreters
    Other,
}

// ═══════════════════════════════════════════════════════════════════════════
// Plugin
// ═══════════════════════════════════════════════════════════════════════════

/// All stand pictures currently on screen, keyed by actor id.
#[derive(Debug, Clone, Default)]
pub struct StandPictureMotion {
    settings: MotionSettings,
    auto_reset: bool,
    sprites: BTreeMap<i32, StandMotion>,
}

impl StandPictureMotion {
    pub fn new(settings: MotionSettings, auto_reset: bool) -> Self {
        Self {
            settings,
            auto_reset,
            sprites: BTreeMap::new(),
        }
    }

    pub fn from_parameters(params: &PluginParameters) -> Result<Self> {
        Ok(Self::new(MotionSettings::from_parameters(params)?, params.flag_or("AutoReset", false)))
    }

    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    pub fn auto_reset(&self) -> bool {
        self.auto_reset
    }

    /// Start tracking the stand picture of `actor_id`. An already tracked
    /// picture keeps its state.
    pub fn attach(&mut self, actor_id: i32, offsets: &dyn OffsetStore) -> &mut StandMotion {
        self.sprites.entry(actor_id).or_insert_with(|| StandMotion::attach(actor_id, offsets))
    }

    pub fn detach(&mut self, actor_id: i32) -> Option<StandMotion> {
        self.sprites.remove(&actor_id)
    }

    pub fn sprite(&self, actor_id: i32) -> Option<&StandMotion> {
        self.sprites.get(&actor_id)
    }

    pub fn update(&mut self, offsets: &mut dyn OffsetStore) {
        for sprite in self.sprites.values_mut() {
            sprite.update(&self.settings, offsets);
        }
    }

    /// Final position of the stand picture of `actor_id`, `None` if untracked
    pub fn position(&mut self, actor_id: i32, base: Offset, variables: &dyn VariableStore) -> Option<Offset> {
        let settings = self.settings;
        self.sprites.get_mut(&actor_id).map(|sprite| sprite.position(base, &settings, variables))
    }

    /// Runs a command. Returns the frames the event should wait.
    pub fn execute(&mut self, command: MotionCommand, offsets: &mut dyn OffsetStore) -> Option<u32> {
        match command {
            MotionCommand::MoveStandPicture { actor_id, x, y, duration, wait } => {
                let sprite = self.tracked(actor_id)?;
                sprite.start_move_to(Offset::new(x, y), duration, offsets);
                wait_frames(wait, duration)
            }
            MotionCommand::MoveStandPictureRelative {
                actor_id,
                offset_x,
                offset_y,
                duration,
                wait,
            } => {
                let sprite = self.tracked(actor_id)?;
                sprite.start_move_relative(Offset::new(offset_x, offset_y), duration, offsets);
                wait_frames(wait, duration)
            }
            MotionCommand::EnableAutoReset => {
                self.auto_reset = true;
                None
            }
            MotionCommand::DisableAutoReset => {
                self.auto_reset = false;
                None
            }
        }
    }

    /// Resets every actor's offset and stops all pictures when a map or
    /// troop event ends and auto reset is on. Returns whether it reset.
    pub fn on_interpreter_terminated(&mut self, kind: InterpreterKind, offsets: &mut dyn OffsetStore) -> bool {
        if !self.auto_reset || kind == InterpreterKind::Other {
            return false;
        }
        for actor_id in offsets.actor_ids() {
            offsets.set_offset(actor_id, Offset::ZERO);
        }
        for sprite in self.sprites.values_mut() {
            sprite.reset();
        }
        log::debug!("stand picture offsets reset after {kind:?} event");
        true
    }

    fn tracked(&mut self, actor_id: i32) -> Option<&mut StandMotion> {
        let sprite = self.sprites.get_mut(&actor_id);
        if sprite.is_none() {
            log::warn!("no stand picture shown for actor {actor_id}");
        }
        sprite
    }
}

fn wait_frames(wait: bool, duration: i32) -> Option<u32> {
    (wait && duration > 0).then(|| duration.unsigned_abs())
}
