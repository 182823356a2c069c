//! Aim/shoot state machine, power ramp and the idle hint.
//!
//! The phase is derived, not stored: `Aiming` while an aim is in progress,
//! otherwise `InMotion` while any ball moves, otherwise `Idle`.

use glam::Vec2;

use crate::api::config::AimConfig;
use crate::core::body::Ball;
use crate::core::geometry::direction;

/// Player-facing phase of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimPhase {
    Idle,
    Aiming,
    InMotion,
}

impl AimPhase {
    /// Numeric id written into the bridge's state event.
    pub fn id(self) -> u8 {
        match self {
            AimPhase::Idle => 0,
            AimPhase::Aiming => 1,
            AimPhase::InMotion => 2,
        }
    }
}

/// Rotation requested by the left/right buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotate {
    Left,
    Right,
}

impl Rotate {
    /// Map a signed direction (-1 / +1) to a rotation. Zero maps to nothing.
    pub fn from_sign(direction: f32) -> Option<Self> {
        if direction < 0.0 {
            Some(Rotate::Left)
        } else if direction > 0.0 {
            Some(Rotate::Right)
        } else {
            None
        }
    }

    fn sign(self) -> f32 {
        match self {
            Rotate::Left => -1.0,
            Rotate::Right => 1.0,
        }
    }
}

/// Aim in progress. The aim angle itself lives on the cue ball.
#[derive(Debug, Clone, PartialEq)]
pub struct AimState {
    pub aiming: bool,
    /// Oscillating 0..=max_power ramp, advanced once per tick while aiming.
    pub power: f32,
    pub power_increasing: bool,
    /// Set once the pointer has been drawn past the stick offset.
    pub pulling: bool,
    /// Stick pull-back, 0..=max_pull_distance. Multiplies the shot by 1..=2.
    pub pull_distance: f32,
}

impl Default for AimState {
    fn default() -> Self {
        Self::new()
    }
}

impl AimState {
    pub fn new() -> Self {
        Self {
            aiming: false,
            power: 0.0,
            power_increasing: true,
            pulling: false,
            pull_distance: 0.0,
        }
    }

    pub fn phase(&self, any_moving: bool) -> AimPhase {
        if self.aiming {
            AimPhase::Aiming
        } else if any_moving {
            AimPhase::InMotion
        } else {
            AimPhase::Idle
        }
    }

    /// Begin an aim. Refused while the cue ball is moving.
    pub fn start(&mut self, cue: &Ball) -> bool {
        if cue.is_moving() {
            return false;
        }
        *self = Self {
            aiming: true,
            ..Self::new()
        };
        true
    }

    /// Point the cue ball at `target` without touching the pull.
    pub fn aim_at(&self, cue: &mut Ball, target: Vec2) {
        if !self.aiming {
            return;
        }
        let d = target - cue.pos;
        cue.aim_angle = d.y.atan2(d.x);
    }

    /// Follow the pointer: re-aim and, past the stick offset, set the pull.
    /// Returns true on the tick the pull begins.
    pub fn update_target(&mut self, cue: &mut Ball, target: Vec2, config: &AimConfig) -> bool {
        if !self.aiming {
            return false;
        }
        self.aim_at(cue, target);

        let distance = cue.pos.distance(target);
        if distance <= config.stick_offset {
            return false;
        }
        let began = !self.pulling;
        self.pulling = true;
        self.pull_distance = (distance - config.stick_offset).min(config.max_pull_distance);
        began
    }

    /// Launch velocity for the current power, pull and aim angle.
    pub fn launch_velocity(&self, angle: f32, config: &AimConfig) -> Vec2 {
        let power = self.power.min(config.max_power) / config.max_power;
        let pull_multiplier = 1.0 + self.pull_distance / config.max_pull_distance;
        direction(angle) * power * config.shot_speed * pull_multiplier
    }

    /// Release the shot: ends the aim and sets the cue ball's velocity.
    /// Returns the launch velocity, or None if no aim was in progress.
    pub fn release(&mut self, cue: &mut Ball, config: &AimConfig) -> Option<Vec2> {
        if !self.aiming {
            return None;
        }
        self.aiming = false;
        let vel = self.launch_velocity(cue.aim_angle, config);
        cue.vel = vel;
        Some(vel)
    }

    /// Nudge the aim angle. Works in any phase as long as the cue ball is at rest.
    pub fn rotate(cue: &mut Ball, rotate: Rotate, config: &AimConfig) -> bool {
        if cue.is_moving() {
            return false;
        }
        cue.aim_angle += rotate.sign() * config.rotate_step;
        true
    }

    /// Advance the power ramp by one tick.
    pub fn tick_power(&mut self, config: &AimConfig) {
        if !self.aiming {
            return;
        }
        if self.power_increasing {
            self.power += config.power_step;
            if self.power >= config.max_power {
                self.power_increasing = false;
            }
        } else {
            self.power -= config.power_step;
            if self.power <= 0.0 {
                self.power_increasing = true;
            }
        }
    }
}

/// The pulsing ring drawn around a resting cue ball between shots.
#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    pub visible: bool,
    /// Ring scale, oscillating between the configured min and max.
    pub scale: f32,
    growing: bool,
    /// Seconds until the one-shot post-shot check fires.
    pending: Option<f32>,
}

impl Default for Hint {
    fn default() -> Self {
        Self::new()
    }
}

impl Hint {
    pub fn new() -> Self {
        Self {
            visible: true,
            scale: 1.0,
            growing: true,
            pending: None,
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Arm the one-shot check that re-shows the hint after `delay` seconds.
    pub fn schedule(&mut self, delay: f32) {
        self.pending = Some(delay);
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Count down the pending check. When it fires the hint reappears only if
    /// the cue ball is at rest at that moment; there is no retry.
    pub fn advance(&mut self, dt: f32, cue_moving: bool) {
        let Some(remaining) = self.pending else {
            return;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.pending = Some(remaining);
            return;
        }
        self.pending = None;
        if !cue_moving {
            self.visible = true;
        }
    }

    /// Step the ring pulse by one tick.
    pub fn pulse(&mut self, config: &AimConfig) {
        if self.growing {
            self.scale += config.hint_pulse_step;
            if self.scale >= config.hint_pulse_max {
                self.growing = false;
            }
        } else {
            self.scale -= config.hint_pulse_step;
            if self.scale <= config.hint_pulse_min {
                self.growing = true;
            }
        }
    }

    pub fn radius(&self, config: &AimConfig) -> f32 {
        config.hint_radius * self.scale
    }
}
