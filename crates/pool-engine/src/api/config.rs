use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::geometry::GuideParams;

/// Ball and table physics constants.
/// Velocities are per-tick displacements, so every value here is tuned for
/// one `Session::tick` per `GameConfig::fixed_dt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Radius of every ball in game units.
    pub ball_radius: f32,
    /// Capture radius of every pocket.
    pub pocket_radius: f32,
    /// Multiplicative velocity retention per tick (0 < f < 1).
    pub friction: f32,
    /// Inset from the viewport edges used by the boundary bounce.
    pub bounce_padding: f32,
    /// Velocity retention on a boundary bounce.
    pub bounce_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            ball_radius: 15.0,
            pocket_radius: 20.0,
            friction: 0.99,
            bounce_padding: 50.0,
            bounce_damping: 0.8,
        }
    }
}

/// Cue stick, power meter and hint tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Launch speed at full power with no pull.
    pub shot_speed: f32,
    /// Power change per tick while aiming.
    pub power_step: f32,
    /// Upper bound of the power ramp.
    pub max_power: f32,
    /// Gap between the cue ball and the stick tip at rest.
    pub stick_offset: f32,
    /// Drawn length of the cue stick.
    pub stick_length: f32,
    /// Largest pull-back distance; a full pull doubles the shot.
    pub max_pull_distance: f32,
    /// Radians per rotate-button press.
    pub rotate_step: f32,
    /// Seconds after a shot before the hint may reappear.
    pub hint_delay: f32,
    /// Base radius of the hint ring.
    pub hint_radius: f32,
    /// Pulse scale change per tick.
    pub hint_pulse_step: f32,
    pub hint_pulse_min: f32,
    pub hint_pulse_max: f32,
    /// Length of the aim ray before clipping.
    pub guide_length: f32,
    /// Length of the reflected guide segment.
    pub reflection_length: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            shot_speed: 20.0,
            power_step: 2.0,
            max_power: 100.0,
            stick_offset: 30.0,
            stick_length: 200.0,
            max_pull_distance: 100.0,
            rotate_step: 0.1,
            hint_delay: 1.0,
            hint_radius: 30.0,
            hint_pulse_step: 0.02,
            hint_pulse_min: 0.8,
            hint_pulse_max: 1.2,
            guide_length: 1000.0,
            reflection_length: 200.0,
        }
    }
}

impl AimConfig {
    /// Segment lengths used to build the aim guide.
    pub fn guide_params(&self) -> GuideParams {
        GuideParams {
            line_length: self.guide_length,
            reflection_length: self.reflection_length,
            stick_offset: self.stick_offset,
            stick_length: self.stick_length,
        }
    }
}

/// Top-level configuration for a pool session and its bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial viewport width in game units.
    pub viewport_width: f32,
    /// Initial viewport height in game units.
    pub viewport_height: f32,
    /// Points awarded per pocketed object ball.
    pub points_per_ball: u32,
    /// Lowest selectable level.
    pub min_level: u32,
    /// Highest selectable level.
    pub max_level: u32,
    /// Maximum balls written to the render buffer.
    pub max_balls: usize,
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,
    pub physics: PhysicsConfig,
    pub aim: AimConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            points_per_ball: 100,
            min_level: 1,
            max_level: 100,
            max_balls: 16,
            max_sounds: 32,
            max_events: 32,
            physics: PhysicsConfig::default(),
            aim: AimConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config, logging and falling back to defaults on bad input.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Invalid game config ({}), using defaults", err);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with: non-positive sizes,
    /// timestep or shot scales, and retention factors outside (0, 1).
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fixed_dt", self.fixed_dt)?;
        positive("viewport_width", self.viewport_width)?;
        positive("viewport_height", self.viewport_height)?;
        positive("physics.ball_radius", self.physics.ball_radius)?;
        positive("physics.pocket_radius", self.physics.pocket_radius)?;
        unit_open("physics.friction", self.physics.friction)?;
        unit_open("physics.bounce_damping", self.physics.bounce_damping)?;
        positive("aim.max_power", self.aim.max_power)?;
        positive("aim.max_pull_distance", self.aim.max_pull_distance)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn unit_open(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Rejected game config.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed JSON: {}", err),
            Self::OutOfRange { field, value } => write!(f, "{} = {} is out of range", field, value),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}
