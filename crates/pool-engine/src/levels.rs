//! Level layouts: which object balls a level starts with, and where.
//!
//! Levels 1-3 are fixed racks. From level 4 on the ball count grows by one
//! every five levels (capped at ten) and the rack shape cycles through four
//! patterns by `level % 4`.

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec2;

use crate::api::config::PhysicsConfig;
use crate::api::types::BallId;
use crate::core::body::{Ball, BallColor, BallKind, Pocket};
use crate::core::table::Table;

/// Object-ball colors, assigned in rack order and cycled.
pub const PALETTE: [u32; 10] = [
    0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, 0xFFA500, 0x800080, 0x008000,
    0xFF4500,
];

/// Largest rack a procedural level produces.
pub const MAX_RACK: usize = 10;

/// Initial contents of a level.
#[derive(Debug, Clone)]
pub struct LevelSetup {
    pub cue_start: Vec2,
    pub balls: Vec<Ball>,
    pub pockets: Vec<Pocket>,
}

/// Supplies the starting layout for a level on a given table.
pub trait LevelLayout {
    fn layout(&self, level: u32, table: &Table, physics: &PhysicsConfig) -> LevelSetup;
}

/// Rack shapes used by procedural levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RackPattern {
    Triangle,
    Line,
    Circle,
    Grid,
}

impl RackPattern {
    pub fn for_level(level: u32) -> Self {
        match level % 4 {
            0 => RackPattern::Triangle,
            1 => RackPattern::Line,
            2 => RackPattern::Circle,
            _ => RackPattern::Grid,
        }
    }
}

/// Number of object balls on a procedural level.
pub fn rack_size(level: u32) -> usize {
    (3 + level as usize / 5).min(MAX_RACK)
}

/// The built-in layout generator.
#[derive(Debug, Clone)]
pub struct PatternLayout {
    /// Distance between neighbouring rack positions.
    pub spacing: f32,
}

impl Default for PatternLayout {
    fn default() -> Self {
        Self { spacing: 30.0 }
    }
}

impl PatternLayout {
    /// Rack positions for `level` around `anchor`.
    pub fn rack_positions(&self, level: u32, anchor: Vec2) -> Vec<Vec2> {
        let s = self.spacing;
        match level {
            0 | 1 => vec![anchor],
            2 => (0..5)
                .map(|i| Vec2::new(anchor.x, anchor.y - s * 2.0 + s * i as f32))
                .collect(),
            3 => triangle(anchor, s, 3, 6),
            _ => {
                let n = rack_size(level);
                match RackPattern::for_level(level) {
                    RackPattern::Triangle => triangle(anchor, s, n.div_ceil(2), n),
                    RackPattern::Line => (0..n)
                        .map(|i| Vec2::new(anchor.x - s * i as f32, anchor.y))
                        .collect(),
                    RackPattern::Circle => {
                        let radius = s * n.div_ceil(4) as f32;
                        (0..n)
                            .map(|i| {
                                let angle = i as f32 / n as f32 * TAU;
                                anchor + Vec2::new(angle.cos(), angle.sin()) * radius
                            })
                            .collect()
                    }
                    RackPattern::Grid => (0..n)
                        .map(|i| {
                            Vec2::new(
                                anchor.x - s * (i % 3) as f32,
                                anchor.y + s * (i / 3) as f32,
                            )
                        })
                        .collect(),
                }
            }
        }
    }
}

/// Rows fan out leftwards from the apex; row `r` holds `r + 1` balls two
/// spacings apart. Stops after `limit` balls.
fn triangle(apex: Vec2, s: f32, rows: usize, limit: usize) -> Vec<Vec2> {
    let mut out = Vec::with_capacity(limit);
    for row in 0..rows {
        for col in 0..=row {
            if out.len() == limit {
                return out;
            }
            out.push(Vec2::new(
                apex.x - s * row as f32,
                apex.y - s * row as f32 + s * 2.0 * col as f32,
            ));
        }
    }
    out
}

impl LevelLayout for PatternLayout {
    fn layout(&self, level: u32, table: &Table, physics: &PhysicsConfig) -> LevelSetup {
        let balls = self
            .rack_positions(level, table.rack_anchor())
            .into_iter()
            .enumerate()
            .map(|(i, pos)| {
                let color = BallColor::from_hex(PALETTE[i % PALETTE.len()]);
                Ball::new(BallId(i as u32 + 1), BallKind::Object, pos, physics.ball_radius, color)
                    .with_friction(physics.friction)
            })
            .collect();

        let pockets = table
            .pocket_positions()
            .into_iter()
            .map(|pos| Pocket::new(pos, physics.pocket_radius))
            .collect();

        LevelSetup {
            cue_start: table.cue_start(),
            balls,
            pockets,
        }
    }
}

/// Rejected level selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    OutOfRange { requested: i64, min: u32, max: u32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                requested,
                min,
                max,
            } => write!(f, "level {} is outside {}..={}", requested, min, max),
        }
    }
}

impl std::error::Error for LevelError {}

/// Check a requested level against the selectable range.
pub fn validate_level(requested: i64, min: u32, max: u32) -> Result<u32, LevelError> {
    if requested < i64::from(min) || requested > i64::from(max) {
        return Err(LevelError::OutOfRange {
            requested,
            min,
            max,
        });
    }
    Ok(requested as u32)
}
