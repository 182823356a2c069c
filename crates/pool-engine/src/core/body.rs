use glam::Vec2;

use crate::api::types::BallId;
use crate::core::table::Table;

/// A ball counts as moving while either velocity component exceeds this.
pub const MOVING_THRESHOLD: f32 = 0.01;

/// RGB ball color (0.0 - 1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BallColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from a packed 0xRRGGBB value.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
        }
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

/// Cue ball or object ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    Cue,
    Object,
}

/// A ball on the table. Velocity is a per-tick displacement.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: BallId,
    pub kind: BallKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: BallColor,
    /// Velocity retention per tick.
    pub friction: f32,
    /// Aim direction in radians. Only meaningful for the cue ball.
    pub aim_angle: f32,
}

impl Ball {
    pub fn new(id: BallId, kind: BallKind, pos: Vec2, radius: f32, color: BallColor) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
            friction: 0.99,
            aim_angle: 0.0,
        }
    }

    pub fn cue(pos: Vec2, radius: f32) -> Self {
        Self::new(BallId::CUE, BallKind::Cue, pos, radius, BallColor::WHITE)
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn is_cue(&self) -> bool {
        self.kind == BallKind::Cue
    }

    pub fn is_moving(&self) -> bool {
        self.vel.x.abs() > MOVING_THRESHOLD || self.vel.y.abs() > MOVING_THRESHOLD
    }

    /// Advance one tick: move by the current velocity, apply friction, then
    /// bounce off the table boundary.
    pub fn integrate(&mut self, table: &Table, bounce_damping: f32) {
        self.pos += self.vel;
        self.vel *= self.friction;
        self.bounce(table, bounce_damping);
    }

    /// Clamp to the bounce frame and reflect the crossing velocity component.
    ///
    /// The inset is `padding + radius` from each viewport edge and the test is
    /// against the ball's edge, so the center is held `padding + 2·radius`
    /// from the viewport edge.
    pub fn bounce(&mut self, table: &Table, damping: f32) {
        let inset = table.padding + self.radius;
        let max_x = table.viewport.x - inset;
        let max_y = table.viewport.y - inset;

        if self.pos.x - self.radius < inset {
            self.pos.x = inset + self.radius;
            self.vel.x *= -damping;
        }
        if self.pos.x + self.radius > max_x {
            self.pos.x = max_x - self.radius;
            self.vel.x *= -damping;
        }
        if self.pos.y - self.radius < inset {
            self.pos.y = inset + self.radius;
            self.vel.y *= -damping;
        }
        if self.pos.y + self.radius > max_y {
            self.pos.y = max_y - self.radius;
            self.vel.y *= -damping;
        }
    }

    /// Teleport to `pos` and stop.
    pub fn place_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// A circular capture zone. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub pos: Vec2,
    pub radius: f32,
}

impl Pocket {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// Whether `ball`'s center lies within `pocket.radius + ball.radius`.
    pub fn captures(&self, ball: &Ball) -> bool {
        self.pos.distance(ball.pos) < self.radius + ball.radius
    }
}
