//! Ball-ball impulse resolution and pocket capture.
//!
//! Each tick walks the balls in slot order (cue ball first). A ball that is
//! moving is integrated, tested against every other ball still in play, then
//! tested against the pockets. Pocketed object balls are only marked during
//! the walk and removed once it finishes.

use crate::api::config::PhysicsConfig;
use crate::api::types::BallId;
use crate::core::body::{Ball, Pocket};
use crate::core::rack::BallSet;
use crate::core::table::Table;

/// Something that happened during one physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two balls touched and an impulse was applied.
    Hit { a: BallId, b: BallId },
    /// An object ball dropped into pocket `pocket` and left play.
    Pocketed { ball: BallId, pocket: usize },
    /// The cue ball dropped into pocket `pocket` and was returned to the restart point.
    CueScratched { pocket: usize },
}

/// Whether two balls overlap: center distance strictly below the sum of radii.
pub fn overlapping(a: &Ball, b: &Ball) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// Equal-mass, frictionless elastic impulse along the contact normal.
///
/// With `n` the unit normal from `a` to `b` and `s = (vb - va)·n`, a pair with
/// `s >= 0` is already separating and is left untouched. Otherwise `s·n` is
/// added to `a` and subtracted from `b`, which exchanges the normal velocity
/// components and leaves the tangential ones alone. There is no positional
/// correction, so overlapping balls may stay overlapped for a few ticks.
///
/// Coincident centers have no normal; they are skipped rather than producing
/// NaN velocities. Returns whether an impulse was applied.
pub fn resolve_collision(a: &mut Ball, b: &mut Ball) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return false;
    }

    let normal = delta / dist;
    let separating_speed = (b.vel - a.vel).dot(normal);
    if separating_speed >= 0.0 {
        return false;
    }

    let impulse = normal * separating_speed;
    a.vel += impulse;
    b.vel -= impulse;
    true
}

fn pair_key(a: BallId, b: BallId) -> (u32, u32) {
    if a.0 < b.0 {
        (a.0, b.0)
    } else {
        (b.0, a.0)
    }
}

/// Run one physics tick over `balls`, appending what happened to `events`.
///
/// Only moving balls are integrated. A pair is resolved at most once per tick
/// even when both of its balls are moving. The first pocket that captures a
/// ball wins.
pub fn step_into(
    balls: &mut BallSet,
    pockets: &[Pocket],
    table: &Table,
    physics: &PhysicsConfig,
    events: &mut Vec<CollisionEvent>,
) {
    let restart = table.cue_restart();
    let mut resolved: Vec<(u32, u32)> = Vec::new();

    for i in 0..balls.slot_count() {
        let id = balls.slot(i).id;
        if balls.is_pocketed(id) || !balls.slot(i).is_moving() {
            continue;
        }

        balls.slot_mut(i).integrate(table, physics.bounce_damping);

        for j in 0..balls.slot_count() {
            if j == i {
                continue;
            }
            let other = balls.slot(j).id;
            if balls.is_pocketed(other) {
                continue;
            }
            let key = pair_key(id, other);
            if resolved.contains(&key) {
                continue;
            }
            let (a, b) = balls.pair_mut(i, j);
            if overlapping(a, b) && resolve_collision(a, b) {
                resolved.push(key);
                events.push(CollisionEvent::Hit { a: id, b: other });
            }
        }

        let captured = pockets.iter().position(|p| p.captures(balls.slot(i)));
        if let Some(pocket) = captured {
            if balls.slot(i).is_cue() {
                balls.cue_mut().place_at(restart);
                events.push(CollisionEvent::CueScratched { pocket });
            } else if balls.mark_pocketed(id) {
                events.push(CollisionEvent::Pocketed { ball: id, pocket });
            }
        }
    }

    balls.remove_pocketed();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::{BallColor, BallKind};
    use glam::Vec2;

    const EPS: f32 = 1e-4;

    fn object(id: u32, pos: Vec2, vel: Vec2) -> Ball {
        Ball::new(BallId(id), BallKind::Object, pos, 15.0, BallColor::WHITE).with_velocity(vel)
    }

    fn table() -> Table {
        Table::from_viewport(800.0, 600.0, &PhysicsConfig::default())
    }

    #[test]
    fn head_on_equal_mass_swaps_velocities() {
        let mut a = object(1, Vec2::new(100.0, 100.0), Vec2::new(5.0, 0.0));
        let mut b = object(2, Vec2::new(129.0, 100.0), Vec2::new(-5.0, 0.0));
        assert!(overlapping(&a, &b));
        assert!(resolve_collision(&mut a, &mut b));
        assert!((a.vel - Vec2::new(-5.0, 0.0)).length() < EPS, "a.vel = {:?}", a.vel);
        assert!((b.vel - Vec2::new(5.0, 0.0)).length() < EPS, "b.vel = {:?}", b.vel);
    }

    #[test]
    fn moving_ball_stops_and_target_takes_over() {
        let mut a = object(1, Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0));
        let mut b = object(2, Vec2::new(29.0, 0.0), Vec2::ZERO);
        assert!(resolve_collision(&mut a, &mut b));
        assert!(a.vel.length() < EPS);
        assert!((b.vel - Vec2::new(8.0, 0.0)).length() < EPS);
    }

    #[test]
    fn normal_momentum_is_conserved() {
        let mut a = object(1, Vec2::new(10.0, 20.0), Vec2::new(3.0, 2.5));
        let mut b = object(2, Vec2::new(30.0, 32.0), Vec2::new(-1.5, -4.0));
        let n = (b.pos - a.pos).normalize();
        let before = a.vel.dot(n) + b.vel.dot(n);
        let total_before = a.vel + b.vel;
        assert!(resolve_collision(&mut a, &mut b));
        let after = a.vel.dot(n) + b.vel.dot(n);
        assert!((before - after).abs() < EPS, "{} vs {}", before, after);
        assert!((total_before - (a.vel + b.vel)).length() < EPS);
    }

    #[test]
    fn tangential_component_is_untouched() {
        let mut a = object(1, Vec2::new(0.0, 0.0), Vec2::new(4.0, 3.0));
        let mut b = object(2, Vec2::new(29.0, 0.0), Vec2::ZERO);
        resolve_collision(&mut a, &mut b);
        assert!((a.vel - Vec2::new(0.0, 3.0)).length() < EPS);
        assert!((b.vel - Vec2::new(4.0, 0.0)).length() < EPS);
    }

    #[test]
    fn separating_pair_is_left_alone() {
        let mut a = object(1, Vec2::new(100.0, 100.0), Vec2::new(-2.0, 1.0));
        let mut b = object(2, Vec2::new(120.0, 100.0), Vec2::new(3.0, 0.5));
        let (va, vb) = (a.vel, b.vel);
        assert!(!resolve_collision(&mut a, &mut b));
        assert_eq!(a.vel, va);
        assert_eq!(b.vel, vb);
    }

    #[test]
    fn coincident_centers_are_skipped() {
        let mut a = object(1, Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0));
        let mut b = object(2, Vec2::new(50.0, 50.0), Vec2::new(-1.0, 0.0));
        assert!(!resolve_collision(&mut a, &mut b));
        assert!(a.vel.is_finite() && b.vel.is_finite());
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn step_integrates_only_moving_balls() {
        let table = table();
        let mut balls = BallSet::new(Ball::cue(Vec2::new(200.0, 300.0), 15.0));
        balls.spawn(object(1, Vec2::new(400.0, 300.0), Vec2::new(0.005, 0.0)));
        let mut events = Vec::new();
        step_into(&mut balls, &[], &table, &PhysicsConfig::default(), &mut events);
        assert_eq!(balls.get(BallId(1)).unwrap().pos, Vec2::new(400.0, 300.0));
        assert!(events.is_empty());
    }

    #[test]
    fn step_reports_one_hit_per_pair() {
        let table = table();
        let mut cue = Ball::cue(Vec2::new(300.0, 300.0), 15.0);
        cue.vel = Vec2::new(5.0, 0.0);
        let mut balls = BallSet::new(cue);
        balls.spawn(object(1, Vec2::new(334.0, 300.0), Vec2::new(-5.0, 0.0)));
        let mut events = Vec::new();
        step_into(&mut balls, &[], &table, &PhysicsConfig::default(), &mut events);

        let hits = events
            .iter()
            .filter(|e| matches!(e, CollisionEvent::Hit { .. }))
            .count();
        assert_eq!(hits, 1);
        assert!(balls.cue().vel.x < 0.0);
        assert!(balls.get(BallId(1)).unwrap().vel.x > 0.0);
    }

    #[test]
    fn step_pockets_object_ball_and_removes_it_after_sweep() {
        let table = table();
        let pocket = Pocket::new(Vec2::new(400.0, 300.0), 20.0);
        let mut balls = BallSet::new(Ball::cue(Vec2::new(150.0, 150.0), 15.0));
        balls.spawn(object(1, Vec2::new(360.0, 300.0), Vec2::new(10.0, 0.0)));
        balls.spawn(object(2, Vec2::new(600.0, 450.0), Vec2::ZERO));
        let mut events = Vec::new();
        step_into(&mut balls, &[pocket], &table, &PhysicsConfig::default(), &mut events);

        assert_eq!(events, vec![CollisionEvent::Pocketed { ball: BallId(1), pocket: 0 }]);
        assert_eq!(balls.object_count(), 1);
        assert!(balls.get(BallId(1)).is_none());
    }

    #[test]
    fn overlapping_pockets_capture_once() {
        let table = table();
        let pockets = [
            Pocket::new(Vec2::new(400.0, 300.0), 20.0),
            Pocket::new(Vec2::new(405.0, 300.0), 20.0),
        ];
        let mut balls = BallSet::new(Ball::cue(Vec2::new(150.0, 150.0), 15.0));
        balls.spawn(object(1, Vec2::new(395.0, 300.0), Vec2::new(1.0, 0.0)));
        let mut events = Vec::new();
        step_into(&mut balls, &pockets, &table, &PhysicsConfig::default(), &mut events);
        assert_eq!(events, vec![CollisionEvent::Pocketed { ball: BallId(1), pocket: 0 }]);
        assert_eq!(balls.object_count(), 0);
    }

    #[test]
    fn cue_scratch_returns_to_restart_point() {
        let table = table();
        let pocket = Pocket::new(Vec2::new(400.0, 300.0), 20.0);
        let mut cue = Ball::cue(Vec2::new(370.0, 300.0), 15.0);
        cue.vel = Vec2::new(10.0, 0.0);
        let mut balls = BallSet::new(cue);
        balls.spawn(object(1, Vec2::new(600.0, 450.0), Vec2::ZERO));
        let mut events = Vec::new();
        step_into(&mut balls, &[pocket], &table, &PhysicsConfig::default(), &mut events);

        assert_eq!(events, vec![CollisionEvent::CueScratched { pocket: 0 }]);
        assert_eq!(balls.cue().pos, table.cue_restart());
        assert_eq!(balls.cue().vel, Vec2::ZERO);
        assert_eq!(balls.object_count(), 1);
    }

    #[test]
    fn pocketed_ball_takes_no_further_part_in_the_sweep() {
        let table = table();
        let pocket = Pocket::new(Vec2::new(400.0, 300.0), 20.0);
        let mut balls = BallSet::new(Ball::cue(Vec2::new(150.0, 150.0), 15.0));
        // Ball 1 drops in; ball 2 would have touched it at its old spot.
        balls.spawn(object(1, Vec2::new(390.0, 300.0), Vec2::new(1.0, 0.0)));
        balls.spawn(object(2, Vec2::new(422.0, 300.0), Vec2::new(-3.0, 0.0)));
        let mut events = Vec::new();
        step_into(&mut balls, &[pocket], &table, &PhysicsConfig::default(), &mut events);

        assert!(events.contains(&CollisionEvent::Pocketed { ball: BallId(1), pocket: 0 }));
        assert!(!events.iter().any(|e| matches!(e, CollisionEvent::Hit { .. })));
    }
}
