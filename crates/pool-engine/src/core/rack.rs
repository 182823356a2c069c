use crate::api::types::BallId;
use crate::core::body::Ball;

/// Flat ball storage with the cue ball pinned at slot 0.
/// Designed for a handful of balls; lookups are linear scans.
///
/// Removal is deferred: a sweep marks balls with [`BallSet::mark_pocketed`]
/// and [`BallSet::remove_pocketed`] drops them once the sweep is done, so
/// slot indices stay stable while the sweep iterates.
#[derive(Debug, Clone)]
pub struct BallSet {
    balls: Vec<Ball>,
    pocketed: Vec<BallId>,
}

impl BallSet {
    /// Create a set holding only the cue ball.
    pub fn new(cue: Ball) -> Self {
        let mut balls = Vec::with_capacity(16);
        balls.push(cue);
        Self {
            balls,
            pocketed: Vec::new(),
        }
    }

    /// Add an object ball.
    pub fn spawn(&mut self, ball: Ball) {
        debug_assert!(!ball.is_cue(), "only one cue ball per set");
        self.balls.push(ball);
    }

    pub fn cue(&self) -> &Ball {
        &self.balls[0]
    }

    pub fn cue_mut(&mut self) -> &mut Ball {
        &mut self.balls[0]
    }

    /// Get a ball by id.
    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Get a ball by slot index (0 = cue ball).
    pub fn slot(&self, idx: usize) -> &Ball {
        &self.balls[idx]
    }

    pub fn slot_mut(&mut self, idx: usize) -> &mut Ball {
        &mut self.balls[idx]
    }

    /// Mutable access to two distinct slots at once.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Ball, &mut Ball) {
        assert_ne!(a, b, "pair_mut needs two distinct slots");
        if a < b {
            let (lo, hi) = self.balls.split_at_mut(b);
            (&mut lo[a], &mut hi[0])
        } else {
            let (lo, hi) = self.balls.split_at_mut(a);
            (&mut hi[0], &mut lo[b])
        }
    }

    /// Number of slots, cue ball included.
    pub fn slot_count(&self) -> usize {
        self.balls.len()
    }

    /// Iterate over every ball, cue ball first.
    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    /// Number of object balls still in play (pocketed-but-unswept included).
    pub fn object_count(&self) -> usize {
        self.balls.len() - 1
    }

    /// Whether `id` was marked during the current sweep.
    pub fn is_pocketed(&self, id: BallId) -> bool {
        self.pocketed.contains(&id)
    }

    /// Mark an object ball for removal. Returns false if it was already marked
    /// or is the cue ball.
    pub fn mark_pocketed(&mut self, id: BallId) -> bool {
        if id == BallId::CUE || self.pocketed.contains(&id) {
            return false;
        }
        self.pocketed.push(id);
        true
    }

    /// Drop every marked ball. Returns how many were removed.
    pub fn remove_pocketed(&mut self) -> usize {
        if self.pocketed.is_empty() {
            return 0;
        }
        let before = self.balls.len();
        let pocketed = std::mem::take(&mut self.pocketed);
        self.balls.retain(|b| b.is_cue() || !pocketed.contains(&b.id));
        before - self.balls.len()
    }

    /// Whether any ball satisfies the moving predicate.
    pub fn any_moving(&self) -> bool {
        self.balls.iter().any(|b| b.is_moving())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::{BallColor, BallKind};
    use glam::Vec2;

    fn object(id: u32, x: f32) -> Ball {
        Ball::new(BallId(id), BallKind::Object, Vec2::new(x, 100.0), 15.0, BallColor::WHITE)
    }

    fn set_with(n: u32) -> BallSet {
        let mut set = BallSet::new(Ball::cue(Vec2::new(0.0, 0.0), 15.0));
        for i in 1..=n {
            set.spawn(object(i, i as f32 * 40.0));
        }
        set
    }

    #[test]
    fn cue_is_slot_zero() {
        let set = set_with(3);
        assert!(set.cue().is_cue());
        assert_eq!(set.slot_count(), 4);
        assert_eq!(set.object_count(), 3);
        assert_eq!(set.get(BallId(2)).unwrap().pos.x, 80.0);
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut set = set_with(3);
        let (a, b) = set.pair_mut(3, 1);
        assert_eq!(a.id, BallId(3));
        assert_eq!(b.id, BallId(1));
        a.vel = Vec2::new(1.0, 0.0);
        b.vel = Vec2::new(-1.0, 0.0);
        assert_eq!(set.get(BallId(3)).unwrap().vel.x, 1.0);
        assert_eq!(set.get(BallId(1)).unwrap().vel.x, -1.0);
    }

    #[test]
    fn deferred_removal_keeps_slots_until_swept() {
        let mut set = set_with(3);
        assert!(set.mark_pocketed(BallId(2)));
        assert!(!set.mark_pocketed(BallId(2)), "double mark must be rejected");
        assert_eq!(set.slot_count(), 4);
        assert!(set.is_pocketed(BallId(2)));

        assert_eq!(set.remove_pocketed(), 1);
        assert_eq!(set.object_count(), 2);
        assert!(set.get(BallId(2)).is_none());
        assert!(!set.is_pocketed(BallId(2)));
    }

    #[test]
    fn cue_cannot_be_marked() {
        let mut set = set_with(1);
        assert!(!set.mark_pocketed(BallId::CUE));
        assert_eq!(set.remove_pocketed(), 0);
        assert_eq!(set.slot_count(), 2);
    }

    #[test]
    fn any_moving_checks_all_balls() {
        let mut set = set_with(2);
        assert!(!set.any_moving());
        set.slot_mut(2).vel = Vec2::new(0.0, 0.5);
        assert!(set.any_moving());
    }
}
