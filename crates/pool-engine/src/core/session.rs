use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::presenter::{Frame, HintRing, Presenter};
use crate::api::types::SoundCue;
use crate::core::aim::{AimPhase, AimState, Hint, Rotate};
use crate::core::body::{Ball, Pocket};
use crate::core::collision::{self, CollisionEvent};
use crate::core::geometry::{aim_guide, AimGuide};
use crate::core::rack::BallSet;
use crate::core::table::Table;
use crate::levels::{validate_level, LevelError, LevelLayout, PatternLayout};

/// One game of pool: the table, the balls on it, score and level progress.
///
/// Every command validates against the current state and silently does
/// nothing when it does not apply (shooting without an aim, rotating a
/// moving cue ball). Only level selection reports an error.
pub struct Session {
    config: GameConfig,
    layout: Box<dyn LevelLayout>,
    table: Table,
    level: u32,
    score: u32,
    balls: BallSet,
    pockets: Vec<Pocket>,
    aim: AimState,
    hint: Hint,
    level_complete: bool,
    events: Vec<CollisionEvent>,
}

impl Session {
    /// Start at level 1 with the built-in layouts.
    pub fn new(config: GameConfig) -> Self {
        Self::with_layout(config, Box::new(PatternLayout::default()))
    }

    pub fn with_layout(config: GameConfig, layout: Box<dyn LevelLayout>) -> Self {
        let table = Table::from_viewport(
            config.viewport_width,
            config.viewport_height,
            &config.physics,
        );
        let cue = Ball::cue(table.cue_start(), config.physics.ball_radius);
        let mut session = Self {
            level: config.min_level,
            config,
            layout,
            table,
            score: 0,
            balls: BallSet::new(cue),
            pockets: Vec::new(),
            aim: AimState::new(),
            hint: Hint::new(),
            level_complete: false,
            events: Vec::with_capacity(16),
        };
        session.load_level();
        session
    }

    // -- Accessors --

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn balls(&self) -> &BallSet {
        &self.balls
    }

    #[cfg(test)]
    pub(crate) fn balls_mut(&mut self) -> &mut BallSet {
        &mut self.balls
    }

    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    pub fn aim(&self) -> &AimState {
        &self.aim
    }

    pub fn hint(&self) -> &Hint {
        &self.hint
    }

    pub fn is_level_complete(&self) -> bool {
        self.level_complete
    }

    pub fn phase(&self) -> AimPhase {
        self.aim.phase(self.balls.any_moving())
    }

    // -- Level management --

    /// Discard the table contents and rack the current level.
    pub fn load_level(&mut self) {
        let physics = &self.config.physics;
        let setup = self.layout.layout(self.level, &self.table, physics);

        let cue = Ball::cue(setup.cue_start, physics.ball_radius).with_friction(physics.friction);
        let mut balls = BallSet::new(cue);
        for ball in setup.balls {
            balls.spawn(ball);
        }

        self.balls = balls;
        self.pockets = setup.pockets;
        self.aim = AimState::new();
        self.hint = Hint::new();
        self.events.clear();

        log::info!(
            "Loaded level {} ({} balls, {} pockets)",
            self.level,
            self.balls.object_count(),
            self.pockets.len()
        );
    }

    /// Back to level 1 with a zero score.
    pub fn restart_game(&mut self, presenter: &mut dyn Presenter) {
        log::info!("Restarting game");
        self.level = self.config.min_level;
        self.score = 0;
        self.level_complete = false;
        self.load_level();
        presenter.report_score(self.score);
    }

    /// Jump to a level. The score is kept. Out-of-range requests change nothing.
    pub fn select_level(&mut self, requested: i64) -> Result<(), LevelError> {
        let level = validate_level(requested, self.config.min_level, self.config.max_level)?;
        log::info!("Selected level {}", level);
        self.level = level;
        self.level_complete = false;
        self.load_level();
        Ok(())
    }

    /// Rack the level reached by the last completion.
    pub fn next_level(&mut self) {
        self.level_complete = false;
        self.load_level();
    }

    /// Rebuild the table for a new viewport and re-rack the current level.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.table = Table::from_viewport(width, height, &self.config.physics);
        self.level_complete = false;
        self.load_level();
    }

    // -- Player commands --

    /// Begin aiming, optionally pointing at `target` straight away.
    /// Refused while the cue ball is moving.
    pub fn start_aim(&mut self, target: Option<Vec2>) -> bool {
        let cue = self.balls.cue_mut();
        if !self.aim.start(cue) {
            return false;
        }
        self.hint.hide();
        if let Some(target) = target {
            self.aim.aim_at(cue, target);
        }
        true
    }

    /// Track the pointer while aiming.
    pub fn update_aim_target(&mut self, target: Vec2, presenter: &mut dyn Presenter) {
        let cue = self.balls.cue_mut();
        if self.aim.update_target(cue, target, &self.config.aim) {
            presenter.play_sound(SoundCue::CuePull);
        }
    }

    /// Shoot. Does nothing unless an aim is in progress.
    pub fn release_shot(&mut self, presenter: &mut dyn Presenter) -> bool {
        let cue = self.balls.cue_mut();
        let Some(vel) = self.aim.release(cue, &self.config.aim) else {
            return false;
        };
        log::debug!(
            "Shot: power {:.0}, pull {:.0}, velocity ({:.2}, {:.2})",
            self.aim.power,
            self.aim.pull_distance,
            vel.x,
            vel.y
        );
        presenter.play_sound(SoundCue::CueRelease);
        self.hint.schedule(self.config.aim.hint_delay);
        true
    }

    /// Rotate the aim by one step; `direction` is -1 or +1.
    pub fn rotate_aim(&mut self, direction: f32) -> bool {
        match Rotate::from_sign(direction) {
            Some(rotate) => AimState::rotate(self.balls.cue_mut(), rotate, &self.config.aim),
            None => false,
        }
    }

    // -- Simulation --

    /// Advance one fixed step and render.
    pub fn tick(&mut self, presenter: &mut dyn Presenter) {
        let cue_moving = self.balls.cue().is_moving();
        self.hint.advance(self.config.fixed_dt, cue_moving);

        let mut events = std::mem::take(&mut self.events);
        collision::step_into(
            &mut self.balls,
            &self.pockets,
            &self.table,
            &self.config.physics,
            &mut events,
        );
        self.apply_events(&events, presenter);
        events.clear();
        self.events = events;

        self.aim.tick_power(&self.config.aim);
        if self.hint.visible && !self.aim.aiming && !self.balls.cue().is_moving() {
            self.hint.pulse(&self.config.aim);
        }

        let frame = self.frame();
        presenter.render(&frame);
    }

    fn apply_events(&mut self, events: &[CollisionEvent], presenter: &mut dyn Presenter) {
        let mut pocketed_any = false;
        for event in events {
            match *event {
                CollisionEvent::Hit { .. } => presenter.play_sound(SoundCue::Hit),
                CollisionEvent::Pocketed { ball, pocket } => {
                    self.score += self.config.points_per_ball;
                    pocketed_any = true;
                    log::debug!("Ball {} pocketed in pocket {}, score {}", ball.0, pocket, self.score);
                    presenter.play_sound(SoundCue::Pocket);
                    presenter.report_score(self.score);
                }
                CollisionEvent::CueScratched { pocket } => {
                    log::debug!("Cue ball scratched in pocket {}", pocket);
                }
            }
        }

        if pocketed_any && self.balls.object_count() == 0 && !self.level_complete {
            self.level += 1;
            self.level_complete = true;
            log::info!("Level complete, advancing to {} with score {}", self.level, self.score);
            presenter.play_sound(SoundCue::LevelComplete);
            presenter.report_level_complete(self.level, self.score);
        }
    }

    /// Aim line and stick for the current aim, if any.
    pub fn aim_guide(&self) -> Option<AimGuide> {
        if !self.aim.aiming {
            return None;
        }
        let cue = self.balls.cue();
        let pull = if self.aim.pulling { self.aim.pull_distance } else { 0.0 };
        Some(aim_guide(
            cue.pos,
            cue.aim_angle,
            pull,
            &self.table.guide_bounds(),
            &self.config.aim.guide_params(),
        ))
    }

    /// Hint ring, shown while the cue ball waits for the next shot.
    pub fn hint_ring(&self) -> Option<HintRing> {
        let cue = self.balls.cue();
        if !self.hint.visible || self.aim.aiming || cue.is_moving() {
            return None;
        }
        Some(HintRing {
            center: cue.pos,
            radius: self.hint.radius(&self.config.aim),
        })
    }

    /// Borrowed view of the current state for rendering.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            table: &self.table,
            balls: &self.balls,
            pockets: &self.pockets,
            phase: self.phase(),
            level: self.level,
            score: self.score,
            power: self.aim.power,
            pull: self.aim.pull_distance,
            aim_angle: self.balls.cue().aim_angle,
            guide: self.aim_guide(),
            hint: self.hint_ring(),
        }
    }
}
