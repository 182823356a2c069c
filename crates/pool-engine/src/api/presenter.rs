use glam::Vec2;

use crate::api::types::SoundCue;
use crate::core::aim::AimPhase;
use crate::core::body::Pocket;
use crate::core::geometry::AimGuide;
use crate::core::rack::BallSet;
use crate::core::table::Table;

/// The pulsing ring around a resting cue ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HintRing {
    pub center: Vec2,
    pub radius: f32,
}

/// Everything needed to draw one frame. Borrowed from the session for the
/// duration of [`Presenter::render`].
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub table: &'a Table,
    pub balls: &'a BallSet,
    pub pockets: &'a [Pocket],
    pub phase: AimPhase,
    pub level: u32,
    pub score: u32,
    /// Power meter, 0..=max_power.
    pub power: f32,
    /// Current stick pull-back.
    pub pull: f32,
    pub aim_angle: f32,
    /// Aim line, reflection and stick. Present only while aiming.
    pub guide: Option<AimGuide>,
    pub hint: Option<HintRing>,
}

/// Callbacks from the simulation core to whatever presents it.
///
/// The core never draws, plays audio or touches UI itself; a session calls
/// these from inside [`Session::tick`](crate::core::session::Session::tick)
/// and the session's commands.
pub trait Presenter {
    /// Draw the current frame.
    fn render(&mut self, frame: &Frame<'_>);

    /// Fire-and-forget sound cue.
    fn play_sound(&mut self, cue: SoundCue);

    fn report_score(&mut self, score: u32);

    fn report_level_complete(&mut self, level: u32, score: u32);
}

/// A non-render callback, in the order it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterCall {
    Sound(SoundCue),
    Score(u32),
    LevelComplete { level: u32, score: u32 },
}

/// Owned summary of the last rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub phase: AimPhase,
    pub level: u32,
    pub score: u32,
    pub power: f32,
    pub ball_count: usize,
    pub pocket_count: usize,
    pub guide: Option<AimGuide>,
    pub hint: Option<HintRing>,
}

/// Presenter that records every callback.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
    pub frames: usize,
    pub last_frame: Option<FrameSummary>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sound cues in emission order.
    pub fn sounds(&self) -> Vec<SoundCue> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresenterCall::Sound(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    pub fn count_sound(&self, cue: SoundCue) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == PresenterCall::Sound(cue))
            .count()
    }

    /// The most recent score report.
    pub fn last_score(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|c| match c {
            PresenterCall::Score(s) => Some(*s),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.frames = 0;
        self.last_frame = None;
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        self.last_frame = Some(FrameSummary {
            phase: frame.phase,
            level: frame.level,
            score: frame.score,
            power: frame.power,
            ball_count: frame.balls.slot_count(),
            pocket_count: frame.pockets.len(),
            guide: frame.guide,
            hint: frame.hint,
        });
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.calls.push(PresenterCall::Sound(cue));
    }

    fn report_score(&mut self, score: u32) {
        self.calls.push(PresenterCall::Score(score));
    }

    fn report_level_complete(&mut self, level: u32, score: u32) {
        self.calls.push(PresenterCall::LevelComplete { level, score });
    }
}
