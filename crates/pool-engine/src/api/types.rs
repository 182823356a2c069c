use bytemuck::{Pod, Zeroable};

/// Unique identifier for a ball within a session.
/// Identity survives repositioning; a pocketed object ball's id is never reused
/// within the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BallId(pub u32);

impl BallId {
    /// The cue ball always carries this id.
    pub const CUE: BallId = BallId(0);
}

/// An audio cue emitted by the simulation.
/// The numeric value is what the bridge writes into the sound buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SoundCue {
    Hit = 1,
    Pocket = 2,
    LevelComplete = 3,
    CuePull = 4,
    CueRelease = 5,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Hit,
        SoundCue::Pocket,
        SoundCue::LevelComplete,
        SoundCue::CuePull,
        SoundCue::CueRelease,
    ];

    /// Name used by the JavaScript sound manager.
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Hit => "hit",
            SoundCue::Pocket => "pocket",
            SoundCue::LevelComplete => "levelComplete",
            SoundCue::CuePull => "cuePull",
            SoundCue::CueRelease => "cueRelease",
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// A game event communicated from Rust to JavaScript via the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Score changed. `a` = total score.
    pub const KIND_SCORE: f32 = 1.0;
    /// Table cleared. `a` = new level number, `b` = score.
    pub const KIND_LEVEL_COMPLETE: f32 = 2.0;
    /// Per-frame status. `a` = level, `b` = phase id, `c` = power.
    pub const KIND_STATE: f32 = 3.0;

    pub fn score(score: u32) -> Self {
        Self {
            kind: Self::KIND_SCORE,
            a: score as f32,
            ..Default::default()
        }
    }

    pub fn level_complete(level: u32, score: u32) -> Self {
        Self {
            kind: Self::KIND_LEVEL_COMPLETE,
            a: level as f32,
            b: score as f32,
            c: 0.0,
        }
    }

    pub fn state(level: u32, phase_id: u8, power: f32) -> Self {
        Self {
            kind: Self::KIND_STATE,
            a: level as f32,
            b: phase_id as f32,
            c: power,
        }
    }
}
