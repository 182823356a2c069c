//! Static synthesis profiles for each sound cue.
//!
//! The engine never touches an audio device. The bridge forwards cue ids and
//! the JavaScript side looks up the matching profile (exported as JSON) to
//! drive a one-shot oscillator.

use serde::Serialize;

use crate::api::types::SoundCue;

/// Oscillator waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A one-shot tone: start at `frequency`, ramp exponentially to
/// `frequency * end_ratio` and from `gain` to `end_gain` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundProfile {
    pub name: &'static str,
    pub frequency: f32,
    pub duration: f32,
    pub waveform: Waveform,
    pub gain: f32,
    pub end_gain: f32,
    pub end_ratio: f32,
}

const fn tone(name: &'static str, frequency: f32, duration: f32) -> SoundProfile {
    SoundProfile {
        name,
        frequency,
        duration,
        waveform: Waveform::Sine,
        gain: 0.3,
        end_gain: 0.01,
        end_ratio: 0.5,
    }
}

/// Profiles indexed in [`SoundCue::ALL`] order.
pub const PROFILES: [SoundProfile; 5] = [
    tone("hit", 800.0, 0.1),
    tone("pocket", 400.0, 0.2),
    tone("levelComplete", 600.0, 0.3),
    tone("cuePull", 200.0, 0.1),
    tone("cueRelease", 1000.0, 0.1),
];

/// Profile for a cue.
pub fn profile(cue: SoundCue) -> &'static SoundProfile {
    match cue {
        SoundCue::Hit => &PROFILES[0],
        SoundCue::Pocket => &PROFILES[1],
        SoundCue::LevelComplete => &PROFILES[2],
        SoundCue::CuePull => &PROFILES[3],
        SoundCue::CueRelease => &PROFILES[4],
    }
}

/// The profile table as JSON, keyed by cue id, for the JavaScript sound manager.
pub fn profiles_json() -> String {
    let entries: Vec<(u8, &SoundProfile)> =
        SoundCue::ALL.iter().map(|&cue| (cue.id(), profile(cue))).collect();
    serde_json::to_string(&entries).unwrap_or_else(|err| {
        log::warn!("Failed to serialize sound profiles: {}", err);
        String::from("[]")
    })
}
