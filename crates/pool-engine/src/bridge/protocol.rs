/// Flat f32 buffers shared with the JavaScript renderer.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Layout (all values f32):
/// ```text
/// [Header:  24 floats]
/// [Balls:   max_balls × 8 floats]
/// [Pockets: 6 × 4 floats]
/// [Guide:   16 floats]
/// [Sounds:  max_sounds × 1 float]
/// [Events:  max_events × 4 floats]
/// ```
///
/// Capacities are written into the header on every frame; TypeScript reads
/// them to compute offsets.

use bytemuck::{Pod, Zeroable};

use crate::api::config::GameConfig;
use crate::api::presenter::Frame;
use crate::core::body::{Ball, Pocket};
use crate::core::geometry::AimGuide;

pub const HEADER_FLOATS: usize = 24;

pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_VIEWPORT_WIDTH: usize = 2;
pub const HEADER_VIEWPORT_HEIGHT: usize = 3;
pub const HEADER_TABLE_LEFT: usize = 4;
pub const HEADER_TABLE_TOP: usize = 5;
pub const HEADER_TABLE_WIDTH: usize = 6;
pub const HEADER_TABLE_HEIGHT: usize = 7;
pub const HEADER_MAX_BALLS: usize = 8;
pub const HEADER_BALL_COUNT: usize = 9;
pub const HEADER_MAX_POCKETS: usize = 10;
pub const HEADER_POCKET_COUNT: usize = 11;
pub const HEADER_GUIDE_VISIBLE: usize = 12;
pub const HEADER_HINT_VISIBLE: usize = 13;
pub const HEADER_HINT_X: usize = 14;
pub const HEADER_HINT_Y: usize = 15;
pub const HEADER_HINT_RADIUS: usize = 16;
pub const HEADER_MAX_SOUNDS: usize = 17;
pub const HEADER_SOUND_COUNT: usize = 18;
pub const HEADER_MAX_EVENTS: usize = 19;
pub const HEADER_EVENT_COUNT: usize = 20;
pub const HEADER_PHASE: usize = 21;
pub const HEADER_POWER: usize = 22;
pub const HEADER_PULL: usize = 23;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Pockets per table.
pub const MAX_POCKETS: usize = 6;

/// Floats per ball: x, y, radius, r, g, b, is_cue, id.
pub const BALL_FLOATS: usize = 8;

/// Floats per pocket: x, y, radius, pad.
pub const POCKET_FLOATS: usize = 4;

/// Floats in the guide record.
pub const GUIDE_FLOATS: usize = 16;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// One ball as the renderer sees it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub is_cue: f32,
    pub id: f32,
}

impl From<&Ball> for BallInstance {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            radius: ball.radius,
            r: ball.color.r,
            g: ball.color.g,
            b: ball.color.b,
            is_cue: if ball.is_cue() { 1.0 } else { 0.0 },
            id: ball.id.0 as f32,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct PocketInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub _pad: f32,
}

impl From<&Pocket> for PocketInstance {
    fn from(pocket: &Pocket) -> Self {
        Self {
            x: pocket.pos.x,
            y: pocket.pos.y,
            radius: pocket.radius,
            _pad: 0.0,
        }
    }
}

/// Aim line, optional reflection and cue stick as line segments.
/// `has_reflection` is 0.0 when the aim line never reached the boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct GuideInstance {
    pub line: [f32; 4],
    pub reflection: [f32; 4],
    pub stick: [f32; 4],
    pub has_reflection: f32,
    pub _pad: [f32; 3],
}

impl From<&AimGuide> for GuideInstance {
    fn from(guide: &AimGuide) -> Self {
        let (reflection, has_reflection) = match guide.reflection {
            Some((a, b)) => ([a.x, a.y, b.x, b.y], 1.0),
            None => ([0.0; 4], 0.0),
        };
        Self {
            line: [
                guide.line_start.x,
                guide.line_start.y,
                guide.line_end.x,
                guide.line_end.y,
            ],
            reflection,
            stick: [
                guide.stick_tip.x,
                guide.stick_tip.y,
                guide.stick_butt.x,
                guide.stick_butt.y,
            ],
            has_reflection,
            _pad: [0.0; 3],
        }
    }
}

/// Section sizes and offsets for a given set of capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_balls: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    pub ball_data_floats: usize,
    pub pocket_data_floats: usize,
    pub sound_data_floats: usize,
    pub event_data_floats: usize,

    pub ball_data_offset: usize,
    pub pocket_data_offset: usize,
    pub guide_data_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_balls: usize, max_sounds: usize, max_events: usize) -> Self {
        let ball_data_floats = max_balls * BALL_FLOATS;
        let pocket_data_floats = MAX_POCKETS * POCKET_FLOATS;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let ball_data_offset = HEADER_FLOATS;
        let pocket_data_offset = ball_data_offset + ball_data_floats;
        let guide_data_offset = pocket_data_offset + pocket_data_floats;
        let sound_data_offset = guide_data_offset + GUIDE_FLOATS;
        let event_data_offset = sound_data_offset + sound_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_balls,
            max_sounds,
            max_events,
            ball_data_floats,
            pocket_data_floats,
            sound_data_floats,
            event_data_floats,
            ball_data_offset,
            pocket_data_offset,
            guide_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_balls, config.max_sounds, config.max_events)
    }

    /// Fill the frame-dependent header fields. Counts of sounds and events
    /// are written by whoever owns those buffers.
    pub fn write_frame_header(&self, header: &mut [f32; HEADER_FLOATS], frame: &Frame<'_>) {
        let table = frame.table;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_VIEWPORT_WIDTH] = table.viewport.x;
        header[HEADER_VIEWPORT_HEIGHT] = table.viewport.y;
        header[HEADER_TABLE_LEFT] = table.rect.left;
        header[HEADER_TABLE_TOP] = table.rect.top;
        header[HEADER_TABLE_WIDTH] = table.rect.width();
        header[HEADER_TABLE_HEIGHT] = table.rect.height();
        header[HEADER_MAX_BALLS] = self.max_balls as f32;
        header[HEADER_BALL_COUNT] = frame.balls.slot_count().min(self.max_balls) as f32;
        header[HEADER_MAX_POCKETS] = MAX_POCKETS as f32;
        header[HEADER_POCKET_COUNT] = frame.pockets.len().min(MAX_POCKETS) as f32;
        header[HEADER_GUIDE_VISIBLE] = if frame.guide.is_some() { 1.0 } else { 0.0 };
        match frame.hint {
            Some(hint) => {
                header[HEADER_HINT_VISIBLE] = 1.0;
                header[HEADER_HINT_X] = hint.center.x;
                header[HEADER_HINT_Y] = hint.center.y;
                header[HEADER_HINT_RADIUS] = hint.radius;
            }
            None => {
                header[HEADER_HINT_VISIBLE] = 0.0;
                header[HEADER_HINT_RADIUS] = 0.0;
            }
        }
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_PHASE] = frame.phase.id() as f32;
        header[HEADER_POWER] = frame.power;
        header[HEADER_PULL] = frame.pull;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameEvent;
    use crate::core::aim::AimPhase;
    use crate::core::session::Session;

    #[test]
    fn wire_structs_match_float_counts() {
        assert_eq!(std::mem::size_of::<BallInstance>(), BALL_FLOATS * 4);
        assert_eq!(std::mem::size_of::<PocketInstance>(), POCKET_FLOATS * 4);
        assert_eq!(std::mem::size_of::<GuideInstance>(), GUIDE_FLOATS * 4);
        assert_eq!(std::mem::size_of::<GameEvent>(), EVENT_FLOATS * 4);
    }

    #[test]
    fn default_layout_offsets() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.ball_data_offset, 24);
        assert_eq!(layout.pocket_data_offset, 24 + 16 * 8);
        assert_eq!(layout.guide_data_offset, 24 + 16 * 8 + 24);
        assert_eq!(layout.sound_data_offset, 24 + 16 * 8 + 24 + 16);
        assert_eq!(layout.event_data_offset, 24 + 16 * 8 + 24 + 16 + 32);
        assert_eq!(layout.buffer_total_floats, 24 + 16 * 8 + 24 + 16 + 32 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn sections_are_contiguous() {
        let layout = ProtocolLayout::new(5, 7, 3);
        assert_eq!(layout.pocket_data_offset, layout.ball_data_offset + layout.ball_data_floats);
        assert_eq!(layout.guide_data_offset, layout.pocket_data_offset + layout.pocket_data_floats);
        assert_eq!(layout.sound_data_offset, layout.guide_data_offset + GUIDE_FLOATS);
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + layout.sound_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn ball_instance_flags_the_cue() {
        let session = Session::new(GameConfig::default());
        let cue = BallInstance::from(session.balls().cue());
        assert_eq!(cue.is_cue, 1.0);
        assert_eq!(cue.id, 0.0);
        assert_eq!((cue.r, cue.g, cue.b), (1.0, 1.0, 1.0));
        let object = BallInstance::from(session.balls().slot(1));
        assert_eq!(object.is_cue, 0.0);
        assert_eq!(object.r, 1.0);
        assert_eq!(object.g, 0.0);
    }

    #[test]
    fn header_reflects_frame() {
        let mut session = Session::new(GameConfig::default());
        let layout = ProtocolLayout::from_config(session.config());
        let mut header = [0.0f32; HEADER_FLOATS];

        layout.write_frame_header(&mut header, &session.frame());
        assert_eq!(header[HEADER_VIEWPORT_WIDTH], 800.0);
        assert_eq!(header[HEADER_TABLE_LEFT], 40.0);
        assert_eq!(header[HEADER_TABLE_HEIGHT], 480.0);
        assert_eq!(header[HEADER_BALL_COUNT], 2.0);
        assert_eq!(header[HEADER_POCKET_COUNT], 6.0);
        assert_eq!(header[HEADER_GUIDE_VISIBLE], 0.0);
        assert_eq!(header[HEADER_HINT_VISIBLE], 1.0);
        assert_eq!(header[HEADER_HINT_RADIUS], 30.0);
        assert_eq!(header[HEADER_PHASE], AimPhase::Idle.id() as f32);

        session.start_aim(None);
        layout.write_frame_header(&mut header, &session.frame());
        assert_eq!(header[HEADER_GUIDE_VISIBLE], 1.0);
        assert_eq!(header[HEADER_HINT_VISIBLE], 0.0);
        assert_eq!(header[HEADER_PHASE], 1.0);
    }

    #[test]
    fn guide_instance_packs_segments() {
        let mut session = Session::new(GameConfig::default());
        session.start_aim(None);
        let guide = session.aim_guide().unwrap();
        let packed = GuideInstance::from(&guide);
        assert_eq!(packed.line[0], guide.line_start.x);
        assert_eq!(packed.stick[2], guide.stick_butt.x);
        // Aiming right from the cue start hits the right edge of the guide frame.
        assert_eq!(packed.has_reflection, 1.0);
    }
}
