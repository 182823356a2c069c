use pool_engine::api::types::GameEvent;
use pool_engine::bridge::protocol::{
    BallInstance, GuideInstance, PocketInstance, ProtocolLayout, HEADER_EVENT_COUNT,
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_SOUND_COUNT, MAX_POCKETS,
};
use pool_engine::input::queue::dispatch_all;
use pool_engine::{
    audio, FixedTimestep, Frame, GameConfig, InputEvent, InputQueue, Presenter, Session, SoundCue,
};

/// Presenter that packs each frame into flat buffers for JavaScript to read.
///
/// Sounds and events accumulate over one browser frame (possibly several
/// ticks) and are cleared at the start of the next.
pub struct BufferPresenter {
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    balls: Vec<BallInstance>,
    pockets: Vec<PocketInstance>,
    guide: GuideInstance,
    sounds: Vec<u8>,
    events: Vec<GameEvent>,
    /// Status event for the latest render, appended when the frame closes.
    state: Option<GameEvent>,
    frame_counter: u32,
}

impl BufferPresenter {
    pub fn new(layout: ProtocolLayout) -> Self {
        Self {
            balls: Vec::with_capacity(layout.max_balls),
            pockets: Vec::with_capacity(MAX_POCKETS),
            guide: GuideInstance::default(),
            sounds: Vec::with_capacity(layout.max_sounds),
            events: Vec::with_capacity(layout.max_events),
            header: [0.0; HEADER_FLOATS],
            state: None,
            frame_counter: 0,
            layout,
        }
    }

    /// Drop last frame's transient sounds and events.
    pub fn begin_frame(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.state = None;
    }

    /// Append the status event and write the counts into the header.
    pub fn finish_frame(&mut self) {
        if let Some(state) = self.state.take() {
            self.push_event(state);
        }
        self.header[HEADER_SOUND_COUNT] = self.sounds.len() as f32;
        self.header[HEADER_EVENT_COUNT] = self.events.len() as f32;
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() < self.layout.max_events {
            self.events.push(event);
        } else {
            log::debug!("Event buffer full, dropping kind {}", event.kind);
        }
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn balls(&self) -> &[BallInstance] {
        &self.balls
    }

    pub fn pockets(&self) -> &[PocketInstance] {
        &self.pockets
    }

    pub fn guide(&self) -> &GuideInstance {
        &self.guide
    }

    pub fn sounds(&self) -> &[u8] {
        &self.sounds
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl Presenter for BufferPresenter {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.layout.write_frame_header(&mut self.header, frame);
        self.header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;

        self.balls.clear();
        self.balls
            .extend(frame.balls.iter().take(self.layout.max_balls).map(BallInstance::from));

        self.pockets.clear();
        self.pockets
            .extend(frame.pockets.iter().take(MAX_POCKETS).map(PocketInstance::from));

        self.guide = frame
            .guide
            .as_ref()
            .map(GuideInstance::from)
            .unwrap_or_default();

        self.state = Some(GameEvent::state(frame.level, frame.phase.id(), frame.power));
    }

    fn play_sound(&mut self, cue: SoundCue) {
        if self.sounds.len() < self.layout.max_sounds {
            self.sounds.push(cue.id());
        } else {
            log::debug!("Sound buffer full, dropping {}", cue.name());
        }
    }

    fn report_score(&mut self, score: u32) {
        self.push_event(GameEvent::score(score));
    }

    fn report_level_complete(&mut self, level: u32, score: u32) {
        self.push_event(GameEvent::level_complete(level, score));
    }
}

/// Owns the session and drives it from browser frames.
///
/// `lib.rs` keeps one in a `thread_local!` and exports free functions via
/// `#[wasm_bindgen]`.
pub struct GameRunner {
    session: Session,
    input: InputQueue,
    timestep: FixedTimestep,
    presenter: BufferPresenter,
}

impl GameRunner {
    pub fn new(config: GameConfig) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let session = Session::new(config);

        let mut runner = Self {
            session,
            input: InputQueue::new(),
            timestep,
            presenter: BufferPresenter::new(layout),
        };
        runner.presenter.report_score(runner.session.score());
        runner.present();
        runner
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input, run however many fixed ticks `dt` seconds cover,
    /// and pack the result.
    pub fn tick(&mut self, dt: f32) {
        self.presenter.begin_frame();
        if dispatch_all(&mut self.session, &mut self.input, &mut self.presenter) {
            self.timestep.reset();
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.session.tick(&mut self.presenter);
        }
        if steps == 0 {
            // Input may have changed the aim without a tick; redraw anyway.
            self.presenter.render(&self.session.frame());
        }
        self.presenter.finish_frame();
    }

    fn present(&mut self) {
        self.presenter.render(&self.session.frame());
        self.presenter.finish_frame();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn presenter(&self) -> &BufferPresenter {
        &self.presenter
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.presenter.header.as_ptr()
    }

    pub fn balls_ptr(&self) -> *const f32 {
        self.presenter.balls.as_ptr() as *const f32
    }

    pub fn ball_count(&self) -> u32 {
        self.presenter.balls.len() as u32
    }

    pub fn pockets_ptr(&self) -> *const f32 {
        self.presenter.pockets.as_ptr() as *const f32
    }

    pub fn pocket_count(&self) -> u32 {
        self.presenter.pockets.len() as u32
    }

    pub fn guide_ptr(&self) -> *const f32 {
        &self.presenter.guide as *const GuideInstance as *const f32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.presenter.sounds.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.presenter.sounds.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.presenter.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.presenter.events.len() as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.session.table().viewport.x
    }

    pub fn viewport_height(&self) -> f32 {
        self.session.table().viewport.y
    }

    pub fn sound_profiles_json(&self) -> String {
        audio::profiles_json()
    }

    // ---- Capacity accessors ----

    pub fn max_balls(&self) -> u32 {
        self.presenter.layout.max_balls as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.presenter.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.presenter.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.presenter.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_engine::bridge::protocol::{HEADER_BALL_COUNT, HEADER_GUIDE_VISIBLE, HEADER_PHASE};
    use pool_engine::input::queue::custom;

    const FRAME: f32 = 1.0 / 60.0;

    fn runner() -> GameRunner {
        GameRunner::new(GameConfig::default())
    }

    #[test]
    fn new_runner_has_a_packed_frame() {
        let r = runner();
        assert_eq!(r.ball_count(), 2);
        assert_eq!(r.pocket_count(), 6);
        assert_eq!(r.presenter().header()[HEADER_BALL_COUNT], 2.0);
        assert_eq!(r.presenter().balls()[0].is_cue, 1.0);
        let kinds: Vec<f32> = r.presenter().events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![GameEvent::KIND_SCORE, GameEvent::KIND_STATE]);
    }

    #[test]
    fn state_event_is_written_once_per_frame() {
        let mut r = runner();
        r.tick(FRAME * 3.0);
        let states = r
            .presenter()
            .events()
            .iter()
            .filter(|e| e.kind == GameEvent::KIND_STATE)
            .count();
        assert_eq!(states, 1);
    }

    #[test]
    fn pointer_drag_produces_sounds_and_a_moving_cue() {
        let mut r = runner();
        let cue = r.session().balls().cue().pos;

        r.push_input(InputEvent::PointerDown { x: cue.x + 50.0, y: cue.y });
        r.tick(FRAME);
        assert_eq!(r.presenter().header()[HEADER_PHASE], 1.0);
        assert_eq!(r.presenter().header()[HEADER_GUIDE_VISIBLE], 1.0);
        assert!(r.presenter().guide().line[2] > cue.x);

        r.push_input(InputEvent::PointerMove { x: cue.x - 80.0, y: cue.y });
        r.tick(FRAME);
        assert_eq!(r.presenter().sounds(), &[SoundCue::CuePull.id()]);

        for _ in 0..20 {
            r.tick(FRAME);
        }
        r.push_input(InputEvent::PointerUp { x: 0.0, y: 0.0 });
        r.tick(FRAME);
        assert!(r.presenter().sounds().contains(&SoundCue::CueRelease.id()));
        assert!(r.session().balls().cue().is_moving());
        assert_eq!(r.presenter().header()[HEADER_GUIDE_VISIBLE], 0.0);
    }

    #[test]
    fn input_is_drawn_even_without_a_tick() {
        let mut r = runner();
        r.push_input(InputEvent::ShootPress);
        r.tick(0.0);
        assert_eq!(r.presenter().header()[HEADER_PHASE], 1.0);
    }

    #[test]
    fn custom_events_reach_the_session() {
        let mut r = runner();
        r.push_input(InputEvent::Custom {
            kind: custom::SELECT_LEVEL,
            a: 9.0,
            b: 0.0,
            c: 0.0,
        });
        r.tick(FRAME);
        assert_eq!(r.session().level(), 9);
        let state = r
            .presenter()
            .events()
            .iter()
            .find(|e| e.kind == GameEvent::KIND_STATE)
            .copied()
            .unwrap();
        assert_eq!(state.a, 9.0);
    }

    #[test]
    fn reloading_the_table_drops_the_partial_tick() {
        let mut r = runner();
        r.tick(FRAME * 0.6);
        r.push_input(InputEvent::Custom {
            kind: custom::RESTART,
            a: 0.0,
            b: 0.0,
            c: 0.0,
        });
        r.push_input(InputEvent::ShootPress);
        r.tick(FRAME * 0.6);
        // No tick ran, so the power ramp has not moved.
        assert_eq!(r.session().aim().power, 0.0);

        r.tick(FRAME * 0.6);
        assert_eq!(r.session().aim().power, 2.0);
    }

    #[test]
    fn partial_ticks_carry_over_without_a_reload() {
        let mut r = runner();
        r.tick(FRAME * 0.6);
        r.push_input(InputEvent::ShootPress);
        r.tick(FRAME * 0.6);
        assert_eq!(r.session().aim().power, 2.0);
    }

    #[test]
    fn sound_buffer_respects_capacity() {
        let mut config = GameConfig::default();
        config.max_sounds = 1;
        let mut r = GameRunner::new(config);
        let cue = r.session().balls().cue().pos;
        r.push_input(InputEvent::PointerDown { x: cue.x + 50.0, y: cue.y });
        r.push_input(InputEvent::PointerMove { x: cue.x - 80.0, y: cue.y });
        r.push_input(InputEvent::PointerUp { x: 0.0, y: 0.0 });
        r.tick(FRAME);
        assert_eq!(r.sound_events_len(), 1);
    }

    #[test]
    fn capacities_follow_config() {
        let r = runner();
        assert_eq!(r.max_balls(), 16);
        assert_eq!(r.max_sounds(), 32);
        assert_eq!(r.max_events(), 32);
        assert_eq!(r.viewport_width(), 800.0);
        assert!(r.sound_profiles_json().contains("cueRelease"));
    }
}
