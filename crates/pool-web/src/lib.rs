//! Browser bridge: `#[wasm_bindgen]` exports around a single [`GameRunner`].
//!
//! JavaScript calls `game_init` once, then `game_tick(dt)` every animation
//! frame, forwarding pointer and button input in between. After each tick it
//! reads the header, ball, pocket, guide, sound and event buffers through the
//! pointer accessors below.

use std::cell::RefCell;

use pool_engine::{GameConfig, InputEvent};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::{BufferPresenter, GameRunner};

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

fn install(config: GameConfig) {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("console_log: {}", err)));
    }

    let config = match config.validate() {
        Ok(()) => config,
        Err(err) => {
            log::warn!("Invalid game config ({}), using defaults", err);
            GameConfig::default()
        }
    };
    let (width, height) = (config.viewport_width, config.viewport_height);
    let runner = GameRunner::new(config);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("pool: initialized at {}x{}", width, height);
}

/// Start a session for a `width` x `height` viewport with default tuning.
#[wasm_bindgen]
pub fn game_init(width: f32, height: f32) {
    install(GameConfig {
        viewport_width: width,
        viewport_height: height,
        ..GameConfig::default()
    });
}

/// Start a session from a JSON config. Malformed JSON falls back to defaults.
#[wasm_bindgen]
pub fn game_init_with_config(json: &str) {
    install(GameConfig::from_json_or_default(json));
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

/// Touch shoot button pressed.
#[wasm_bindgen]
pub fn game_shoot_press() {
    with_runner(|r| r.push_input(InputEvent::ShootPress));
}

/// Touch shoot button released.
#[wasm_bindgen]
pub fn game_shoot_release() {
    with_runner(|r| r.push_input(InputEvent::ShootRelease));
}

/// Rotate buttons: -1 left, +1 right.
#[wasm_bindgen]
pub fn game_rotate(direction: f32) {
    with_runner(|r| r.push_input(InputEvent::Rotate { direction }));
}

/// Menu and window events; see `pool_engine::input::queue::custom` for kinds.
#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

/// Synthesis parameters per sound id, as JSON.
#[wasm_bindgen]
pub fn get_sound_profiles() -> String {
    with_runner(|r| r.sound_profiles_json())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_balls_ptr() -> *const f32 {
    with_runner(|r| r.balls_ptr())
}

#[wasm_bindgen]
pub fn get_ball_count() -> u32 {
    with_runner(|r| r.ball_count())
}

#[wasm_bindgen]
pub fn get_pockets_ptr() -> *const f32 {
    with_runner(|r| r.pockets_ptr())
}

#[wasm_bindgen]
pub fn get_pocket_count() -> u32 {
    with_runner(|r| r.pocket_count())
}

#[wasm_bindgen]
pub fn get_guide_ptr() -> *const f32 {
    with_runner(|r| r.guide_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sound_events_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}

#[wasm_bindgen]
pub fn get_viewport_width() -> f32 {
    with_runner(|r| r.viewport_width())
}

#[wasm_bindgen]
pub fn get_viewport_height() -> f32 {
    with_runner(|r| r.viewport_height())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_balls() -> u32 {
    with_runner(|r| r.max_balls())
}

#[wasm_bindgen]
pub fn get_max_sounds() -> u32 {
    with_runner(|r| r.max_sounds())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}
