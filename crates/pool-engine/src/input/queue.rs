use glam::Vec2;

use crate::api::presenter::Presenter;
use crate::core::session::Session;

/// Custom event kinds sent by the UI layer (menus, dialogs, window resize).
pub mod custom {
    /// Back to level 1 with a zero score.
    pub const RESTART: u32 = 1;
    /// Jump to level `a`.
    pub const SELECT_LEVEL: u32 = 2;
    /// Continue after the level-complete dialog.
    pub const NEXT_LEVEL: u32 = 3;
    /// Viewport changed to `a` x `b`.
    pub const RESIZE: u32 = 99;
}

/// Player and UI input, in game coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse/touch pressed on the table: start aiming at (x, y).
    PointerDown { x: f32, y: f32 },
    /// Mouse/touch released: shoot.
    PointerUp { x: f32, y: f32 },
    /// Pointer moved: re-aim and pull back the stick.
    PointerMove { x: f32, y: f32 },
    /// Touch shoot button pressed: start aiming without a target.
    ShootPress,
    /// Touch shoot button released: shoot.
    ShootRelease,
    /// Rotate buttons: -1 left, +1 right.
    Rotate { direction: f32 },
    /// UI command; see [`custom`] for the kinds.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// Whether this event re-racks the table (restart, level change, resize).
    pub fn reloads_table(&self) -> bool {
        matches!(
            self,
            InputEvent::Custom {
                kind: custom::RESTART | custom::SELECT_LEVEL | custom::NEXT_LEVEL | custom::RESIZE,
                ..
            }
        )
    }
}

/// Events buffered between ticks and applied in arrival order.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one input event to the session.
pub fn dispatch(session: &mut Session, event: InputEvent, presenter: &mut dyn Presenter) {
    match event {
        InputEvent::PointerDown { x, y } => {
            session.start_aim(Some(Vec2::new(x, y)));
        }
        InputEvent::PointerMove { x, y } => session.update_aim_target(Vec2::new(x, y), presenter),
        InputEvent::PointerUp { .. } | InputEvent::ShootRelease => {
            session.release_shot(presenter);
        }
        InputEvent::ShootPress => {
            session.start_aim(None);
        }
        InputEvent::Rotate { direction } => {
            session.rotate_aim(direction);
        }
        InputEvent::Custom { kind, a, b, .. } => match kind {
            custom::RESTART => session.restart_game(presenter),
            custom::SELECT_LEVEL => {
                if let Err(err) = session.select_level(a as i64) {
                    log::warn!("Level selection rejected: {}", err);
                }
            }
            custom::NEXT_LEVEL => session.next_level(),
            custom::RESIZE => session.resize(a, b),
            other => log::warn!("Unknown custom event kind {}", other),
        },
    }
}

/// Drain `queue` into the session. Returns true if any event re-racked the table.
pub fn dispatch_all(
    session: &mut Session,
    queue: &mut InputQueue,
    presenter: &mut dyn Presenter,
) -> bool {
    let mut reloaded = false;
    for event in queue.drain() {
        reloaded |= event.reloads_table();
        dispatch(session, event, presenter);
    }
    reloaded
}
