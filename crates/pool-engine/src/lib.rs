pub mod api;
pub mod audio;
pub mod bridge;
pub mod core;
pub mod input;
pub mod levels;

// Re-export key types at crate root for convenience
pub use api::config::{AimConfig, ConfigError, GameConfig, PhysicsConfig};
pub use api::presenter::{Frame, HintRing, Presenter, RecordingPresenter};
pub use api::types::{BallId, GameEvent, SoundCue};
pub use audio::{SoundProfile, Waveform};
pub use bridge::protocol::{BallInstance, GuideInstance, PocketInstance, ProtocolLayout};
pub use core::aim::{AimPhase, AimState, Hint, Rotate};
pub use core::body::{Ball, BallColor, BallKind, Pocket};
pub use core::collision::CollisionEvent;
pub use core::geometry::{AimGuide, Bounds};
pub use core::rack::BallSet;
pub use core::session::Session;
pub use core::table::Table;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use levels::{LevelError, LevelLayout, LevelSetup, PatternLayout};
