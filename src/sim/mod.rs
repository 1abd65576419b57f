//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One step per frame, timestamps passed in by the caller
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod hints;
pub mod level;
pub mod player;
pub mod rect;
pub mod spawn;

pub use hints::{Control, ControlHints, HINT_LINGER_MS};
pub use level::{FrameInput, Level, LevelEvent, LevelParams, LevelStatus, RunState};
pub use player::Player;
pub use rect::Rect;
pub use spawn::{Item, ItemKind, Obstacle, Spawner};
