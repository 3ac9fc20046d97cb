//! Presentation helpers driven by engine events.
//!
//! Everything here is a consumer. Observers (`Announcer`, `Celebration`)
//! subscribe to the engine's bus; `ScoreboardView` and `RollAnimation` are
//! computed from engine output. Nothing here holds a `&mut` to game state.
//!
//! Rendering, audio and speech synthesis stay with the host.

pub mod schedule;
pub mod announcer;
pub mod animation;
pub mod celebration;
pub mod scoreboard;

pub use schedule::DelayedQueue;
pub use announcer::{Announcement, AnnouncementKind, Announcer, SIX_BONUS_DELAY_MS};
pub use animation::{
    ease_out_cubic, face_orientation, AnimationFrame, Orientation, RollAnimation, ROLL_DURATION_MS,
};
pub use celebration::{scatter_petals, Celebration, Petal, PETAL_COUNT};
pub use scoreboard::{ScoreRow, ScoreboardView};
