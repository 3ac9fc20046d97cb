//! # dice-race
//!
//! Turn engine for a 1-4 player dice race: players take turns rolling one
//! die, each face is added to the roller's score, and the first player to
//! reach the target score wins.
//!
//! ## Design Principles
//!
//! 1. **One mutator**: `TurnEngine` is the only owner of `GameState`.
//!    Everything else reads state or listens to events.
//!
//! 2. **Resolve, then present**: a roll's outcome is decided the moment the
//!    face is drawn. Animation, sound and speech consume events afterwards
//!    and never feed back into the rules.
//!
//! 3. **Deterministic**: dice come from an injected `DieSource`. Seeded
//!    `GameRng` for play, `ScriptedDice` for tests and replays.
//!
//! ## Modules
//!
//! - `core`: Players, die sources, configuration, state, snapshots
//! - `rules`: Turn rotation, win detection and the `TurnEngine`
//! - `events`: Event types and the publish/subscribe bus
//! - `presentation`: Announcements, roll animation, celebration, scoreboard
//!
//! ## Example
//!
//! ```
//! use dice_race::{GameConfig, Phase, TurnEngine};
//!
//! let config = GameConfig::new(3).with_target_score(30);
//! let mut engine = TurnEngine::new(config, 42);
//!
//! engine.start();
//! while engine.phase() == Phase::Playing {
//!     engine.roll_dice().unwrap();
//! }
//!
//! let winner = engine.winner().unwrap();
//! assert!(engine.scores()[winner.index()] >= 30);
//! ```

pub mod core;
pub mod rules;
pub mod events;
pub mod presentation;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    DieFace, DieSource, DieError, GameRng, GameRngState, ScriptedDice,
    GameConfig, MAX_PLAYERS, MIN_PLAYERS, RECOMMENDED_TARGETS,
    GameState, Phase, RollHistory, RollRecord, ROLL_HISTORY_LIMIT,
    Snapshot, SnapshotError,
};

pub use crate::rules::{EngineError, RollOutcome, TurnEngine, TurnResult};

pub use crate::events::{EventBus, EventKind, EventLog, GameEvent, Observer, SubscriptionId};

pub use crate::presentation::{
    Announcement, AnnouncementKind, Announcer, Celebration, RollAnimation, ScoreboardView,
};
