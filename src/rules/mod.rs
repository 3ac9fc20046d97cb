//! Game rules: who rolls next, who wins, and the engine that applies them.
//!
//! `policy` holds the pure resolution step. `engine` wraps it with the
//! lifecycle (configure, start, roll, reset), the rolling latch, the die
//! source and event publication.

pub mod policy;
pub mod engine;

pub use policy::{has_reached_target, next_player, resolve_roll, RollOutcome, TurnResult};
pub use engine::{EngineError, TurnEngine};
