//! Core types: players, die sources, configuration, state, snapshots.
//!
//! Nothing here decides anything. The rules in `crate::rules` read and
//! write these types.

pub mod player;
pub mod rng;
pub mod config;
pub mod state;
pub mod snapshot;

pub use player::{PlayerId, PlayerMap};
pub use rng::{DieError, DieFace, DieSource, GameRng, GameRngState, ScriptedDice, DIE_FACES};
pub use config::{
    GameConfig, DEFAULT_PLAYERS, DEFAULT_TARGET, MAX_PLAYERS, MIN_PLAYERS, RECOMMENDED_TARGETS,
};
pub use state::{GameState, Phase, RollHistory, RollRecord, ROLL_HISTORY_LIMIT};
pub use snapshot::{Snapshot, SnapshotError};
