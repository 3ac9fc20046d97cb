//! Game state.
//!
//! ## Phase
//!
//! Coarse lifecycle: `Setup -> Playing -> Won -> (reset) -> Setup`.
//!
//! ## GameState
//!
//! Everything that changes during play:
//! - Phase, current player, per-player scores
//! - Last face shown, bounded roll history
//! - Winner, and the in-flight roll that forms the rolling latch
//!
//! Only the Turn Engine holds a `&mut GameState`. Everyone else reads.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use super::rng::DieFace;

/// Entries kept in the roll history.
pub const ROLL_HISTORY_LIMIT: usize = 5;

/// Game lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Choosing players and target. No rolls accepted.
    #[default]
    Setup,
    /// Rolls accepted.
    Playing,
    /// Someone reached the target. Terminal until reset.
    Won,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Playing => "playing",
            Phase::Won => "won",
        };
        f.write_str(name)
    }
}

/// One resolved roll, as shown in the history list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    /// Seat that rolled.
    pub player: PlayerId,
    /// Name of that seat when it rolled.
    pub name: String,
    /// Face rolled.
    pub value: DieFace,
}

/// Most-recent-first log of the last [`ROLL_HISTORY_LIMIT`] rolls.
///
/// Display only. Nothing in scoring or win detection reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollHistory {
    entries: Vector<RollRecord>,
}

impl RollHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a roll at the front, evicting the oldest past the limit.
    pub fn push(&mut self, record: RollRecord) {
        self.entries.push_front(record);
        if self.entries.len() > ROLL_HISTORY_LIMIT {
            self.entries.truncate(ROLL_HISTORY_LIMIT);
        }
    }

    /// The most recent roll.
    #[must_use]
    pub fn latest(&self) -> Option<&RollRecord> {
        self.entries.front()
    }

    /// Entry by position, 0 being the most recent.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RollRecord> {
        self.entries.get(index)
    }

    /// Iterate most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &RollRecord> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable play state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Lifecycle phase.
    pub phase: Phase,

    /// Seat whose turn it is.
    pub current_player: PlayerId,

    /// Running total per seat.
    pub scores: PlayerMap<u32>,

    /// Last rolls, most recent first.
    pub history: RollHistory,

    /// Face shown after the last resolved roll.
    pub last_roll: Option<DieFace>,

    /// Set exactly once, when a score first reaches the target.
    pub winner: Option<PlayerId>,

    /// Face drawn but not yet committed. `Some` while the latch is held.
    pub in_flight: Option<DieFace>,

    /// Rolls resolved since `start()`.
    pub rolls_resolved: u32,
}

impl GameState {
    /// Clean state on the setup screen.
    #[must_use]
    pub fn setup(player_count: usize) -> Self {
        Self {
            phase: Phase::Setup,
            current_player: PlayerId::new(0),
            scores: PlayerMap::for_seats(player_count),
            history: RollHistory::new(),
            last_roll: None,
            winner: None,
            in_flight: None,
            rolls_resolved: 0,
        }
    }

    /// Fresh game: zeroed scores, player 0 to roll.
    #[must_use]
    pub fn playing(player_count: usize) -> Self {
        Self {
            phase: Phase::Playing,
            ..Self::setup(player_count)
        }
    }

    /// The rolling latch.
    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a new roll may begin.
    #[must_use]
    pub fn accepts_roll(&self) -> bool {
        self.phase == Phase::Playing && !self.is_rolling()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.scores.seat_count()
    }

    /// Sum of all scores. Equals the sum of every resolved face.
    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.scores.values().map(|&s| u64::from(s)).sum()
    }

    /// Score of one seat, 0 for an unknown seat.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }
}
