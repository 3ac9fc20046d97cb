//! Turn rotation, win detection and roll resolution.
//!
//! These are plain functions over `GameState` so they can be tested and
//! benchmarked without an engine, bus or die source.

use serde::{Deserialize, Serialize};

use crate::core::{DieFace, GameConfig, GameState, Phase, PlayerId, RollRecord};

/// What a resolved roll did to the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnResult {
    /// Below target; the turn passed to `next`.
    Advanced { next: PlayerId },
    /// The roller reached the target and won.
    Won,
}

/// Result of one roll resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Seat that rolled.
    pub player: PlayerId,
    /// Face rolled.
    pub face: DieFace,
    /// Roller's score after adding the face.
    pub score: u32,
    /// Turn consequence.
    pub result: TurnResult,
}

impl RollOutcome {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.result == TurnResult::Won
    }
}

/// Round-robin successor.
#[must_use]
pub fn next_player(current: PlayerId, player_count: usize) -> PlayerId {
    current.next(player_count)
}

/// Reaching the target exactly counts.
#[must_use]
pub fn has_reached_target(score: u32, target: u32) -> bool {
    score >= target
}

/// Apply one face for the current player.
///
/// Updates the last roll, the roller's score and the history, then either
/// declares the roller the winner (turn does not advance) or passes the turn.
/// Rolls are strictly sequential, so the first seat to cross the target wins
/// outright; there is no tie to break.
///
/// The caller guarantees `state.phase == Phase::Playing`.
pub fn resolve_roll(state: &mut GameState, config: &GameConfig, face: DieFace) -> RollOutcome {
    debug_assert_eq!(state.phase, Phase::Playing);

    let player = state.current_player;
    let score = state.score(player).saturating_add(u32::from(face.value()));

    state.last_roll = Some(face);
    state.scores[player] = score;
    state.history.push(RollRecord {
        player,
        name: config.display_name(player),
        value: face,
    });
    state.rolls_resolved += 1;

    let result = if has_reached_target(score, config.target_score) {
        state.winner = Some(player);
        state.phase = Phase::Won;
        TurnResult::Won
    } else {
        let next = next_player(player, state.player_count());
        state.current_player = next;
        TurnResult::Advanced { next }
    };

    RollOutcome {
        player,
        face,
        score,
        result,
    }
}
