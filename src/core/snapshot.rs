//! Binary snapshots of a running session.
//!
//! A snapshot is config + state + RNG position. Restoring one continues the
//! exact same roll sequence. Decoding re-checks the state invariants, so a
//! corrupted or hand-edited snapshot is rejected instead of producing an
//! engine that violates them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::GameConfig;
use super::rng::GameRngState;
use super::state::{GameState, Phase, ROLL_HISTORY_LIMIT};

/// Snapshot encode/decode failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec: {0}")]
    Codec(#[from] bincode::Error),
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(&'static str),
}

/// Everything needed to resume a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: GameConfig,
    pub state: GameState,
    pub rng: GameRngState,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode with bincode and check invariants.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let count = self.config.player_count;
        let state = &self.state;

        if self.config != self.config.clone().normalized() {
            return Err(SnapshotError::Inconsistent("config is not normalized"));
        }
        if state.player_count() != count {
            return Err(SnapshotError::Inconsistent("score count differs from player count"));
        }
        if state.current_player.index() >= count {
            return Err(SnapshotError::Inconsistent("current player out of range"));
        }
        if state.winner.is_some() != (state.phase == Phase::Won) {
            return Err(SnapshotError::Inconsistent("winner must be set exactly when won"));
        }
        if let Some(winner) = state.winner {
            if winner.index() >= count || state.score(winner) < self.config.target_score {
                return Err(SnapshotError::Inconsistent("winner has not reached the target"));
            }
        }
        if state.history.len() > ROLL_HISTORY_LIMIT {
            return Err(SnapshotError::Inconsistent("roll history over limit"));
        }
        if state.is_rolling() && state.phase != Phase::Playing {
            return Err(SnapshotError::Inconsistent("roll in flight outside play"));
        }

        let target = self.config.target_score;
        match state.phase {
            Phase::Setup if *state != GameState::setup(count) => {
                Err(SnapshotError::Inconsistent("setup state is not a fresh table"))
            }
            Phase::Playing if state.scores.values().any(|&s| s >= target) => {
                Err(SnapshotError::Inconsistent("score at target while still playing"))
            }
            Phase::Won
                if state
                    .scores
                    .iter()
                    .any(|(p, &s)| Some(p) != state.winner && s >= target) =>
            {
                Err(SnapshotError::Inconsistent("a loser has reached the target"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DieFace, GameRng, PlayerId};

    fn snapshot() -> Snapshot {
        let config = GameConfig::new(2).with_target_score(10);
        Snapshot {
            state: GameState::playing(config.player_count),
            config,
            rng: GameRng::new(9).state(),
        }
    }

    #[test]
    fn test_bytes_round_trip() {
        let snap = snapshot();
        let bytes = snap.to_bytes().unwrap();
        assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), snap);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Snapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::Codec(_))
        ));
    }

    #[test]
    fn test_rejects_winner_without_won_phase() {
        let mut snap = snapshot();
        snap.state.winner = Some(PlayerId::new(0));

        assert!(matches!(snap.validate(), Err(SnapshotError::Inconsistent(_))));
    }

    #[test]
    fn test_rejects_winner_below_target() {
        let mut snap = snapshot();
        snap.state.phase = Phase::Won;
        snap.state.winner = Some(PlayerId::new(1));
        snap.state.scores[PlayerId::new(1)] = 9;

        assert!(snap.validate().is_err());

        snap.state.scores[PlayerId::new(1)] = 10;
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn test_rejects_playing_score_at_target() {
        let mut snap = snapshot();
        snap.state.scores[PlayerId::new(0)] = 25;

        assert!(matches!(snap.validate(), Err(SnapshotError::Inconsistent(_))));

        snap.state.scores[PlayerId::new(0)] = 9;
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn test_rejects_dirty_setup_state() {
        let mut snap = snapshot();
        snap.state = GameState::setup(2);
        assert!(snap.validate().is_ok());

        snap.state.scores[PlayerId::new(1)] = 7;
        snap.state.current_player = PlayerId::new(1);
        assert!(matches!(snap.validate(), Err(SnapshotError::Inconsistent(_))));

        let mut snap = snapshot();
        snap.state = GameState::setup(2);
        snap.state.last_roll = DieFace::new(3);
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_rejects_second_player_past_target_when_won() {
        let mut snap = snapshot();
        snap.state.phase = Phase::Won;
        snap.state.winner = Some(PlayerId::new(0));
        snap.state.scores[PlayerId::new(0)] = 12;
        snap.state.scores[PlayerId::new(1)] = 10;

        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_rejects_mismatched_scores() {
        let mut snap = snapshot();
        snap.state = GameState::playing(3);

        assert!(snap.validate().is_err());
    }
}
