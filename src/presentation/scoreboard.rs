//! Scoreboard view for display.

use serde::{Deserialize, Serialize};

use crate::core::{DieSource, GameConfig, GameState, Phase, PlayerId};
use crate::rules::TurnEngine;

/// One scoreboard line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub player: PlayerId,
    pub name: String,
    pub score: u32,
    /// Highlighted as the seat to roll.
    pub is_current: bool,
}

/// Everything the side panels render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardView {
    pub phase: Phase,
    pub target_score: u32,
    pub rows: Vec<ScoreRow>,
    pub last_roll: Option<u8>,
    /// Recent rolls as (name, value), most recent first.
    pub recent: Vec<(String, u8)>,
    pub winner: Option<String>,
}

impl ScoreboardView {
    pub fn from_parts(config: &GameConfig, state: &GameState) -> Self {
        let rows = config
            .player_ids()
            .map(|player| ScoreRow {
                player,
                name: config.display_name(player),
                score: state.score(player),
                is_current: state.phase == Phase::Playing && state.current_player == player,
            })
            .collect();

        Self {
            phase: state.phase,
            target_score: config.target_score,
            rows,
            last_roll: state.last_roll.map(|f| f.value()),
            recent: state
                .history
                .iter()
                .map(|r| (r.name.clone(), r.value.value()))
                .collect(),
            winner: state.winner.map(|w| config.display_name(w)),
        }
    }

    pub fn from_engine<D: DieSource>(engine: &TurnEngine<D>) -> Self {
        Self::from_parts(engine.config(), engine.state())
    }

    /// Update from the engine (for incremental redraws).
    pub fn update_from_engine<D: DieSource>(&mut self, engine: &TurnEngine<D>) {
        *self = Self::from_engine(engine);
    }
}
