//! Events emitted by the Turn Engine.
//!
//! Events are facts about transitions that already happened. Views, audio,
//! speech and ad slots subscribe to them; none of them can answer back.

use serde::{Deserialize, Serialize};

use crate::core::{DieFace, PlayerId};

/// Discriminant of a [`GameEvent`], used to route subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Configured,
    GameStarted,
    RollStarted,
    RollResolved,
    TurnAdvanced,
    GameWon,
    GameReset,
}

impl EventKind {
    /// Every kind, in emission order within a game.
    pub const ALL: [EventKind; 7] = [
        EventKind::Configured,
        EventKind::GameStarted,
        EventKind::RollStarted,
        EventKind::RollResolved,
        EventKind::TurnAdvanced,
        EventKind::GameWon,
        EventKind::GameReset,
    ];
}

/// A state transition of the Turn Engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New configuration stored (Setup only).
    Configured {
        player_count: usize,
        target_score: u32,
    },

    /// A game began. Views mount their dice here.
    GameStarted {
        player_names: Vec<String>,
        target_score: u32,
    },

    /// A face was drawn and the latch taken. Views animate toward `face`.
    RollStarted { player: PlayerId, face: DieFace },

    /// The face was added to the roller's score.
    RollResolved {
        player: PlayerId,
        name: String,
        face: DieFace,
        score: u32,
    },

    /// The roller stayed below target; `next` is up.
    TurnAdvanced {
        player: PlayerId,
        name: String,
        face: DieFace,
        next: PlayerId,
    },

    /// The roller reached the target. Terminal until reset.
    GameWon {
        winner: PlayerId,
        name: String,
        score: u32,
    },

    /// Back on the setup screen.
    GameReset,
}

impl GameEvent {
    /// The routing discriminant.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Configured { .. } => EventKind::Configured,
            GameEvent::GameStarted { .. } => EventKind::GameStarted,
            GameEvent::RollStarted { .. } => EventKind::RollStarted,
            GameEvent::RollResolved { .. } => EventKind::RollResolved,
            GameEvent::TurnAdvanced { .. } => EventKind::TurnAdvanced,
            GameEvent::GameWon { .. } => EventKind::GameWon,
            GameEvent::GameReset => EventKind::GameReset,
        }
    }
}
