//! Game configuration.
//!
//! A session is configured once, before `start()`:
//! - how many seats (1-4)
//! - what each seat is called
//! - the score that wins
//!
//! Bad input is never an error here. Out-of-range counts are clamped, blank
//! names become `Player N`, and a zero target is raised to 1.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Fewest seats a game can have.
pub const MIN_PLAYERS: usize = 1;

/// Most seats a game can have.
pub const MAX_PLAYERS: usize = 4;

/// Seats selected on a fresh setup screen.
pub const DEFAULT_PLAYERS: usize = 2;

/// Target selected on a fresh setup screen.
pub const DEFAULT_TARGET: u32 = 50;

/// Targets offered by the setup screen. Any positive target is accepted.
pub const RECOMMENDED_TARGETS: [u32; 4] = [30, 50, 75, 100];

/// Complete session configuration.
///
/// Build with the `with_*` methods, then hand it to the engine, which stores
/// the [`normalized`](GameConfig::normalized) form.
///
/// ```
/// use dice_race::core::GameConfig;
///
/// let config = GameConfig::new(7)
///     .with_names(["Ann", "  "])
///     .with_target_score(30)
///     .normalized();
///
/// assert_eq!(config.player_count, 4);
/// assert_eq!(config.player_names, ["Ann", "Player 2", "Player 3", "Player 4"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats.
    pub player_count: usize,

    /// Display name per seat, in seat order.
    #[serde(default)]
    pub player_names: Vec<String>,

    /// First score at or above this wins.
    pub target_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYERS)
    }
}

impl GameConfig {
    /// Create a configuration with placeholder names and the default target.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            player_names: Vec::new(),
            target_score: DEFAULT_TARGET,
        }
        .normalized()
    }

    /// Replace all names (builder pattern).
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set one seat's name (builder pattern). Grows the list if needed.
    #[must_use]
    pub fn with_name(mut self, player: PlayerId, name: impl Into<String>) -> Self {
        if self.player_names.len() <= player.index() {
            self.player_names.resize(player.index() + 1, String::new());
        }
        self.player_names[player.index()] = name.into();
        self
    }

    /// Set the target score (builder pattern).
    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    /// Clamp and fill in everything the engine relies on.
    ///
    /// Afterwards `player_count` is in `[MIN_PLAYERS, MAX_PLAYERS]`,
    /// `player_names.len() == player_count` with no blank entry, and
    /// `target_score >= 1`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.player_count = self.player_count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.player_names.truncate(self.player_count);

        let mut names = std::mem::take(&mut self.player_names).into_iter();
        self.player_names = PlayerId::all(self.player_count)
            .map(|player| match names.next() {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => player.default_name(),
            })
            .collect();

        self.target_score = self.target_score.max(1);
        self
    }

    /// Stored name for a seat, empty for a blank or unknown seat.
    #[must_use]
    pub fn name(&self, player: PlayerId) -> &str {
        match self.player_names.get(player.index()) {
            Some(name) if !name.trim().is_empty() => name,
            _ => "",
        }
    }

    /// Owned display name, substituting the placeholder for a blank seat.
    ///
    /// Total even on a config that was never normalized.
    #[must_use]
    pub fn display_name(&self, player: PlayerId) -> String {
        let name = self.name(player);
        if name.is_empty() {
            player.default_name()
        } else {
            name.to_string()
        }
    }

    /// Whether the target is one the setup screen offers.
    #[must_use]
    pub fn is_recommended_target(&self) -> bool {
        RECOMMENDED_TARGETS.contains(&self.target_score)
    }

    /// Iterate over all seats.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }
}
