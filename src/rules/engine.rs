//! The Turn Engine.
//!
//! Owns the configuration, the play state, the die source and the event bus.
//! It is the only thing that mutates `GameState`.
//!
//! ## Rolling
//!
//! A roll is two steps. [`TurnEngine::begin_roll`] draws a face, takes the
//! rolling latch and publishes `RollStarted` so a view can animate toward
//! that face. [`TurnEngine::finish_roll`] commits the score, history, win or
//! turn advance, and releases the latch. [`TurnEngine::roll_dice`] does both
//! back to back for callers that present synchronously.
//!
//! Calls that arrive while a roll is in flight, or outside `Playing`, are
//! ignored and return `None`.
//!
//! ```
//! use dice_race::core::{GameConfig, Phase, ScriptedDice};
//! use dice_race::rules::TurnEngine;
//!
//! let config = GameConfig::new(2).with_names(["A", "B"]).with_target_score(10);
//! let dice = ScriptedDice::new([4, 3, 6, 2]).unwrap();
//! let mut engine = TurnEngine::with_dice(config, dice);
//!
//! engine.start();
//! while engine.roll_dice().unwrap().is_some() {}
//!
//! assert_eq!(engine.phase(), Phase::Won);
//! assert_eq!(engine.scores(), &[10, 3]);
//! ```

use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::core::{
    DieError, DieFace, DieSource, GameConfig, GameRng, GameState, Phase, PlayerId, RollHistory,
    Snapshot, SnapshotError,
};
use crate::events::{EventBus, EventKind, GameEvent, Observer, SubscriptionId};

use super::policy::{resolve_roll, RollOutcome, TurnResult};

/// Engine call failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Configuration can only change on the setup screen.
    #[error("cannot reconfigure while {phase}")]
    GameInProgress { phase: Phase },

    /// The die source could not produce a face.
    #[error("die source unavailable: {0}")]
    Dice(#[from] DieError),
}

/// Turn engine over a die source.
#[derive(Debug)]
pub struct TurnEngine<D: DieSource = GameRng> {
    config: GameConfig,
    state: GameState,
    dice: D,
    bus: EventBus,
}

impl TurnEngine<GameRng> {
    /// Engine with a seeded RNG.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_dice(config, GameRng::new(seed))
    }

    /// Capture config, state and RNG position.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config.clone(),
            state: self.state.clone(),
            rng: self.dice.state(),
        }
    }

    /// Resume from a snapshot. Subscriptions are not part of a snapshot.
    pub fn restore(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        info!(phase = %snapshot.state.phase, "restoring session");
        Ok(Self {
            dice: GameRng::from_state(&snapshot.rng),
            config: snapshot.config,
            state: snapshot.state,
            bus: EventBus::new(),
        })
    }
}

impl<D: DieSource> TurnEngine<D> {
    /// Engine over any die source, on the setup screen.
    pub fn with_dice(config: GameConfig, dice: D) -> Self {
        let config = config.normalized();
        Self {
            state: GameState::setup(config.player_count),
            config,
            dice,
            bus: EventBus::new(),
        }
    }

    // === Configuration ===

    /// Store a new configuration.
    ///
    /// `player_count` is clamped into 1..=4, blank names become `Player N`,
    /// and a zero target becomes 1. Only allowed in `Setup`.
    pub fn configure<I, S>(
        &mut self,
        player_count: usize,
        player_names: I,
        target_score: u32,
    ) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = GameConfig::new(player_count)
            .with_names(player_names)
            .with_target_score(target_score);
        self.configure_with(config)
    }

    /// Store a prepared configuration. Only allowed in `Setup`.
    pub fn configure_with(&mut self, config: GameConfig) -> Result<(), EngineError> {
        if self.state.phase != Phase::Setup {
            return Err(EngineError::GameInProgress {
                phase: self.state.phase,
            });
        }

        self.config = config.normalized();
        self.state = GameState::setup(self.config.player_count);
        debug!(
            players = self.config.player_count,
            target = self.config.target_score,
            "configured"
        );

        self.bus.publish(&GameEvent::Configured {
            player_count: self.config.player_count,
            target_score: self.config.target_score,
        });
        Ok(())
    }

    // === Lifecycle ===

    /// Begin a game: zero scores, player 0 first, empty history.
    ///
    /// Re-initialises from any phase and drops an in-flight roll.
    pub fn start(&mut self) {
        self.state = GameState::playing(self.config.player_count);
        info!(
            players = self.config.player_count,
            target = self.config.target_score,
            "game started"
        );

        self.bus.publish(&GameEvent::GameStarted {
            player_names: self.config.player_names.clone(),
            target_score: self.config.target_score,
        });
    }

    /// Return to setup. Configuration is kept for the next game.
    pub fn reset(&mut self) {
        let previous = self.state.phase;
        self.state = GameState::setup(self.config.player_count);
        info!(from = %previous, "game reset");

        self.bus.publish(&GameEvent::GameReset);
    }

    // === Rolling ===

    /// Draw a face and resolve it in one call.
    ///
    /// Returns `Ok(None)` when the roll is ignored (not playing, or a roll is
    /// already in flight). A failing die source leaves state untouched.
    pub fn roll_dice(&mut self) -> Result<Option<RollOutcome>, EngineError> {
        if self.begin_roll()?.is_none() {
            return Ok(None);
        }
        Ok(self.finish_roll())
    }

    /// Draw a face and take the rolling latch.
    ///
    /// Scores do not change until [`finish_roll`](Self::finish_roll).
    pub fn begin_roll(&mut self) -> Result<Option<DieFace>, EngineError> {
        if !self.state.accepts_roll() {
            trace!(
                phase = %self.state.phase,
                rolling = self.state.is_rolling(),
                "roll ignored"
            );
            return Ok(None);
        }

        let face = self.dice.roll_die().map_err(|err| {
            warn!(error = %err, "die source failed");
            EngineError::from(err)
        })?;

        self.state.in_flight = Some(face);
        self.bus.publish(&GameEvent::RollStarted {
            player: self.state.current_player,
            face,
        });
        Ok(Some(face))
    }

    /// Commit the in-flight roll and release the latch.
    ///
    /// Returns `None` if no roll is in flight (for instance after a reset
    /// raced an animation callback).
    pub fn finish_roll(&mut self) -> Option<RollOutcome> {
        let face = self.state.in_flight.take()?;
        let outcome = resolve_roll(&mut self.state, &self.config, face);
        let name = self.config.display_name(outcome.player);

        debug!(
            player = outcome.player.index(),
            face = face.value(),
            score = outcome.score,
            "roll resolved"
        );

        self.bus.publish(&GameEvent::RollResolved {
            player: outcome.player,
            name: name.clone(),
            face,
            score: outcome.score,
        });

        match outcome.result {
            TurnResult::Advanced { next } => {
                self.bus.publish(&GameEvent::TurnAdvanced {
                    player: outcome.player,
                    name,
                    face,
                    next,
                });
            }
            TurnResult::Won => {
                info!(winner = %name, score = outcome.score, "game won");
                self.bus.publish(&GameEvent::GameWon {
                    winner: outcome.player,
                    name,
                    score: outcome.score,
                });
            }
        }

        Some(outcome)
    }

    // === Observers ===

    /// Subscribe an observer to some event kinds.
    pub fn subscribe(
        &mut self,
        kinds: &[EventKind],
        observer: impl Observer + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(kinds, observer)
    }

    /// Subscribe an observer to every event.
    pub fn subscribe_all(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.bus.subscribe_all(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    /// Scores in seat order.
    #[must_use]
    pub fn scores(&self) -> &[u32] {
        self.state.scores.as_slice()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    #[must_use]
    pub fn last_roll(&self) -> Option<DieFace> {
        self.state.last_roll
    }

    #[must_use]
    pub fn history(&self) -> &RollHistory {
        &self.state.history
    }

    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.state.is_rolling()
    }

    /// The die source, e.g. to top up a script.
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedDice;
    use crate::events::EventLog;

    fn engine(count: usize, target: u32, faces: &[u8]) -> TurnEngine<ScriptedDice> {
        let config = GameConfig::new(count).with_target_score(target);
        TurnEngine::with_dice(config, ScriptedDice::new(faces.iter().copied()).unwrap())
    }

    #[test]
    fn test_new_engine_is_in_setup() {
        let engine = engine(2, 10, &[]);

        assert_eq!(engine.phase(), Phase::Setup);
        assert_eq!(engine.scores(), &[0, 0]);
        assert!(engine.winner().is_none());
    }

    #[test]
    fn test_roll_ignored_in_setup() {
        let mut engine = engine(2, 10, &[3]);

        assert_eq!(engine.roll_dice(), Ok(None));
        assert_eq!(engine.dice_mut().remaining(), 1);
    }

    #[test]
    fn test_begin_roll_defers_commit() {
        let mut engine = engine(2, 10, &[5, 2]);
        engine.start();

        assert_eq!(engine.begin_roll().unwrap().map(DieFace::value), Some(5));
        assert!(engine.is_rolling());
        assert_eq!(engine.scores(), &[0, 0]);
        assert_eq!(engine.last_roll(), None);

        // Latched: second roll is ignored and draws nothing.
        assert_eq!(engine.begin_roll(), Ok(None));
        assert_eq!(engine.roll_dice(), Ok(None));
        assert_eq!(engine.dice_mut().remaining(), 1);

        let outcome = engine.finish_roll().unwrap();
        assert_eq!(outcome.score, 5);
        assert!(!engine.is_rolling());
        assert_eq!(engine.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_finish_without_begin_is_none() {
        let mut engine = engine(2, 10, &[]);
        engine.start();
        assert!(engine.finish_roll().is_none());
    }

    #[test]
    fn test_reset_releases_latch() {
        let mut engine = engine(2, 10, &[5]);
        engine.start();
        engine.begin_roll().unwrap();

        engine.reset();

        assert!(!engine.is_rolling());
        assert!(engine.finish_roll().is_none());
        assert_eq!(engine.phase(), Phase::Setup);
    }

    #[test]
    fn test_exhausted_dice_leave_state_untouched() {
        let mut engine = engine(2, 10, &[]);
        engine.start();

        assert_eq!(
            engine.roll_dice(),
            Err(EngineError::Dice(DieError::Exhausted))
        );
        assert!(!engine.is_rolling());
        assert_eq!(engine.state().rolls_resolved, 0);
    }

    #[test]
    fn test_configure_only_in_setup() {
        let mut engine = engine(2, 10, &[]);
        engine.configure(3, ["A", "", "C"], 30).unwrap();

        assert_eq!(engine.config().player_names, ["A", "Player 2", "C"]);
        assert_eq!(engine.scores(), &[0, 0, 0]);

        engine.start();
        assert_eq!(
            engine.configure(2, ["X", "Y"], 50),
            Err(EngineError::GameInProgress { phase: Phase::Playing })
        );
        assert_eq!(engine.config().player_count, 3);
    }

    #[test]
    fn test_event_sequence_for_win() {
        let mut engine = engine(1, 1, &[2]);
        let log = EventLog::shared();
        engine.subscribe_all(log.clone());

        engine.start();
        engine.roll_dice().unwrap();
        engine.reset();

        assert_eq!(
            log.borrow().kinds(),
            vec![
                EventKind::GameStarted,
                EventKind::RollStarted,
                EventKind::RollResolved,
                EventKind::GameWon,
                EventKind::GameReset,
            ]
        );
    }

    #[test]
    fn test_snapshot_resumes_roll_sequence() {
        let mut engine = TurnEngine::new(GameConfig::new(3).with_target_score(1000), 77);
        engine.start();
        for _ in 0..4 {
            engine.roll_dice().unwrap();
        }

        let bytes = engine.snapshot().to_bytes().unwrap();
        let mut restored = TurnEngine::restore(Snapshot::from_bytes(&bytes).unwrap()).unwrap();
        assert_eq!(restored.state(), engine.state());

        for _ in 0..5 {
            assert_eq!(restored.roll_dice().unwrap(), engine.roll_dice().unwrap());
        }
    }
}
