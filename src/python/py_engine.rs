//! Turn engine bindings for Python.

use std::cell::RefCell;
use std::rc::Rc;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::{GameConfig, GameRng, Snapshot, DEFAULT_PLAYERS, DEFAULT_TARGET};
use crate::events::EventLog;
use crate::rules::{EngineError, TurnEngine};

/// Events kept for `drain_events()`; older ones are dropped.
const EVENT_LOG_LIMIT: usize = 256;

fn engine_err(err: EngineError) -> PyErr {
    match err {
        EngineError::GameInProgress { .. } => PyValueError::new_err(err.to_string()),
        EngineError::Dice(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Python wrapper for TurnEngine.
///
/// The most recent events are recorded internally; call `drain_events()`
/// to read them.
#[pyclass(name = "TurnEngine", unsendable)]
pub struct PyTurnEngine {
    engine: TurnEngine<GameRng>,
    log: Rc<RefCell<EventLog>>,
}

impl PyTurnEngine {
    fn wrap(mut engine: TurnEngine<GameRng>) -> Self {
        let log = Rc::new(RefCell::new(EventLog::new().with_limit(EVENT_LOG_LIMIT)));
        engine.subscribe_all(log.clone());
        Self { engine, log }
    }
}

#[pymethods]
impl PyTurnEngine {
    /// Create an engine on the setup screen.
    ///
    /// # Arguments
    /// - player_count: Number of players (clamped to 1-4)
    /// - player_names: Names per seat; blanks become "Player N"
    /// - target_score: First score at or above this wins
    /// - seed: RNG seed; random if omitted
    #[new]
    #[pyo3(signature = (
        player_count = DEFAULT_PLAYERS,
        player_names = None,
        target_score = DEFAULT_TARGET,
        seed = None
    ))]
    fn new(
        player_count: usize,
        player_names: Option<Vec<String>>,
        target_score: u32,
        seed: Option<u64>,
    ) -> Self {
        let config = GameConfig::new(player_count)
            .with_names(player_names.unwrap_or_default())
            .with_target_score(target_score);
        let rng = seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::wrap(TurnEngine::with_dice(config, rng))
    }

    /// Replace the configuration. Raises ValueError outside setup.
    #[pyo3(signature = (player_count, player_names = None, target_score = DEFAULT_TARGET))]
    fn configure(
        &mut self,
        player_count: usize,
        player_names: Option<Vec<String>>,
        target_score: u32,
    ) -> PyResult<()> {
        self.engine
            .configure(player_count, player_names.unwrap_or_default(), target_score)
            .map_err(engine_err)
    }

    fn start(&mut self) {
        self.engine.start();
    }

    /// Roll and resolve. Returns the face, or None if the roll was ignored.
    fn roll(&mut self) -> PyResult<Option<u8>> {
        let outcome = self.engine.roll_dice().map_err(engine_err)?;
        Ok(outcome.map(|o| o.face.value()))
    }

    fn reset(&mut self) {
        self.engine.reset();
    }

    #[getter]
    fn phase(&self) -> String {
        self.engine.phase().to_string()
    }

    #[getter]
    fn scores(&self) -> Vec<u32> {
        self.engine.scores().to_vec()
    }

    #[getter]
    fn player_names(&self) -> Vec<String> {
        self.engine.config().player_names.clone()
    }

    #[getter]
    fn target_score(&self) -> u32 {
        self.engine.config().target_score
    }

    #[getter]
    fn current_player(&self) -> usize {
        self.engine.current_player().index()
    }

    #[getter]
    fn winner(&self) -> Option<usize> {
        self.engine.winner().map(|w| w.index())
    }

    #[getter]
    fn last_roll(&self) -> Option<u8> {
        self.engine.last_roll().map(|f| f.value())
    }

    /// Recent rolls as (name, value), most recent first.
    #[getter]
    fn history(&self) -> Vec<(String, u8)> {
        self.engine
            .history()
            .iter()
            .map(|r| (r.name.clone(), r.value.value()))
            .collect()
    }

    /// Events since the last call (at most the newest 256), as debug strings.
    fn drain_events(&mut self) -> Vec<String> {
        self.log
            .borrow_mut()
            .drain()
            .into_iter()
            .map(|e| format!("{e:?}"))
            .collect()
    }

    /// Encode the session as bytes.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self
            .engine
            .snapshot()
            .to_bytes()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Resume a session from `snapshot()` bytes.
    #[staticmethod]
    fn restore(data: &[u8]) -> PyResult<Self> {
        let engine = Snapshot::from_bytes(data)
            .and_then(TurnEngine::restore)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self::wrap(engine))
    }

    fn __repr__(&self) -> String {
        format!(
            "TurnEngine(phase={}, scores={:?}, target={})",
            self.engine.phase(),
            self.engine.scores(),
            self.engine.config().target_score
        )
    }
}
