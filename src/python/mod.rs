//! Python bindings for the dice-race turn engine.
//!
//! # Quick Start
//!
//! ```python
//! import dice_race
//!
//! engine = dice_race.TurnEngine(player_count=2, player_names=["A", "B"], target_score=30, seed=7)
//! engine.start()
//! while engine.phase == "playing":
//!     engine.roll()
//!
//! print(engine.player_names[engine.winner], engine.scores)
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

use crate::core::{MAX_PLAYERS, RECOMMENDED_TARGETS};

/// dice_race: turn engine for a 1-4 player dice race.
#[pymodule]
fn dice_race(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTurnEngine>()?;
    m.add("MAX_PLAYERS", MAX_PLAYERS)?;
    m.add("RECOMMENDED_TARGETS", RECOMMENDED_TARGETS.to_vec())?;
    Ok(())
}
