//! Die-value sources.
//!
//! The Turn Engine never calls a global RNG. It draws faces from a
//! [`DieSource`], which is either a seeded [`GameRng`] (play) or a
//! [`ScriptedDice`] sequence (tests and replays).
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Serializable**: O(1) state capture and restore via the ChaCha word position
//!
//! ```
//! use dice_race::core::{DieSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_die().unwrap(), b.roll_die().unwrap());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// A validated die face in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    /// Wrap a raw value, rejecting anything outside `1..=6`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= DIE_FACES {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The pip count.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this is the top face (a six).
    #[must_use]
    pub const fn is_max(self) -> bool {
        self.0 == DIE_FACES
    }
}

impl TryFrom<u8> for DieFace {
    type Error = DieError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(DieError::OutOfRange(value))
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure to produce a die value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DieError {
    /// A scripted source ran out of faces.
    #[error("die source exhausted")]
    Exhausted,
    /// A raw value outside `1..=6`.
    #[error("die value {0} is not a face of a six-sided die")]
    OutOfRange(u8),
}

/// Anything that can produce a uniformly distributed die face.
pub trait DieSource {
    /// Draw the next face.
    fn roll_die(&mut self) -> Result<DieFace, DieError>;
}

impl<T: DieSource + ?Sized> DieSource for Box<T> {
    fn roll_die(&mut self) -> Result<DieFace, DieError> {
        (**self).roll_die()
    }
}

/// Seeded die for real play.
///
/// ChaCha8 underneath; the same stream also feeds cosmetic jitter through [`GameRng::gen_unit`].
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Dice seeded with `seed`; equal seeds roll equal games.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[0, 1)`, for cosmetic jitter.
    pub fn gen_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Seed and stream position, enough to resume the exact roll sequence.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume at a recorded stream position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DieSource for GameRng {
    fn roll_die(&mut self) -> Result<DieFace, DieError> {
        let value = self.inner.gen_range(1..=DIE_FACES);
        DieFace::new(value).ok_or(DieError::OutOfRange(value))
    }
}

/// Where a `GameRng` is in its stream. Stored in snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the stream started from
    pub seed: u64,
    /// Words consumed from the ChaCha8 stream
    pub word_pos: u128,
}

/// Replays a fixed sequence of faces, then reports exhaustion.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    faces: VecDeque<DieFace>,
}

impl ScriptedDice {
    /// Build from raw values. Fails on the first value outside `1..=6`.
    pub fn new(values: impl IntoIterator<Item = u8>) -> Result<Self, DieError> {
        let faces = values
            .into_iter()
            .map(DieFace::try_from)
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { faces })
    }

    /// Faces not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }

    /// Append more faces to the end of the script.
    pub fn extend(&mut self, faces: impl IntoIterator<Item = DieFace>) {
        self.faces.extend(faces);
    }
}

impl DieSource for ScriptedDice {
    fn roll_die(&mut self) -> Result<DieFace, DieError> {
        self.faces.pop_front().ok_or(DieError::Exhausted)
    }
}
