//! Falling petals on the win screen.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::events::{GameEvent, Observer};

/// Petals dropped per win.
pub const PETAL_COUNT: usize = 30;

/// One falling petal, laid out in CSS-like units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Petal {
    pub id: usize,
    /// Horizontal start, percent of width in `[0, 100)`.
    pub left_pct: f32,
    /// Seconds before it starts falling, `[0, 0.5)`.
    pub delay_s: f32,
    /// Seconds to fall, `[2, 3)`.
    pub duration_s: f32,
}

/// Lay out `count` petals.
pub fn scatter_petals(rng: &mut GameRng, count: usize) -> Vec<Petal> {
    (0..count)
        .map(|id| Petal {
            id,
            left_pct: below(rng.gen_unit() * 100.0, 100.0),
            delay_s: below(rng.gen_unit() * 0.5, 0.5),
            duration_s: below(2.0 + rng.gen_unit(), 3.0),
        })
        .collect()
}

/// Narrow to f32, keeping the result strictly under a positive `limit`.
///
/// An f64 just under the limit can round up to it.
fn below(value: f64, limit: f32) -> f32 {
    let narrowed = value as f32;
    if narrowed < limit {
        narrowed
    } else {
        f32::from_bits(limit.to_bits() - 1)
    }
}

/// Observer that scatters petals when someone wins and clears them when a
/// new game starts or the table resets.
#[derive(Clone, Debug)]
pub struct Celebration {
    rng: GameRng,
    petals: Vec<Petal>,
}

impl Celebration {
    /// Cosmetic randomness gets its own stream, separate from the dice.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            petals: Vec::new(),
        }
    }

    #[must_use]
    pub fn petals(&self) -> &[Petal] {
        &self.petals
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.petals.is_empty()
    }
}

impl Observer for Celebration {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameWon { .. } => {
                self.petals = scatter_petals(&mut self.rng, PETAL_COUNT);
            }
            GameEvent::GameStarted { .. } | GameEvent::GameReset => self.petals.clear(),
            _ => {}
        }
    }
}
