//! Dice roll animation curve.
//!
//! Maps a face to the cube orientation that shows it, and samples the
//! tumble toward that orientation: ease-out cubic with a decaying wobble on
//! x/y and a decaying spin on z. The last frame lands exactly on the target.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::{DieFace, GameRng};

/// Length of one roll animation.
pub const ROLL_DURATION_MS: u64 = 800;

/// Wobble oscillations over the whole roll, in half turns.
const WOBBLE_FREQUENCY: f32 = 10.0;

/// Peak wobble amplitude in radians.
const WOBBLE_AMPLITUDE: f32 = 2.0;

/// Euler rotation in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Rotation that turns `face` toward the camera.
///
/// Matches a cube whose material order is +x:1, -x:6, +y:2, -y:5, +z:3, -z:4.
#[must_use]
pub fn face_orientation(face: DieFace) -> Orientation {
    match face.value() {
        1 => Orientation::new(0.0, -PI / 2.0, 0.0),
        2 => Orientation::new(PI / 2.0, 0.0, 0.0),
        3 => Orientation::new(0.0, 0.0, 0.0),
        4 => Orientation::new(0.0, PI, 0.0),
        5 => Orientation::new(-PI / 2.0, 0.0, 0.0),
        _ => Orientation::new(0.0, PI / 2.0, 0.0),
    }
}

/// `1 - (1 - p)^3`, with `p` clamped into `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// One sampled frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub orientation: Orientation,
    pub progress: f32,
    pub finished: bool,
}

/// A roll animation toward a known face.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollAnimation {
    face: DieFace,
    target: Orientation,
    spin: f32,
    duration_ms: u64,
}

impl RollAnimation {
    /// Animation with a random initial spin.
    pub fn new(face: DieFace, rng: &mut GameRng) -> Self {
        Self::with_spin(face, rng.gen_unit() as f32)
    }

    /// Animation with a fixed spin fraction in `[0, 1)`.
    #[must_use]
    pub fn with_spin(face: DieFace, spin: f32) -> Self {
        Self {
            face,
            target: face_orientation(face),
            spin: spin.clamp(0.0, 1.0),
            duration_ms: ROLL_DURATION_MS,
        }
    }

    /// Override the duration (builder pattern). Zero finishes immediately.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn face(&self) -> DieFace {
        self.face
    }

    #[must_use]
    pub fn target(&self) -> Orientation {
        self.target
    }

    /// Sample the cube `elapsed_ms` after the roll began.
    #[must_use]
    pub fn sample(&self, elapsed_ms: u64) -> AnimationFrame {
        let progress = if self.duration_ms == 0 {
            1.0
        } else {
            (elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
        };

        if progress >= 1.0 {
            return AnimationFrame {
                orientation: self.target,
                progress: 1.0,
                finished: true,
            };
        }

        let eased = ease_out_cubic(progress);
        let decay = 1.0 - progress;
        let phase = progress * PI * WOBBLE_FREQUENCY;

        AnimationFrame {
            orientation: Orientation {
                x: self.target.x * eased + phase.sin() * decay * WOBBLE_AMPLITUDE,
                y: self.target.y * eased + phase.cos() * decay * WOBBLE_AMPLITUDE,
                z: self.spin * 2.0 * PI * decay,
            },
            progress,
            finished: false,
        }
    }
}
