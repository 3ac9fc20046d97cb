//! Seats at the table and per-seat values.
//!
//! A game has 1 to [`MAX_PLAYERS`] seats. [`PlayerId`] names a seat by its
//! 0-based position; turns rotate through seats in that order. [`PlayerMap`]
//! holds one value per seat inline, so a scoreboard is never heap-allocated.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::{MAX_PLAYERS, MIN_PLAYERS};

/// A seat, 0-based. Displays 1-based, the way players count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping at `player_count`.
    ///
    /// ```
    /// use dice_race::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// assert_eq!(PlayerId::new(0).next(1), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        debug_assert!(player_count > 0);
        Self(((self.index() + 1) % player_count.max(1)) as u8)
    }

    /// Placeholder name for a blank seat: `Player 1` for seat 0.
    #[must_use]
    pub fn default_name(self) -> String {
        format!("Player {}", self.index() + 1)
    }

    /// Seats `0..player_count` in turn order.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(MAX_PLAYERS)).map(|seat| PlayerId(seat as u8))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.index() + 1)
    }
}

/// One value per seat.
///
/// The seat count is clamped into `[MIN_PLAYERS, MAX_PLAYERS]` on
/// construction, matching what `GameConfig` accepts.
///
/// ```
/// use dice_race::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u32> = PlayerMap::for_seats(3);
/// scores[PlayerId::new(1)] += 4;
///
/// assert_eq!(scores.as_slice(), &[0, 4, 0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    seats: SmallVec<[T; MAX_PLAYERS]>,
}

impl<T> PlayerMap<T> {
    /// Build each seat's value from its `PlayerId`.
    pub fn from_fn(player_count: usize, f: impl FnMut(PlayerId) -> T) -> Self {
        let count = player_count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        Self {
            seats: PlayerId::all(count).map(f).collect(),
        }
    }

    pub fn filled(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(player_count, |_| value.clone())
    }

    /// Every seat at `T::default()`; zeroed scores for a fresh game.
    pub fn for_seats(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(player_count, |_| T::default())
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// `None` for a seat outside the table.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.seats
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}
