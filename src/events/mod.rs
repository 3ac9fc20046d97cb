//! Event system: what the engine announces and who hears it.
//!
//! The engine publishes a [`GameEvent`] after every transition. Presentation
//! collaborators implement [`Observer`] and subscribe on the engine's
//! [`EventBus`]. Observers only ever see `&GameEvent`, so nothing downstream
//! can mutate game state.

pub mod event;
pub mod bus;

pub use event::{EventKind, GameEvent};
pub use bus::{observer_fn, EventBus, EventLog, FnObserver, Observer, SubscriptionId};
