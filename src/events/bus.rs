//! Publish/subscribe dispatch for engine events.
//!
//! Observers register for the event kinds they care about and are called in
//! subscription order. Lookup is indexed by kind, like a trigger registry.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::{EventKind, GameEvent};

/// Receives engine events. Read-only by construction.
pub trait Observer {
    fn on_event(&mut self, event: &GameEvent);
}

/// Shared observers stay readable by whoever else holds the `Rc`.
impl<T: Observer + ?Sized> Observer for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &GameEvent) {
        self.borrow_mut().on_event(event);
    }
}

/// Adapts a closure into an [`Observer`].
pub struct FnObserver<F>(pub F);

impl<F: FnMut(&GameEvent)> Observer for FnObserver<F> {
    fn on_event(&mut self, event: &GameEvent) {
        (self.0)(event);
    }
}

/// Wrap a closure as an observer.
///
/// ```
/// use dice_race::events::{observer_fn, EventBus, GameEvent};
///
/// let mut bus = EventBus::new();
/// bus.subscribe_all(observer_fn(|event: &GameEvent| println!("{event:?}")));
/// bus.publish(&GameEvent::GameReset);
/// ```
pub fn observer_fn<F: FnMut(&GameEvent)>(f: F) -> FnObserver<F> {
    FnObserver(f)
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// Event dispatcher.
#[derive(Default)]
pub struct EventBus {
    /// All live observers.
    observers: FxHashMap<SubscriptionId, Box<dyn Observer>>,

    /// Index by event kind, in subscription order.
    by_kind: FxHashMap<EventKind, Vec<SubscriptionId>>,

    next_id: u32,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for the given kinds.
    pub fn subscribe(
        &mut self,
        kinds: &[EventKind],
        observer: impl Observer + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        for &kind in kinds {
            let ids = self.by_kind.entry(kind).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        self.observers.insert(id, Box::new(observer));
        id
    }

    /// Register an observer for every kind.
    pub fn subscribe_all(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.subscribe(&EventKind::ALL, observer)
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.observers.remove(&id).is_none() {
            return false;
        }

        self.by_kind.retain(|_, ids| {
            ids.retain(|&sid| sid != id);
            !ids.is_empty()
        });
        true
    }

    /// Deliver an event to every observer of its kind.
    pub fn publish(&mut self, event: &GameEvent) {
        let Some(ids) = self.by_kind.get(&event.kind()) else {
            return;
        };

        for id in ids {
            if let Some(observer) = self.observers.get_mut(id) {
                observer.on_event(event);
            }
        }
    }

    /// Number of live observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Observer that records every event it sees.
///
/// Unbounded by default. With a limit, the oldest events are dropped once
/// the log is full.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
    limit: Option<usize>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` events (builder pattern).
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.max(1));
        self.trim();
        self
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            let excess = self.events.len().saturating_sub(limit);
            self.events.drain(..excess);
        }
    }

    /// A log shared between the bus and the caller.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Kinds seen, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.iter().map(GameEvent::kind).collect()
    }

    /// Take everything recorded so far.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Observer for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
        self.trim();
    }
}
