//! Cancelable delayed delivery on a caller-driven clock.
//!
//! The queue never reads wall time. The host calls `advance_to(now_ms)` from
//! its frame or timer callback and gets back whatever fell due.
//!
//! `cancel_all()` drops everything pending, so nothing scheduled before a
//! reset can fire after it.

#[derive(Clone, Debug)]
struct Pending<T> {
    due_ms: u64,
    seq: u64,
    item: T,
}

/// Items waiting for a point in time.
#[derive(Clone, Debug)]
pub struct DelayedQueue<T> {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for DelayedQueue<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> DelayedQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last time passed to `advance_to`.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Deliver `item` once the clock reaches `now + delay_ms`.
    pub fn schedule_in(&mut self, delay_ms: u64, item: T) {
        self.pending.push(Pending {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            item,
        });
        self.next_seq += 1;
    }

    /// Move the clock forward and take everything now due, earliest first.
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.max(now_ms);

        let now = self.now_ms;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = waiting;

        due.sort_by_key(|p| (p.due_ms, p.seq));
        due.into_iter().map(|p| p.item).collect()
    }

    /// Drop everything pending.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
