//! Delayed game events.
//!
//! `TimerQueue` is the engine's scheduler: events are queued with a due
//! time on the engine clock and handed back once that time has passed. It
//! never runs anything on its own; the engine pumps it from
//! [`MemoryGame::run_due_timers`](super::MemoryGame::run_due_timers).
//!
//! Events due at the same millisecond come back in scheduling order.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::CardId;

/// Handle for cancelling a scheduled event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A delayed effect, tagged with the game generation it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Preview is over; start playing.
    PreviewElapsed { generation: u64 },
    /// Mismatch review is over; hide the captured cards.
    ///
    /// `review` numbers the attempt within its generation so a later
    /// attempt on the same card can take it over.
    MismatchReview {
        generation: u64,
        review: u64,
        cards: [CardId; 2],
    },
}

impl TimerEvent {
    /// Generation the event was scheduled in.
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            TimerEvent::PreviewElapsed { generation }
            | TimerEvent::MismatchReview { generation, .. } => *generation,
        }
    }
}

/// Ordered queue of pending events.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    /// Keyed by (due time, sequence) so iteration is firing order.
    entries: BTreeMap<(u64, u64), TimerEvent>,
    /// Sequence number to due time, for cancellation.
    due_by_seq: FxHashMap<u64, u64>,
    next_seq: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay_ms` after `now`.
    pub fn schedule(&mut self, now: u64, delay_ms: u64, event: TimerEvent) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;

        let due = now.saturating_add(delay_ms);
        self.entries.insert((due, seq), event);
        self.due_by_seq.insert(seq, due);

        TimerHandle(seq)
    }

    /// Cancel a scheduled event.
    ///
    /// Returns false if it already fired or was already cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due_by_seq.remove(&handle.0) {
            Some(due) => self.entries.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    /// Pop the earliest event due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<TimerEvent> {
        let (&(due, seq), _) = self.entries.first_key_value()?;
        if due > now {
            return None;
        }

        self.due_by_seq.remove(&seq);
        self.entries.remove(&(due, seq))
    }

    /// Pop every event due at or before `now`, in firing order.
    pub fn drain_due(&mut self, now: u64) -> SmallVec<[TimerEvent; 2]> {
        let mut due = SmallVec::new();
        while let Some(event) = self.pop_due(now) {
            due.push(event);
        }
        due
    }

    /// When the next event is due, if any.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.entries.keys().next().map(|&(due, _)| due)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.due_by_seq.clear();
    }
}
