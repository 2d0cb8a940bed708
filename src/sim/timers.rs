//! Cancelable delayed tasks on a host-driven millisecond clock
//!
//! The queue never reads a wall clock. The host passes `now` into every call
//! and arms one real timer for `next_deadline()`.

use serde::{Deserialize, Serialize};

/// Work a timer performs when it fires.
///
/// Tasks carry no captured state; the controller reads the latest game state
/// when it handles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Relocate the button (reaction timer)
    Move,
    /// Clear the miss flash
    ClearMissFeedback,
    /// Finish the level transition after a hit
    AdvanceLevel,
}

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    id: TimerId,
    due_ms: u64,
    task: Task,
}

/// Pending tasks ordered by deadline, then by scheduling order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `now_ms + delay_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due_ms = now_ms.saturating_add(delay_ms);

        // Insert after every entry due at or before this one (stable for ties)
        let at = self.pending.partition_point(|s| s.due_ms <= due_ms);
        self.pending.insert(at, Scheduled { id, due_ms, task });
        log::trace!("timer {:?} scheduled: {:?} at {}ms", id, task, due_ms);
        id
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.pending.iter().position(|s| s.id == id) {
            Some(i) => {
                let removed = self.pending.remove(i);
                log::trace!("timer {:?} cancelled: {:?}", id, removed.task);
                true
            }
            None => false,
        }
    }

    /// Drop every pending task
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::trace!("cancelling {} pending timers", self.pending.len());
        }
        self.pending.clear();
    }

    /// Remove and return the earliest task due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, Task)> {
        match self.pending.first() {
            Some(first) if first.due_ms <= now_ms => {
                let s = self.pending.remove(0);
                Some((s.id, s.task))
            }
            _ => None,
        }
    }

    /// Deadline of the earliest pending task
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.first().map(|s| s.due_ms)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
