//! Cancellable timers: the scheduler seam, single-pending slots, and a
//! virtual clock for tests.
//!
//! DESIGN
//! ======
//! The controller never holds raw timer handles. Each logical timer (the
//! settle debounce, the post-snap resync, one flash removal per panel) lives
//! in a [`TimerSlot`], which cancels its previous timer before scheduling a
//! new one. That makes "at most one pending timer of this kind" a property
//! of the type rather than of every call site.
//!
//! A timer carries a [`Wake`] token. When it fires, the host hands the token
//! back to [`crate::controller::SnapController::on_wake`].

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::collections::BTreeMap;

/// Opaque handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a timer delivers back to the controller when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wake {
    /// Scrolling has been quiet for the debounce period.
    Settle,
    /// A programmatic snap is assumed finished.
    SnapDone,
    /// The flash on the panel at this index should be removed.
    FlashEnd(usize),
}

/// Host capability for scheduling and cancelling one-shot timers.
///
/// Implementations must guarantee that a cancelled timer never fires.
pub trait Scheduler {
    /// Schedule `wake` to be delivered after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32, wake: Wake) -> TimerId;

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Holds at most one pending timer.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<TimerId>,
}

impl TimerSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending, then schedule `wake` after `delay_ms`.
    pub fn reschedule<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, delay_ms: u32, wake: Wake) -> TimerId {
        self.cancel(scheduler);
        let id = scheduler.schedule(delay_ms, wake);
        self.pending = Some(id);
        id
    }

    /// Cancel the pending timer, if any.
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Forget the pending timer after it fired.
    pub fn fired(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }
}

/// Deterministic scheduler driven by explicit time advances.
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, TimerId), Wake>,
}

impl VirtualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers scheduled and not yet fired or cancelled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest timer due at or before `deadline`, moving the clock
    /// to its due time.
    ///
    /// Callers loop on this so timers scheduled while handling a wake can
    /// still fire inside the same window.
    pub fn pop_due(&mut self, deadline: u64) -> Option<(TimerId, Wake)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > deadline {
            return None;
        }
        let wake = self.queue.remove(&(due, id))?;
        self.now_ms = self.now_ms.max(due);
        Some((id, wake))
    }

    /// Move the clock forward without firing anything.
    ///
    /// Pending timers that are already overdue stay queued until popped.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&mut self, delay_ms: u32, wake: Wake) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.queue.insert((self.now_ms + u64::from(delay_ms), id), wake);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.retain(|(_, queued), _| *queued != id);
    }
}
