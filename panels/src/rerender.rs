//! Flash re-render trigger.
//!
//! Each time a panel becomes dominantly visible its flash class is replayed,
//! and a removal is scheduled. A panel re-triggered before its removal fires
//! has the old removal cancelled, so each panel has at most one pending.

#[cfg(test)]
#[path = "rerender_test.rs"]
mod rerender_test;

use crate::config::SnapConfig;
use crate::surface::FlashSurface;
use crate::timer::{Scheduler, TimerSlot, Wake};
use crate::visibility::VisibilityEntry;

/// Per-panel flash state.
#[derive(Debug)]
pub struct RerenderTrigger {
    threshold: f64,
    flash_ms: u32,
    timers: Vec<TimerSlot>,
}

impl RerenderTrigger {
    #[must_use]
    pub fn new(panel_count: usize, config: &SnapConfig) -> Self {
        Self {
            threshold: config.visibility_threshold,
            flash_ms: config.flash_ms,
            timers: (0..panel_count).map(|_| TimerSlot::new()).collect(),
        }
    }

    /// Trigger every entry that is entering view at or above the threshold.
    /// Returns how many panels flashed.
    pub fn on_entries<F, S>(&mut self, entries: &[VisibilityEntry], surface: &mut F, scheduler: &mut S) -> usize
    where
        F: FlashSurface + ?Sized,
        S: Scheduler + ?Sized,
    {
        let mut flashed = 0;
        for entry in entries {
            if entry.is_dominant(self.threshold) && self.trigger(entry.index, surface, scheduler) {
                flashed += 1;
            }
        }
        flashed
    }

    /// Replay the flash on panel `index`. Returns `false` when the panel is
    /// unknown or has no inner content element.
    pub fn trigger<F, S>(&mut self, index: usize, surface: &mut F, scheduler: &mut S) -> bool
    where
        F: FlashSurface + ?Sized,
        S: Scheduler + ?Sized,
    {
        let Some(slot) = self.timers.get_mut(index) else {
            return false;
        };
        if !surface.has_inner(index) {
            return false;
        }
        surface.restart_flash(index);
        slot.reschedule(scheduler, self.flash_ms, Wake::FlashEnd(index));
        log::trace!("flash: panel {index} for {}ms", self.flash_ms);
        true
    }

    /// Remove the flash from panel `index` after its timer fired.
    pub fn on_flash_end<F: FlashSurface + ?Sized>(&mut self, index: usize, surface: &mut F) {
        let Some(slot) = self.timers.get_mut(index) else {
            return;
        };
        slot.fired();
        surface.clear_flash(index);
    }

    /// Whether panel `index` has a pending flash removal.
    #[must_use]
    pub fn is_flashing(&self, index: usize) -> bool {
        self.timers.get(index).is_some_and(TimerSlot::is_pending)
    }

    /// Cancel every pending removal.
    pub fn cancel_all<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        for slot in &mut self.timers {
            slot.cancel(scheduler);
        }
    }
}
