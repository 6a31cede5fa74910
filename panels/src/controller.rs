//! The snap controller: sole owner of scroll state.
//!
//! ARCHITECTURE
//! ============
//! The host constructs one [`SnapController`] with its dependencies (scroll
//! surface, scheduler, config, reduced-motion flag) and forwards three kinds
//! of events into it:
//!
//! - scroll events → [`SnapController::on_scroll`]
//! - fired timers → [`SnapController::on_wake`]
//! - visibility entries → [`SnapController::on_visibility`]
//!
//! Everything runs on one thread. The `snapping` flag is the only exclusion:
//! while a programmatic snap is in flight, scroll events still update
//! bookkeeping but the settle decision does nothing, so the snap's own scroll
//! events cannot start another snap.

use crate::config::SnapConfig;
use crate::rerender::RerenderTrigger;
use crate::settle::{ScrollState, clamp_index, resolve_target};
use crate::surface::{FlashSurface, Motion, ScrollSurface};
use crate::timer::{Scheduler, TimerSlot, Wake};
use crate::visibility::VisibilityEntry;

/// Keeps a scroll container aligned to panel boundaries.
#[derive(Debug)]
pub struct SnapController<S, T> {
    surface: S,
    scheduler: T,
    config: SnapConfig,
    reduced_motion: bool,
    state: ScrollState,
    debounce: TimerSlot,
    settle: TimerSlot,
    rerender: Option<RerenderTrigger>,
}

impl<S, T> SnapController<S, T>
where
    S: ScrollSurface + FlashSurface,
    T: Scheduler,
{
    /// Create a controller, reading the initial offset from `surface`.
    ///
    /// Under reduced motion snaps are instant and the flash trigger is not
    /// created at all.
    pub fn new(surface: S, scheduler: T, config: SnapConfig, reduced_motion: bool) -> Self {
        let state = ScrollState::new(surface.scroll_top());
        let rerender = (!reduced_motion).then(|| RerenderTrigger::new(surface.panel_starts().len(), &config));
        Self {
            surface,
            scheduler,
            config,
            reduced_motion,
            state,
            debounce: TimerSlot::new(),
            settle: TimerSlot::new(),
            rerender,
        }
    }

    // --- Event inputs ---

    /// Record the new offset and restart the settle debounce.
    pub fn on_scroll(&mut self) {
        let top = self.surface.scroll_top();
        self.state.observe(top, self.config.direction_dead_zone_px);
        self.debounce.reschedule(&mut self.scheduler, self.config.debounce_ms, Wake::Settle);
        log::trace!("scroll: top={top} direction={:?}", self.state.last_direction);
    }

    /// Dispatch a fired timer.
    pub fn on_wake(&mut self, wake: Wake) {
        match wake {
            Wake::Settle => {
                self.debounce.fired();
                self.settle_scroll_position();
            }
            Wake::SnapDone => {
                self.settle.fired();
                self.finish_snap();
            }
            Wake::FlashEnd(index) => {
                if let Some(rerender) = self.rerender.as_mut() {
                    rerender.on_flash_end(index, &mut self.surface);
                }
            }
        }
    }

    /// Replay the flash on panels that became dominantly visible.
    /// Returns how many panels flashed.
    pub fn on_visibility(&mut self, entries: &[VisibilityEntry]) -> usize {
        match self.rerender.as_mut() {
            Some(rerender) => rerender.on_entries(entries, &mut self.surface, &mut self.scheduler),
            None => 0,
        }
    }

    // --- Operations ---

    /// Decide where to snap now that scrolling has paused.
    /// No-op while a snap is already in flight.
    pub fn settle_scroll_position(&mut self) {
        if self.state.snapping {
            log::trace!("settle skipped: snap in flight");
            return;
        }
        let starts = self.surface.panel_starts();
        let top = self.surface.scroll_top();
        let Some(target) = resolve_target(&starts, top, self.state.last_direction, &self.config) else {
            return;
        };
        self.snap_to_panel(isize::try_from(target).unwrap_or(isize::MAX));
    }

    /// Scroll to the panel at `target`, clamped into range, and mark the snap
    /// in flight until the settle delay elapses.
    ///
    /// Returns the panel actually targeted, or `None` when there are no panels.
    pub fn snap_to_panel(&mut self, target: isize) -> Option<usize> {
        let starts = self.surface.panel_starts();
        let index = clamp_index(target, starts.len())?;
        let top = starts[index];

        let delay = self.settle_delay_ms();
        self.state.snapping = true;
        self.surface.scroll_to(top, self.motion());
        self.settle.reschedule(&mut self.scheduler, delay, Wake::SnapDone);
        log::debug!("snap: panel {index} at top={top} ({:?})", self.motion());
        Some(index)
    }

    /// Cancel every pending timer. The controller stays usable.
    pub fn teardown(&mut self) {
        self.debounce.cancel(&mut self.scheduler);
        self.settle.cancel(&mut self.scheduler);
        if let Some(rerender) = self.rerender.as_mut() {
            rerender.cancel_all(&mut self.scheduler);
        }
        self.state.snapping = false;
    }

    fn finish_snap(&mut self) {
        self.state.snapping = false;
        self.state.last_scroll_top = self.surface.scroll_top();
    }

    fn motion(&self) -> Motion {
        if self.reduced_motion { Motion::Instant } else { Motion::Smooth }
    }

    fn settle_delay_ms(&self) -> u32 {
        if self.reduced_motion { 0 } else { self.config.settle_ms }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    #[must_use]
    pub fn rerender(&self) -> Option<&RerenderTrigger> {
        self.rerender.as_ref()
    }

    #[must_use]
    pub fn is_settle_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }
}
