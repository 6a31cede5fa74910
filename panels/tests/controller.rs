//! Controller scenarios driven by a virtual clock and an in-memory surface.
#![allow(clippy::float_cmp)]

use pretty_assertions::assert_eq;

use panels::config::SnapConfig;
use panels::controller::SnapController;
use panels::settle::Direction;
use panels::surface::{FlashSurface, Motion, ScrollSurface};
use panels::timer::{Scheduler, VirtualClock};
use panels::visibility::{PanelRect, PollingVisibility, VisibilityEntry};

// =============================================================
// Harness
// =============================================================

struct FakeSurface {
    starts: Vec<f64>,
    top: f64,
    scrolls: Vec<(f64, Motion)>,
    has_inner: Vec<bool>,
    flashing: Vec<bool>,
}

impl FakeSurface {
    fn new(starts: &[f64], top: f64) -> Self {
        Self {
            starts: starts.to_vec(),
            top,
            scrolls: Vec::new(),
            has_inner: vec![true; starts.len()],
            flashing: vec![false; starts.len()],
        }
    }
}

impl ScrollSurface for FakeSurface {
    fn scroll_top(&self) -> f64 {
        self.top
    }

    fn panel_starts(&self) -> Vec<f64> {
        self.starts.clone()
    }

    fn scroll_to(&mut self, top: f64, motion: Motion) {
        self.scrolls.push((top, motion));
        self.top = top;
    }
}

impl FlashSurface for FakeSurface {
    fn has_inner(&self, index: usize) -> bool {
        self.has_inner[index]
    }

    fn restart_flash(&mut self, index: usize) {
        self.flashing[index] = true;
    }

    fn clear_flash(&mut self, index: usize) {
        self.flashing[index] = false;
    }
}

type Controller = SnapController<FakeSurface, VirtualClock>;

fn controller(starts: &[f64], top: f64) -> Controller {
    SnapController::new(FakeSurface::new(starts, top), VirtualClock::new(), SnapConfig::default(), false)
}

fn reduced(starts: &[f64], top: f64) -> Controller {
    SnapController::new(FakeSurface::new(starts, top), VirtualClock::new(), SnapConfig::default(), true)
}

/// Simulate the user scrolling the container to `top`.
fn user_scroll(ctl: &mut Controller, top: f64) {
    ctl.surface_mut().top = top;
    ctl.on_scroll();
}

/// Advance virtual time, delivering every timer that comes due.
fn advance(ctl: &mut Controller, ms: u64) {
    let deadline = ctl.scheduler().now_ms() + ms;
    while let Some((_, wake)) = ctl.scheduler_mut().pop_due(deadline) {
        ctl.on_wake(wake);
    }
    ctl.scheduler_mut().set_now(deadline);
}

const THREE: [f64; 3] = [0.0, 800.0, 1600.0];

// =============================================================
// snap_to_panel
// =============================================================

#[test]
fn snap_to_panel_clamps_for_every_panel_count() {
    for count in 1..=5 {
        let starts: Vec<f64> = (0..count).map(|i| f64::from(i) * 500.0).collect();
        let last = usize::try_from(count - 1).unwrap();
        let mut ctl = controller(&starts, 0.0);

        assert_eq!(ctl.snap_to_panel(-4), Some(0));
        assert_eq!(ctl.snap_to_panel(99), Some(last));
        assert_eq!(ctl.snap_to_panel(isize::MAX), Some(last));
        assert_eq!(ctl.surface().top, starts[last]);
    }
}

#[test]
fn snap_sets_snapping_until_settle_delay_elapses() {
    let mut ctl = controller(&THREE, 0.0);
    ctl.snap_to_panel(1);
    assert!(ctl.state().snapping);
    assert_eq!(ctl.surface().scrolls, vec![(800.0, Motion::Smooth)]);

    advance(&mut ctl, 419);
    assert!(ctl.state().snapping);
    advance(&mut ctl, 1);
    assert!(!ctl.state().snapping);
    assert_eq!(ctl.state().last_scroll_top, 800.0);
}

#[test]
fn snap_resyncs_to_actual_offset() {
    let mut ctl = controller(&THREE, 0.0);
    ctl.snap_to_panel(2);
    // The browser may land a little short of the target.
    ctl.surface_mut().top = 1598.0;
    advance(&mut ctl, 420);
    assert_eq!(ctl.state().last_scroll_top, 1598.0);
}

#[test]
fn repeated_snap_keeps_one_settle_timer() {
    let mut ctl = controller(&THREE, 0.0);
    ctl.snap_to_panel(1);
    advance(&mut ctl, 200);
    ctl.snap_to_panel(2);
    assert_eq!(ctl.scheduler().pending_count(), 1);
    advance(&mut ctl, 419);
    assert!(ctl.state().snapping);
    advance(&mut ctl, 1);
    assert!(!ctl.state().snapping);
}

#[test]
fn no_panels_never_scrolls() {
    let mut ctl = controller(&[], 0.0);
    assert_eq!(ctl.snap_to_panel(0), None);
    user_scroll(&mut ctl, 40.0);
    advance(&mut ctl, 1_000);
    assert!(ctl.surface().scrolls.is_empty());
    assert!(!ctl.state().snapping);
}

// =============================================================
// Settle decisions
// =============================================================

#[test]
fn forward_scroll_past_threshold_advances() {
    let mut ctl = controller(&THREE, 0.0);
    user_scroll(&mut ctl, 100.0);
    user_scroll(&mut ctl, 280.0);
    advance(&mut ctl, 120);
    assert_eq!(ctl.surface().scrolls, vec![(800.0, Motion::Smooth)]);
}

#[test]
fn forward_scroll_short_of_threshold_returns() {
    let mut ctl = controller(&THREE, 0.0);
    user_scroll(&mut ctl, 100.0);
    user_scroll(&mut ctl, 272.0);
    advance(&mut ctl, 120);
    assert_eq!(ctl.surface().scrolls, vec![(0.0, Motion::Smooth)]);
}

#[test]
fn backward_scroll_at_threshold_goes_to_segment_start() {
    let mut ctl = controller(&THREE, 800.0);
    user_scroll(&mut ctl, 700.0);
    user_scroll(&mut ctl, 520.0);
    assert_eq!(ctl.state().last_direction, Direction::Backward);
    advance(&mut ctl, 120);
    assert_eq!(ctl.surface().scrolls, vec![(0.0, Motion::Smooth)]);
}

#[test]
fn backward_scroll_barely_moved_returns_forward() {
    let mut ctl = controller(&THREE, 800.0);
    user_scroll(&mut ctl, 700.0);
    user_scroll(&mut ctl, 521.0);
    advance(&mut ctl, 120);
    assert_eq!(ctl.surface().scrolls, vec![(800.0, Motion::Smooth)]);
}

#[test]
fn past_last_panel_clamps_to_last() {
    let mut ctl = controller(&THREE, 1600.0);
    user_scroll(&mut ctl, 1700.0);
    advance(&mut ctl, 120);
    assert_eq!(ctl.surface().scrolls, vec![(1600.0, Motion::Smooth)]);
}

#[test]
fn single_panel_always_snaps_to_it() {
    for top in [0.0, 120.0, 5_000.0] {
        let mut ctl = controller(&[0.0], 0.0);
        user_scroll(&mut ctl, top);
        advance(&mut ctl, 120);
        assert_eq!(ctl.surface().scrolls, vec![(0.0, Motion::Smooth)]);
    }
}

#[test]
fn dead_zone_jitter_keeps_direction() {
    let mut ctl = controller(&THREE, 800.0);
    user_scroll(&mut ctl, 600.0);
    user_scroll(&mut ctl, 601.0);
    assert_eq!(ctl.state().last_direction, Direction::Backward);
    assert_eq!(ctl.state().last_scroll_top, 601.0);
}

// =============================================================
// Debounce
// =============================================================

#[test]
fn settle_waits_for_quiet_period() {
    let mut ctl = controller(&THREE, 0.0);
    for step in 1..=5 {
        user_scroll(&mut ctl, f64::from(step) * 60.0);
        advance(&mut ctl, 100);
        assert!(ctl.surface().scrolls.is_empty(), "settled early at step {step}");
    }
    assert_eq!(ctl.scheduler().pending_count(), 1);
    advance(&mut ctl, 20);
    assert_eq!(ctl.surface().scrolls, vec![(800.0, Motion::Smooth)]);
}

#[test]
fn settle_is_suppressed_while_snapping() {
    let mut ctl = controller(&THREE, 0.0);
    ctl.snap_to_panel(1);

    // Scroll events from the animation itself.
    user_scroll(&mut ctl, 810.0);
    assert_eq!(ctl.state().last_scroll_top, 810.0);
    assert_eq!(ctl.state().last_direction, Direction::Forward);

    advance(&mut ctl, 120);
    assert_eq!(ctl.surface().scrolls.len(), 1);
    assert!(ctl.state().snapping);
}

#[test]
fn direct_settle_while_snapping_is_noop() {
    let mut ctl = controller(&THREE, 0.0);
    ctl.snap_to_panel(2);
    ctl.settle_scroll_position();
    assert_eq!(ctl.surface().scrolls.len(), 1);
}

// =============================================================
// Reduced motion
// =============================================================

#[test]
fn reduced_motion_snaps_instantly() {
    let mut ctl = reduced(&THREE, 0.0);
    user_scroll(&mut ctl, 400.0);
    advance(&mut ctl, 119);
    assert!(ctl.surface().scrolls.is_empty());

    // The zero-delay resync lands in the same tick as the settle.
    advance(&mut ctl, 1);
    assert_eq!(ctl.surface().scrolls, vec![(800.0, Motion::Instant)]);
    assert!(!ctl.state().snapping);
    assert_eq!(ctl.scheduler().pending_count(), 0);
}

#[test]
fn reduced_motion_schedules_zero_delay_resync() {
    let mut ctl = reduced(&THREE, 0.0);
    ctl.snap_to_panel(1);
    assert!(ctl.state().snapping);
    assert_eq!(ctl.scheduler().next_due(), Some(0));
}

#[test]
fn animated_snap_schedules_resync_after_settle_delay() {
    let mut ctl = controller(&THREE, 0.0);
    assert_eq!(ctl.snap_to_panel(2), Some(2));
    assert!(ctl.state().snapping);
    assert_eq!(ctl.surface().scrolls, vec![(1600.0, Motion::Smooth)]);
    assert_eq!(ctl.scheduler().next_due(), Some(420));

    advance(&mut ctl, 419);
    assert!(ctl.state().snapping);
    advance(&mut ctl, 1);
    assert!(!ctl.state().snapping);
    assert_eq!(ctl.state().last_scroll_top, 1600.0);
}

#[test]
fn reduced_motion_disables_flash() {
    let mut ctl = reduced(&THREE, 0.0);
    assert!(ctl.rerender().is_none());
    let entry = VisibilityEntry { index: 0, ratio: 1.0, is_intersecting: true };
    assert_eq!(ctl.on_visibility(&[entry]), 0);
    assert!(!ctl.surface().flashing[0]);
}

// =============================================================
// Flash
// =============================================================

#[test]
fn visible_panel_flashes_for_flash_duration() {
    let mut ctl = controller(&THREE, 0.0);
    let entry = VisibilityEntry { index: 1, ratio: 0.7, is_intersecting: true };
    assert_eq!(ctl.on_visibility(&[entry]), 1);
    assert!(ctl.surface().flashing[1]);
    advance(&mut ctl, 620);
    assert!(!ctl.surface().flashing[1]);
}

#[test]
fn retriggered_flash_removes_once_after_latest_trigger() {
    let mut ctl = controller(&THREE, 0.0);
    let entry = VisibilityEntry { index: 0, ratio: 0.9, is_intersecting: true };
    ctl.on_visibility(&[entry]);
    advance(&mut ctl, 500);
    ctl.on_visibility(&[entry]);
    advance(&mut ctl, 619);
    assert!(ctl.surface().flashing[0]);
    advance(&mut ctl, 1);
    assert!(!ctl.surface().flashing[0]);
}

#[test]
fn polling_source_drives_flash_while_scrolling() {
    let mut ctl = controller(&THREE, 0.0);
    let rects: Vec<PanelRect> = THREE.iter().map(|&top| PanelRect::new(top, 800.0)).collect();
    let mut source = PollingVisibility::new(ctl.config().visibility_threshold);

    let initial = source.poll(&rects, 0.0, 800.0);
    assert_eq!(ctl.on_visibility(&initial), 1);

    let entries = source.poll(&rects, 700.0, 800.0);
    assert_eq!(ctl.on_visibility(&entries), 1);
    assert!(ctl.surface().flashing[1]);
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn teardown_cancels_every_timer() {
    let mut ctl = controller(&THREE, 0.0);
    user_scroll(&mut ctl, 300.0);
    ctl.snap_to_panel(1);
    ctl.on_visibility(&[VisibilityEntry { index: 2, ratio: 1.0, is_intersecting: true }]);
    assert_eq!(ctl.scheduler().pending_count(), 3);

    ctl.teardown();
    assert_eq!(ctl.scheduler().pending_count(), 0);
    assert!(!ctl.state().snapping);
    assert!(!ctl.is_settle_pending());
}

#[test]
fn scheduler_trait_object_is_usable() {
    let mut clock = VirtualClock::new();
    let scheduler: &mut dyn Scheduler = &mut clock;
    let id = scheduler.schedule(5, panels::timer::Wake::Settle);
    scheduler.cancel(id);
    assert_eq!(clock.pending_count(), 0);
}
