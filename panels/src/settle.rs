//! Scroll bookkeeping and the settle decision.
//!
//! DESIGN
//! ======
//! Native scrolling is continuous. Once it pauses, the current offset is
//! placed in a *segment* (the half-open interval between two consecutive
//! panel starts) and the fractional progress through that segment decides
//! whether to snap back to its start or forward to the next panel. The
//! threshold depends on the last observed direction so that a user resting
//! near a boundary does not bounce between two panels.

#[cfg(test)]
#[path = "settle_test.rs"]
mod settle_test;

use crate::config::SnapConfig;
use crate::consts::MIN_SEGMENT_PX;

/// Last observed scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Offset decreasing (towards earlier panels).
    Backward,
    /// No movement observed outside the dead zone yet.
    #[default]
    Neutral,
    /// Offset increasing (towards later panels).
    Forward,
}

impl Direction {
    /// Direction implied by `delta`, or `None` when `|delta|` is within the
    /// dead zone.
    #[must_use]
    pub fn from_delta(delta: f64, dead_zone_px: f64) -> Option<Self> {
        if delta.abs() <= dead_zone_px {
            return None;
        }
        Some(if delta > 0.0 { Self::Forward } else { Self::Backward })
    }
}

/// Mutable scroll bookkeeping owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Offset seen at the last scroll event or snap resync.
    pub last_scroll_top: f64,
    /// Direction of the last movement larger than the dead zone.
    pub last_direction: Direction,
    /// True while a programmatic snap is in flight.
    pub snapping: bool,
}

impl ScrollState {
    #[must_use]
    pub fn new(scroll_top: f64) -> Self {
        Self { last_scroll_top: scroll_top, last_direction: Direction::Neutral, snapping: false }
    }

    /// Record a new offset. Direction changes only outside the dead zone;
    /// the offset is always recorded.
    pub fn observe(&mut self, scroll_top: f64, dead_zone_px: f64) {
        let delta = scroll_top - self.last_scroll_top;
        if let Some(direction) = Direction::from_delta(delta, dead_zone_px) {
            self.last_direction = direction;
        }
        self.last_scroll_top = scroll_top;
    }
}

/// Where an offset falls among the panel starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Index of the panel whose start opens the segment.
    pub index: usize,
    /// `0.0` at the segment start, `1.0` at the next panel start.
    pub progress: f64,
}

/// Find the segment containing `scroll_top` by scanning from the first panel.
///
/// The last segment is used when no later start exceeds the offset. In the
/// last segment the "next start" is the segment start itself, so progress is
/// measured against the minimum segment length.
#[must_use]
pub fn locate_segment(starts: &[f64], scroll_top: f64) -> Option<Segment> {
    let last = starts.len().checked_sub(1)?;
    let index = starts
        .windows(2)
        .position(|pair| scroll_top < pair[1])
        .unwrap_or(last);

    let start = starts[index];
    let next_start = starts[(index + 1).min(last)];
    let distance = (next_start - start).max(MIN_SEGMENT_PX);
    Some(Segment { index, progress: (scroll_top - start) / distance })
}

/// Pick the panel to snap to once scrolling has settled.
///
/// The result may be one past the last panel; the snap clamps it.
/// Returns `None` when there are no panels.
#[must_use]
pub fn resolve_target(starts: &[f64], scroll_top: f64, direction: Direction, config: &SnapConfig) -> Option<usize> {
    if starts.len() == 1 {
        return Some(0);
    }
    let segment = locate_segment(starts, scroll_top)?;
    let advance = match direction {
        Direction::Backward => segment.progress > config.backward_threshold,
        Direction::Neutral | Direction::Forward => segment.progress >= config.forward_threshold,
    };
    let target = if advance { segment.index + 1 } else { segment.index };
    log::debug!(
        "settle: top={scroll_top} segment={} progress={:.3} direction={direction:?} -> {target}",
        segment.index,
        segment.progress
    );
    Some(target)
}

/// Clamp `target` into `[0, count - 1]`. `None` when `count` is zero.
#[must_use]
pub fn clamp_index(target: isize, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    Some(usize::try_from(target).map_or(0, |t| t.min(last)))
}
