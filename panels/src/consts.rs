//! Default tuning constants for snapping and the re-render flash.

// ── Scroll settle ───────────────────────────────────────────────

/// Quiet period after the last scroll event before the settle decision runs.
pub const DEBOUNCE_MS: u32 = 120;

/// How long a smooth snap animation is assumed to take before scroll
/// bookkeeping resumes.
pub const SETTLE_MS: u32 = 420;

/// Scroll deltas at or below this many pixels do not change direction.
pub const DIRECTION_DEAD_ZONE_PX: f64 = 1.0;

/// Progress at which a forward (or resting) scroll advances to the next panel.
/// Inclusive.
pub const FORWARD_THRESHOLD: f64 = 0.35;

/// Progress a backward scroll must exceed before it advances instead of
/// returning to the segment start. Exclusive.
pub const BACKWARD_THRESHOLD: f64 = 0.65;

/// Segment lengths are floored to this many pixels before dividing.
pub const MIN_SEGMENT_PX: f64 = 1.0;

// ── Re-render flash ─────────────────────────────────────────────

/// Lifetime of the flash class after each trigger.
pub const FLASH_MS: u32 = 620;

/// Visible fraction a panel must reach to count as dominantly visible.
pub const VISIBILITY_THRESHOLD: f64 = 0.62;
