//! Visibility entries and a geometry-polling visibility source.
//!
//! The browser host gets entries from an `IntersectionObserver` rooted at the
//! scroll container. [`PollingVisibility`] produces the same entries from
//! plain geometry, for tests and hosts without an observer. Either way the
//! entries go to [`crate::controller::SnapController::on_visibility`].

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

/// One panel's visibility at the moment it crossed the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    /// Panel index.
    pub index: usize,
    /// Visible fraction of the panel, `0.0..=1.0`.
    pub ratio: f64,
    /// Whether any part of the panel is inside the viewport.
    pub is_intersecting: bool,
}

impl VisibilityEntry {
    /// True when the panel is entering view at or above `threshold`.
    #[must_use]
    pub fn is_dominant(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// Vertical extent of a panel relative to the scroll content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub top: f64,
    pub height: f64,
}

impl PanelRect {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Fraction of `panel` inside the viewport `[view_top, view_top + view_height]`.
///
/// A zero-height panel counts as fully visible when its edge is inside the
/// viewport.
#[must_use]
pub fn visible_fraction(panel: PanelRect, view_top: f64, view_height: f64) -> f64 {
    let view_bottom = view_top + view_height.max(0.0);
    if panel.height <= 0.0 {
        return if (view_top..=view_bottom).contains(&panel.top) { 1.0 } else { 0.0 };
    }
    let overlap = (panel.top + panel.height).min(view_bottom) - panel.top.max(view_top);
    (overlap.max(0.0) / panel.height).clamp(0.0, 1.0)
}

/// Emits an entry whenever a panel's ratio crosses `threshold`, in either
/// direction, plus one initial entry per panel on the first poll.
#[derive(Debug, Clone)]
pub struct PollingVisibility {
    threshold: f64,
    above: Vec<Option<bool>>,
}

impl PollingVisibility {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold, above: Vec::new() }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compare the current geometry with the previous poll.
    pub fn poll(&mut self, panels: &[PanelRect], view_top: f64, view_height: f64) -> Vec<VisibilityEntry> {
        self.above.resize(panels.len(), None);
        let mut entries = Vec::new();
        for (index, panel) in panels.iter().enumerate() {
            let ratio = visible_fraction(*panel, view_top, view_height);
            let above = ratio >= self.threshold;
            if self.above[index] != Some(above) {
                self.above[index] = Some(above);
                let is_intersecting = ratio > 0.0 || (panel.height <= 0.0 && above);
                entries.push(VisibilityEntry { index, ratio, is_intersecting });
            }
        }
        entries
    }
}
