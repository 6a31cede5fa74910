//! Host capabilities the controller depends on.
//!
//! The browser host implements these over the scroll root and the panel
//! elements; tests implement them over plain vectors.

/// How a programmatic scroll should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Animated scroll.
    Smooth,
    /// Jump straight to the target.
    Instant,
}

/// Scroll geometry of the container and its panels.
pub trait ScrollSurface {
    /// Current vertical scroll offset of the container, in pixels.
    fn scroll_top(&self) -> f64;

    /// Top offset of every panel relative to the container, in panel order.
    ///
    /// Read fresh on every call; layout may have shifted since the last one.
    fn panel_starts(&self) -> Vec<f64>;

    /// Scroll the container so its top edge sits at `top`.
    fn scroll_to(&mut self, top: f64, motion: Motion);
}

/// Flash class control on each panel and its inner content element.
pub trait FlashSurface {
    /// Whether the panel at `index` has an inner content element.
    fn has_inner(&self, index: usize) -> bool;

    /// Remove the flash class from the panel and its inner element, force a
    /// layout read, then add the class back so the animation restarts.
    fn restart_flash(&mut self, index: usize);

    /// Remove the flash class from the panel and its inner element.
    fn clear_flash(&mut self, index: usize);
}
