//! Section-by-section scroll snapping for a scrollable stack of panels.
//!
//! This crate holds everything that can be decided without a browser: scroll
//! bookkeeping, the settle decision that picks a target panel once scrolling
//! pauses, the controller that animates to that panel, and the "flash"
//! re-render trigger that replays on whichever panel becomes dominantly
//! visible. The host (the `site` crate in the browser) supplies geometry and
//! timers through the traits in [`surface`] and [`timer`], and feeds scroll,
//! timer and visibility events back in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::SnapController`], the single owner of scroll state |
//! | [`settle`] | Segment scan and direction-dependent hysteresis |
//! | [`rerender`] | Flash re-render trigger with one pending removal per panel |
//! | [`visibility`] | Visibility entries and a geometry-polling source |
//! | [`timer`] | Cancellable timer slots, the scheduler seam, and a virtual clock |
//! | [`surface`] | Host capabilities: scroll geometry and flash classes |
//! | [`config`] | Tuning values with overrides |
//! | [`consts`] | Default tuning constants |

pub mod config;
pub mod consts;
pub mod controller;
pub mod rerender;
pub mod settle;
pub mod surface;
pub mod timer;
pub mod visibility;
