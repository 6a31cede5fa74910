//! Tuning values for the snap controller and re-render trigger.
//!
//! DESIGN
//! ======
//! Defaults come from [`crate::consts`]. A host may overlay per-page values
//! through [`SnapConfig::from_lookup`], which receives a key lookup (the
//! browser host reads `data-{key}` attributes from the scroll root). Bad
//! values never fail the page: they are logged and the default is kept.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    BACKWARD_THRESHOLD, DEBOUNCE_MS, DIRECTION_DEAD_ZONE_PX, FLASH_MS, FORWARD_THRESHOLD, SETTLE_MS,
    VISIBILITY_THRESHOLD,
};

pub const KEY_DEBOUNCE_MS: &str = "snap-debounce-ms";
pub const KEY_SETTLE_MS: &str = "snap-settle-ms";
pub const KEY_FORWARD: &str = "snap-forward";
pub const KEY_BACKWARD: &str = "snap-backward";
pub const KEY_DEAD_ZONE: &str = "snap-dead-zone";
pub const KEY_FLASH_MS: &str = "snap-flash-ms";
pub const KEY_VISIBILITY: &str = "snap-visibility";

/// Error produced when an override cannot be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The raw text did not parse as the expected number type.
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    /// A fraction outside `[0, 1]`.
    #[error("{key} must be within [0, 1], got {value}")]
    OutOfRange { key: &'static str, value: f64 },
    /// A pixel distance that is negative or not finite.
    #[error("{key} must be a non-negative pixel distance, got {value}")]
    NegativeDistance { key: &'static str, value: f64 },
}

/// Timing and threshold configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapConfig {
    /// Quiet period before settling, in milliseconds.
    pub debounce_ms: u32,
    /// Smooth-snap settle delay, in milliseconds. Ignored under reduced motion.
    pub settle_ms: u32,
    /// Inclusive advance threshold when moving forward or at rest.
    pub forward_threshold: f64,
    /// Exclusive advance threshold when moving backward.
    pub backward_threshold: f64,
    /// Deltas at or below this do not update direction.
    pub direction_dead_zone_px: f64,
    /// Flash class lifetime, in milliseconds.
    pub flash_ms: u32,
    /// Visible fraction that triggers a flash.
    pub visibility_threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            settle_ms: SETTLE_MS,
            forward_threshold: FORWARD_THRESHOLD,
            backward_threshold: BACKWARD_THRESHOLD,
            direction_dead_zone_px: DIRECTION_DEAD_ZONE_PX,
            flash_ms: FLASH_MS,
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }
}

impl SnapConfig {
    /// Build a config from defaults plus whatever `lookup` returns per key.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        Self {
            debounce_ms: override_or(&lookup, KEY_DEBOUNCE_MS, base.debounce_ms, parse_ms),
            settle_ms: override_or(&lookup, KEY_SETTLE_MS, base.settle_ms, parse_ms),
            forward_threshold: override_or(&lookup, KEY_FORWARD, base.forward_threshold, parse_fraction),
            backward_threshold: override_or(&lookup, KEY_BACKWARD, base.backward_threshold, parse_fraction),
            direction_dead_zone_px: override_or(&lookup, KEY_DEAD_ZONE, base.direction_dead_zone_px, parse_px),
            flash_ms: override_or(&lookup, KEY_FLASH_MS, base.flash_ms, parse_ms),
            visibility_threshold: override_or(&lookup, KEY_VISIBILITY, base.visibility_threshold, parse_fraction),
        }
    }
}

fn override_or<F, T>(lookup: &F, key: &'static str, default: T, parse: fn(&'static str, &str) -> Result<T, ConfigError>) -> T
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match parse(key, raw.trim()) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{e}; keeping default");
            default
        }
    }
}

/// Parse a millisecond duration.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when `raw` is not an unsigned integer.
pub fn parse_ms(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.parse::<u32>()
        .map_err(|_| ConfigError::Invalid { key, value: raw.to_owned() })
}

/// Parse a fraction in `[0, 1]`.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for non-numbers and
/// [`ConfigError::OutOfRange`] for values outside the unit interval.
pub fn parse_fraction(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| ConfigError::Invalid { key, value: raw.to_owned() })?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange { key, value });
    }
    Ok(value)
}

/// Parse a non-negative pixel distance.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for non-numbers and
/// [`ConfigError::NegativeDistance`] for negative or non-finite values.
pub fn parse_px(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| ConfigError::Invalid { key, value: raw.to_owned() })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::NegativeDistance { key, value });
    }
    Ok(value)
}
