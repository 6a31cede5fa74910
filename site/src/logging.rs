//! Console logging setup.
//!
//! The level comes from `data-log-level` on `<body>` so a page can be
//! debugged without rebuilding; anything unrecognised means [`DEFAULT_LEVEL`].

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

use log::Level;

pub const LEVEL_ATTRIBUTE: &str = "data-log-level";
pub const DEFAULT_LEVEL: Level = Level::Warn;

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`, any case).
#[must_use]
pub fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|value| value.trim().parse::<Level>().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Level requested by the current page.
#[cfg(feature = "browser")]
#[must_use]
pub fn level_from_page() -> Level {
    let attribute = crate::dom::body().and_then(|body| body.get_attribute(LEVEL_ATTRIBUTE));
    parse_level(attribute.as_deref())
}

/// Route `log` output to the browser console.
#[cfg(feature = "browser")]
pub fn init(level: Level) {
    if let Err(e) = console_log::init_with_level(level) {
        // Only fails when a logger is already installed.
        web_sys::console::warn_1(&format!("logger not installed: {e}").into());
    }
}
