//! Light/dark theme toggle.
//!
//! The active theme is reflected as `data-theme` on `<body>`, and the toggle
//! button advertises the theme it would switch *to*. The choice is persisted
//! to local storage under [`STORAGE_KEY`].
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: if storage is blocked the theme still applies
//! for the current page, it just is not remembered.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::storage::KvStore;

pub const STORAGE_KEY: &str = "hobbies-theme";
pub const ATTRIBUTE: &str = "data-theme";
pub const BUTTON_ID: &str = "modeBtn";

/// Value used when neither storage nor the page names a theme.
const INITIAL_FALLBACK: &str = "light";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Anything other than exactly `"light"` is dark.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        if raw == "light" { Self::Light } else { Self::Dark }
    }

    /// Pick the startup theme: stored value, then the page attribute, then
    /// light. Empty strings are skipped like missing values.
    #[must_use]
    pub fn resolve_initial(stored: Option<&str>, attribute: Option<&str>) -> Self {
        let raw = [stored, attribute]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .unwrap_or(INITIAL_FALLBACK);
        Self::normalize(raw)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// How the toggle button looks while this theme is active.
    #[must_use]
    pub fn button_face(self) -> ButtonFace {
        let next = self.other();
        ButtonFace {
            glyph: match next {
                Self::Dark => "\u{263E}",
                Self::Light => "\u{2600}",
            },
            aria_label: format!("Switch to {} theme", next.as_str()),
            aria_pressed: if self == Self::Light { "true" } else { "false" },
        }
    }
}

/// Text and aria state of the toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonFace {
    pub glyph: &'static str,
    pub aria_label: String,
    pub aria_pressed: &'static str,
}

/// Read the startup theme, ignoring storage failures.
pub fn load<K: KvStore + ?Sized>(store: &K, attribute: Option<&str>) -> Theme {
    let stored = store.get(STORAGE_KEY).unwrap_or_else(|e| {
        log::debug!("theme not restored: {e}");
        None
    });
    Theme::resolve_initial(stored.as_deref(), attribute)
}

/// Flip `current` and persist the result. The new theme is returned even if
/// it could not be saved.
pub fn toggle<K: KvStore + ?Sized>(store: &mut K, current: Theme) -> Theme {
    let next = current.other();
    if let Err(e) = store.set(STORAGE_KEY, next.as_str()) {
        log::debug!("theme not saved: {e}");
    }
    next
}

/// Apply `theme` to `<body>` and the toggle button.
#[cfg(feature = "browser")]
pub fn apply(body: &web_sys::Element, button: Option<&web_sys::Element>, theme: Theme) {
    use crate::dom::set_attr;

    set_attr(body, ATTRIBUTE, theme.as_str());
    if let Some(button) = button {
        let face = theme.button_face();
        button.set_text_content(Some(face.glyph));
        set_attr(button, "aria-label", &face.aria_label);
        set_attr(button, "aria-pressed", face.aria_pressed);
    }
}
