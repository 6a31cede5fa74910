//! Dashboard dropdown menu open/closed state.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

pub const TRIGGER_ID: &str = "menuList-toggle";
pub const MENU_ID: &str = "menuList";
pub const OPEN_CLASS: &str = "openNow";

/// Input the menu reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// Click on the trigger button.
    TriggerClick,
    /// Click that reached the document (outside the trigger and menu).
    OutsideClick,
    /// `keydown` anywhere, with the browser's key name.
    Key(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    #[must_use]
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Value for the trigger's `aria-expanded`.
    #[must_use]
    pub fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Apply `event` and return the new state.
    #[must_use]
    pub fn handle(self, event: &MenuEvent) -> Self {
        let open = match event {
            MenuEvent::TriggerClick => !self.open,
            MenuEvent::OutsideClick => false,
            MenuEvent::Key(key) if key == "Escape" => false,
            MenuEvent::Key(_) => self.open,
        };
        Self { open }
    }
}
