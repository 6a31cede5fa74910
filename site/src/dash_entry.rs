//! One-shot dashboard entry animation.
//!
//! Links marked `data-go-dashboard` leave a flag in session storage; the
//! dashboard page consumes it once to decide whether to play its opening
//! animation. Storage failures mean no animation, never an error.

#[cfg(test)]
#[path = "dash_entry_test.rs"]
mod dash_entry_test;

use crate::storage::KvStore;

pub const FLAG_KEY: &str = "dash-open";
pub const FLAG_VALUE: &str = "1";
pub const LINK_SELECTOR: &str = "[data-go-dashboard]";
pub const PAGE_CLASS: &str = "pageDash";
pub const ENTRY_CLASS: &str = "dashStartAnim";

/// Record that the next dashboard load came from a navigation link.
pub fn mark<K: KvStore + ?Sized>(store: &mut K) {
    if let Err(e) = store.set(FLAG_KEY, FLAG_VALUE) {
        log::debug!("dashboard flag not set: {e}");
    }
}

/// Consume the flag. Returns whether the entry animation should play.
///
/// The flag is removed only when it was set; a failed removal still plays.
pub fn take<K: KvStore + ?Sized>(store: &mut K) -> bool {
    match store.get(FLAG_KEY) {
        Ok(Some(value)) if value == FLAG_VALUE => {
            if let Err(e) = store.remove(FLAG_KEY) {
                log::debug!("dashboard flag not cleared: {e}");
            }
            true
        }
        Ok(_) => false,
        Err(e) => {
            log::debug!("dashboard flag unreadable: {e}");
            false
        }
    }
}
