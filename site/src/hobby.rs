//! Hobby detail page content.
//!
//! The detail page is one static template; the `h` query parameter picks
//! which hobby it shows. Unknown or blank names never fail: they get the
//! default progress and goals.

#[cfg(test)]
#[path = "hobby_test.rs"]
mod hobby_test;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

pub const QUERY_PARAM: &str = "h";
pub const DEFAULT_NAME: &str = "Hobby Focus";

pub const NAME_SELECTOR: &str = "[data-hobby-name]";
pub const GOAL_SELECTOR: &str = "[data-hobby-goal]";
pub const PROGRESS_SELECTOR: &str = "[data-hobby-prog]";
pub const PROGRESS_LABEL_SELECTOR: &str = "[data-hobby-prog-label]";
pub const GOALS_SELECTOR: &str = "[data-hobby-goals]";

const CATALOG_JSON: &str = include_str!("../assets/hobbies.json");

/// Progress and ordered goals for one hobby.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HobbyEntry {
    pub progress: u8,
    pub goals: Vec<String>,
}

impl HobbyEntry {
    /// Entry used for names that are not in the catalog.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            progress: 50,
            goals: vec!["Set first goal".to_owned(), "Track progress daily".to_owned()],
        }
    }
}

/// Fixed table of hobbies keyed by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, HobbyEntry>,
}

impl Catalog {
    /// Parse a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The catalog shipped with the site. An unparseable asset degrades to an
    /// empty catalog, so every hobby shows the default entry.
    pub fn embedded() -> &'static Self {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Self::parse(CATALOG_JSON).unwrap_or_else(|e| {
                log::error!("hobby catalog is invalid: {e}");
                Self::default()
            })
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HobbyEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Resolve the raw `h` query value into what the page should show.
    #[must_use]
    pub fn resolve(&self, query: Option<&str>) -> HobbyDetail {
        let name = query
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_NAME);
        let entry = self.get(name).cloned().unwrap_or_else(HobbyEntry::fallback);
        HobbyDetail { name: name.to_owned(), progress: entry.progress, goals: entry.goals }
    }
}

/// Everything the detail page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HobbyDetail {
    pub name: String,
    pub progress: u8,
    pub goals: Vec<String>,
}

impl HobbyDetail {
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} | Hobby Tracker", self.name)
    }

    #[must_use]
    pub fn goal_line(&self) -> String {
        format!("Goal: Keep daily focused work in {} and finish current milestone.", self.name)
    }

    /// Used both as the bar's CSS width and as its label.
    #[must_use]
    pub fn progress_percent(&self) -> String {
        format!("{}%", self.progress)
    }
}

/// Resolve against the embedded catalog.
#[must_use]
pub fn resolve(query: Option<&str>) -> HobbyDetail {
    Catalog::embedded().resolve(query)
}

/// Fill the detail page. Inert unless `[data-hobby-name]` exists.
#[cfg(feature = "browser")]
pub fn fill(doc: &web_sys::Document, query: Option<&str>) {
    use wasm_bindgen::JsCast;

    use crate::dom::{log_js_error, query_one};

    let Some(name_el) = query_one(doc, NAME_SELECTOR) else {
        return;
    };
    let detail = resolve(query);
    log::debug!("hobby detail: {} ({}%)", detail.name, detail.progress);

    name_el.set_text_content(Some(&detail.name));
    doc.set_title(&detail.title());

    if let Some(goal) = query_one(doc, GOAL_SELECTOR) {
        goal.set_text_content(Some(&detail.goal_line()));
    }
    let percent = detail.progress_percent();
    if let Some(bar) = query_one(doc, PROGRESS_SELECTOR).and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok()) {
        log_js_error("progress width", bar.style().set_property("width", &percent));
    }
    if let Some(label) = query_one(doc, PROGRESS_LABEL_SELECTOR) {
        label.set_text_content(Some(&percent));
    }
    if let Some(list) = query_one(doc, GOALS_SELECTOR) {
        list.set_inner_html("");
        for goal in &detail.goals {
            match doc.create_element("li") {
                Ok(item) => {
                    item.set_text_content(Some(goal));
                    log_js_error("goal item", list.append_child(&item).map(|_| ()));
                }
                Err(e) => log_js_error("goal item", Err(e)),
            }
        }
    }
}
