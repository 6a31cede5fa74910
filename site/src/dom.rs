//! Small `web-sys` helpers and the DOM-backed panel surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page feature treats a missing element as "feature off", so lookups
//! return `Option` and DOM call failures are logged at debug and dropped.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use panels::surface::{FlashSurface, Motion, ScrollSurface};

pub const PANEL_SELECTOR: &str = ".secBlock";
pub const SCROLL_ROOT_SELECTOR: &str = ".scrollThing";
pub const INNER_SELECTOR: &str = ".secBlock-inner";
pub const FLASH_CLASS: &str = "blinkNow";

#[must_use]
pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

#[must_use]
pub fn body() -> Option<HtmlElement> {
    document().and_then(|d| d.body())
}

/// Best-effort text for a thrown JS value.
#[must_use]
pub fn js_error_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{value:?}"),
    }
}

/// Log a failed DOM call at debug level.
pub fn log_js_error(context: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::debug!("{context}: {}", js_error_text(&e));
    }
}

/// First element matching `selector` below `root`.
pub fn query_one<R: AsRef<web_sys::Node>>(root: &R, selector: &str) -> Option<Element> {
    let node: &web_sys::Node = root.as_ref();
    let found = if let Some(doc) = node.dyn_ref::<Document>() {
        doc.query_selector(selector)
    } else if let Some(el) = node.dyn_ref::<Element>() {
        el.query_selector(selector)
    } else {
        return None;
    };
    found.unwrap_or_else(|e| {
        log::debug!("query {selector}: {}", js_error_text(&e));
        None
    })
}

/// Every element matching `selector` in document order.
#[must_use]
pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let list = match doc.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            log::debug!("query {selector}: {}", js_error_text(&e));
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_attr(el: &Element, name: &str, value: &str) {
    log_js_error(name, el.set_attribute(name, value));
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    log_js_error(class, result);
}

/// The scroll root and its panels, read live on every call.
#[derive(Debug, Clone)]
pub struct DomPanels {
    root: Element,
    panels: Vec<HtmlElement>,
}

impl DomPanels {
    #[must_use]
    pub fn new(root: Element, panels: Vec<HtmlElement>) -> Self {
        Self { root, panels }
    }

    #[must_use]
    pub fn panels(&self) -> &[HtmlElement] {
        &self.panels
    }

    /// Index of the panel that is `target`, if any.
    #[must_use]
    pub fn index_of(&self, target: &Element) -> Option<usize> {
        self.panels.iter().position(|panel| {
            let el: &Element = panel;
            el == target
        })
    }

    fn inner(&self, index: usize) -> Option<(&HtmlElement, Element)> {
        let panel = self.panels.get(index)?;
        let inner = query_one(panel, INNER_SELECTOR)?;
        Some((panel, inner))
    }
}

impl ScrollSurface for DomPanels {
    fn scroll_top(&self) -> f64 {
        f64::from(self.root.scroll_top())
    }

    fn panel_starts(&self) -> Vec<f64> {
        self.panels.iter().map(|panel| f64::from(panel.offset_top())).collect()
    }

    fn scroll_to(&mut self, top: f64, motion: Motion) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match motion {
            Motion::Smooth => ScrollBehavior::Smooth,
            Motion::Instant => ScrollBehavior::Auto,
        });
        self.root.scroll_to_with_scroll_to_options(&options);
    }
}

impl FlashSurface for DomPanels {
    fn has_inner(&self, index: usize) -> bool {
        self.inner(index).is_some()
    }

    fn restart_flash(&mut self, index: usize) {
        let Some((panel, inner)) = self.inner(index) else {
            return;
        };
        set_class(panel, FLASH_CLASS, false);
        set_class(&inner, FLASH_CLASS, false);

        // Layout read between remove and add, or the browser coalesces both
        // and the animation does not restart.
        std::hint::black_box(inner.client_width());

        set_class(panel, FLASH_CLASS, true);
        set_class(&inner, FLASH_CLASS, true);
    }

    fn clear_flash(&mut self, index: usize) {
        let Some((panel, inner)) = self.inner(index) else {
            return;
        };
        set_class(panel, FLASH_CLASS, false);
        set_class(&inner, FLASH_CLASS, false);
    }
}
