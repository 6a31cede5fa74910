//! Mounts every page feature and keeps its listeners alive.
//!
//! ARCHITECTURE
//! ============
//! Each feature mounts independently and returns the listeners it attached.
//! They are kept in a thread-local [`Mounted`] so [`unmount`] can detach all
//! of them. The snap controller is shared between the scroll listener, the
//! visibility observer and its own timers through `Rc<RefCell<_>>`; timer
//! callbacks hold only a `Weak`, so unmounting frees it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, UrlSearchParams, Window,
};

use panels::config::SnapConfig;
use panels::controller::SnapController;
use panels::visibility::VisibilityEntry;

use crate::dash_entry;
use crate::dom::{DomPanels, PANEL_SELECTOR, SCROLL_ROOT_SELECTOR, js_error_text, query_all, query_one, set_attr, set_class};
use crate::hobby;
use crate::menu::{self, MenuEvent, MenuState};
use crate::scheduler::BrowserScheduler;
use crate::storage::{StorageArea, WebStorage};
use crate::theme::{self, Theme};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type LiveController = SnapController<DomPanels, BrowserScheduler>;
type ObserverBinding = (IntersectionObserver, Closure<dyn FnMut(Array, IntersectionObserver)>);

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// An attached event listener, detached on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::debug!("detach {}: {}", self.kind, js_error_text(&e));
        }
    }
}

fn listen<F>(target: &EventTarget, kind: &'static str, passive: bool, handler: F) -> Option<Listener>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    match target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(()) => Some(Listener { target: target.clone(), kind, closure }),
        Err(e) => {
            log::debug!("attach {kind}: {}", js_error_text(&e));
            None
        }
    }
}

/// Scroll listener, visibility observer and the controller they feed.
struct SnapBinding {
    controller: Rc<RefCell<LiveController>>,
    observer: Option<ObserverBinding>,
    _scroll: Option<Listener>,
}

impl Drop for SnapBinding {
    fn drop(&mut self) {
        if let Some((observer, _)) = &self.observer {
            observer.disconnect();
        }
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.teardown();
        }
    }
}

/// Everything attached by [`mount`].
struct Mounted {
    _listeners: Vec<Listener>,
    _snap: Option<SnapBinding>,
}

/// Mount every feature the current page supports. Mounting twice replaces the
/// previous mount.
pub fn mount() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(doc) = window.document() else {
        return;
    };

    let mut listeners = Vec::new();
    mount_theme(&doc, &mut listeners);
    mount_dashboard_links(&doc, &mut listeners);
    play_dashboard_entry(&doc);
    mount_menu(&doc, &mut listeners);
    hobby::fill(&doc, hobby_query(&window).as_deref());
    let snap = mount_snap(&window, &doc);

    log::debug!("mounted {} listeners, snapping {}", listeners.len(), snap.is_some());
    MOUNTED.with(|slot| {
        slot.replace(Some(Mounted { _listeners: listeners, _snap: snap }));
    });
}

/// Detach everything attached by [`mount`].
pub fn unmount() {
    let previous = MOUNTED.with(RefCell::take);
    drop(previous);
}

// --- Theme ---

fn mount_theme(doc: &Document, listeners: &mut Vec<Listener>) {
    let Some(body) = doc.body() else {
        return;
    };
    let body: Element = body.into();
    let button = doc.get_element_by_id(theme::BUTTON_ID);

    let initial = theme::load(&WebStorage::open(StorageArea::Local), body.get_attribute(theme::ATTRIBUTE).as_deref());
    theme::apply(&body, button.as_ref(), initial);

    let Some(button) = button else {
        return;
    };
    let target: EventTarget = button.clone().into();
    let on_click = move |_: Event| {
        let current = Theme::normalize(&body.get_attribute(theme::ATTRIBUTE).unwrap_or_default());
        let mut store = WebStorage::open(StorageArea::Local);
        let next = theme::toggle(&mut store, current);
        theme::apply(&body, Some(&button), next);
    };
    listeners.extend(listen(&target, "click", false, on_click));
}

// --- Dashboard entry ---

fn mount_dashboard_links(doc: &Document, listeners: &mut Vec<Listener>) {
    for link in query_all(doc, dash_entry::LINK_SELECTOR) {
        let target: EventTarget = link.into();
        listeners.extend(listen(&target, "click", false, |_| {
            dash_entry::mark(&mut WebStorage::open(StorageArea::Session));
        }));
    }
}

fn play_dashboard_entry(doc: &Document) {
    let Some(body) = doc.body() else {
        return;
    };
    if !body.class_list().contains(dash_entry::PAGE_CLASS) {
        return;
    }
    if dash_entry::take(&mut WebStorage::open(StorageArea::Session)) {
        set_class(&body, dash_entry::ENTRY_CLASS, true);
    }
}

// --- Menu ---

fn mount_menu(doc: &Document, listeners: &mut Vec<Listener>) {
    let (Some(trigger), Some(menu_el)) = (doc.get_element_by_id(menu::TRIGGER_ID), doc.get_element_by_id(menu::MENU_ID))
    else {
        return;
    };
    // Markup may ship with the menu already open.
    let state = Rc::new(Cell::new(MenuState::new(menu_el.class_list().contains(menu::OPEN_CLASS))));

    let update = {
        let trigger = trigger.clone();
        let menu_el = menu_el.clone();
        let state = Rc::clone(&state);
        Rc::new(move |event: MenuEvent| {
            let next = state.get().handle(&event);
            state.set(next);
            set_class(&menu_el, menu::OPEN_CLASS, next.is_open());
            set_attr(&trigger, "aria-expanded", next.aria_expanded());
        })
    };

    let on_trigger = {
        let update = Rc::clone(&update);
        move |ev: Event| {
            ev.stop_propagation();
            update(MenuEvent::TriggerClick);
        }
    };
    listeners.extend(listen(trigger.as_ref(), "click", false, on_trigger));
    listeners.extend(listen(menu_el.as_ref(), "click", false, |ev: Event| ev.stop_propagation()));

    let on_outside = {
        let update = Rc::clone(&update);
        move |_: Event| update(MenuEvent::OutsideClick)
    };
    listeners.extend(listen(doc.as_ref(), "click", false, on_outside));

    let on_key = move |ev: Event| {
        if let Some(key) = ev.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            update(MenuEvent::Key(key));
        }
    };
    listeners.extend(listen(doc.as_ref(), "keydown", false, on_key));
}

// --- Hobby detail ---

fn hobby_query(window: &Window) -> Option<String> {
    let search = window.location().search().unwrap_or_else(|e| {
        log::debug!("location.search: {}", js_error_text(&e));
        String::new()
    });
    match UrlSearchParams::new_with_str(&search) {
        Ok(params) => params.get(hobby::QUERY_PARAM),
        Err(e) => {
            log::debug!("query string: {}", js_error_text(&e));
            None
        }
    }
}

// --- Scroll snapping ---

fn mount_snap(window: &Window, doc: &Document) -> Option<SnapBinding> {
    let panels: Vec<HtmlElement> = query_all(doc, PANEL_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let root = query_one(doc, SCROLL_ROOT_SELECTOR)?;
    if panels.is_empty() {
        return None;
    }

    let reduced_motion = prefers_reduced_motion(window);
    let config = SnapConfig::from_lookup(|key| root.get_attribute(&format!("data-{key}")));
    let surface = DomPanels::new(root.clone(), panels);

    let controller: Rc<RefCell<LiveController>> = Rc::new_cyclic(|weak: &Weak<RefCell<LiveController>>| {
        let weak = weak.clone();
        let scheduler = BrowserScheduler::new(move |wake| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut controller) => controller.on_wake(wake),
                Err(_) => log::warn!("timer {wake:?} fired while the controller was busy"),
            }
        });
        RefCell::new(SnapController::new(surface, scheduler, config, reduced_motion))
    });

    let scroll = {
        let controller = Rc::clone(&controller);
        listen(root.as_ref(), "scroll", true, move |_| match controller.try_borrow_mut() {
            Ok(mut controller) => controller.on_scroll(),
            Err(_) => log::warn!("scroll event while the controller was busy"),
        })
    };

    let observer = if reduced_motion { None } else { observe_panels(&controller, &root, &config) };
    log::debug!("snap mounted: reduced_motion={reduced_motion} {config:?}");

    Some(SnapBinding { controller, observer, _scroll: scroll })
}

fn prefers_reduced_motion(window: &Window) -> bool {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => query.matches(),
        Ok(None) => false,
        Err(e) => {
            log::debug!("matchMedia: {}", js_error_text(&e));
            false
        }
    }
}

fn observe_panels(
    controller: &Rc<RefCell<LiveController>>,
    root: &Element,
    config: &SnapConfig,
) -> Option<ObserverBinding> {
    let on_entries = {
        let controller = Rc::clone(controller);
        move |entries: Array, _observer: IntersectionObserver| {
            let Ok(mut controller) = controller.try_borrow_mut() else {
                log::warn!("visibility change while the controller was busy");
                return;
            };
            let visible: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let index = controller.surface().index_of(&entry.target())?;
                    Some(VisibilityEntry {
                        index,
                        ratio: entry.intersection_ratio(),
                        is_intersecting: entry.is_intersecting(),
                    })
                })
                .collect();
            controller.on_visibility(&visible);
        }
    };
    let callback = Closure::wrap(Box::new(on_entries) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_root(Some(root));
    options.set_threshold(&Array::of1(&config.visibility_threshold.into()));

    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => observer,
        Err(e) => {
            log::debug!("IntersectionObserver: {}", js_error_text(&e));
            return None;
        }
    };
    for panel in controller.borrow().surface().panels() {
        observer.observe(panel);
    }
    Some((observer, callback))
}
