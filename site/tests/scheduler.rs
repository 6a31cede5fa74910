//! Browser scheduler behavior against real `setTimeout`.
//!
//! Run with `wasm-pack test --node -- --features browser`.
#![cfg(all(target_arch = "wasm32", feature = "browser"))]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use panels::timer::{Scheduler, Wake};
use site::scheduler::BrowserScheduler;
use wasm_bindgen_test::wasm_bindgen_test;

fn recording() -> (BrowserScheduler, Rc<RefCell<Vec<Wake>>>) {
    let fired = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&fired);
    let scheduler = BrowserScheduler::new(move |wake| sink.borrow_mut().push(wake));
    (scheduler, fired)
}

#[wasm_bindgen_test]
async fn fired_timer_dispatches_once_and_leaves_pending() {
    let (mut scheduler, fired) = recording();
    scheduler.schedule(0, Wake::SnapDone);
    assert_eq!(scheduler.pending_count(), 1);

    TimeoutFuture::new(20).await;
    assert_eq!(*fired.borrow(), vec![Wake::SnapDone]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[wasm_bindgen_test]
async fn cancelled_timer_never_dispatches() {
    let (mut scheduler, fired) = recording();
    let id = scheduler.schedule(0, Wake::Settle);
    scheduler.cancel(id);
    assert_eq!(scheduler.pending_count(), 0);

    TimeoutFuture::new(20).await;
    assert!(fired.borrow().is_empty());
}

#[wasm_bindgen_test]
async fn dropping_scheduler_clears_pending_timers() {
    let (mut scheduler, fired) = recording();
    scheduler.schedule(0, Wake::Settle);
    scheduler.schedule(5, Wake::FlashEnd(1));
    drop(scheduler);

    TimeoutFuture::new(30).await;
    assert!(fired.borrow().is_empty());
}
