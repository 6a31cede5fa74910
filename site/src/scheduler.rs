//! `setTimeout`-backed [`Scheduler`] for the snap controller.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use panels::timer::{Scheduler, TimerId, Wake};

type Dispatch = Rc<dyn Fn(Wake)>;

/// Schedules browser timeouts and hands each fired [`Wake`] to `dispatch`.
///
/// Dropping the scheduler clears every pending timeout: callbacks reach the
/// pending map only through a `Weak`, so the map and its `Timeout`s die with
/// the scheduler.
pub struct BrowserScheduler {
    next_id: u64,
    pending: Rc<RefCell<HashMap<TimerId, Timeout>>>,
    // A timeout cannot be dropped from inside its own callback, so the one
    // that last fired is parked here until the next one fires.
    spent: Rc<RefCell<Option<Timeout>>>,
    dispatch: Dispatch,
}

impl BrowserScheduler {
    pub fn new<F>(dispatch: F) -> Self
    where
        F: Fn(Wake) + 'static,
    {
        Self {
            next_id: 0,
            pending: Rc::new(RefCell::new(HashMap::new())),
            spent: Rc::new(RefCell::new(None)),
            dispatch: Rc::new(dispatch),
        }
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl fmt::Debug for BrowserScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserScheduler")
            .field("next_id", &self.next_id)
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, delay_ms: u32, wake: Wake) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);

        let pending = Rc::downgrade(&self.pending);
        let spent = Rc::downgrade(&self.spent);
        let dispatch = Rc::clone(&self.dispatch);
        let timeout = Timeout::new(delay_ms, move || {
            let (Some(pending), Some(spent)) = (Weak::upgrade(&pending), Weak::upgrade(&spent)) else {
                return;
            };
            let finished = pending.borrow_mut().remove(&id);
            let previous = spent.replace(finished);
            drop(previous);
            dispatch(wake);
        });

        self.pending.borrow_mut().insert(id, timeout);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        // Dropping a gloo `Timeout` clears it.
        drop(self.pending.borrow_mut().remove(&id));
    }
}
