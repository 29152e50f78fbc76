//! Scoped busy/loading flags.
//!
//! DESIGN
//! ======
//! Flags are only ever cleared by dropping a guard, so every exit path of a
//! submit or load (success, failure, early return, dropped future) releases
//! exactly once.

#[cfg(test)]
#[path = "busy_test.rs"]
mod busy_test;

use std::cell::Cell;
use std::rc::Rc;

/// Exclusive flag: at most one holder at a time.
#[derive(Clone, Debug, Default)]
pub struct BusyFlag(Rc<Cell<bool>>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.get()
    }

    /// Take the flag, or `None` if another operation holds it.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        if self.0.get() {
            return None;
        }
        self.0.set(true);
        Some(BusyGuard { flag: Rc::clone(&self.0) })
    }
}

#[must_use = "the flag is released when the guard is dropped"]
#[derive(Debug)]
pub struct BusyGuard {
    flag: Rc<Cell<bool>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Shared counter of overlapping operations; active while any is in flight.
#[derive(Clone, Debug, Default)]
pub struct InFlight(Rc<Cell<usize>>);

impl InFlight {
    pub fn is_active(&self) -> bool {
        self.0.get() > 0
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }

    pub fn enter(&self) -> InFlightGuard {
        self.0.set(self.0.get().saturating_add(1));
        InFlightGuard { count: Rc::clone(&self.0) }
    }
}

#[must_use = "the operation leaves the in-flight set when the guard is dropped"]
#[derive(Debug)]
pub struct InFlightGuard {
    count: Rc<Cell<usize>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.count.set(self.count.get().saturating_sub(1));
    }
}
