//! Mount/unmount marker for components that outlive their requests.
//!
//! A request that resolves after `unmount()` must not write into the
//! component; callers check [`Lifecycle::is_mounted`] after every await.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct Lifecycle(Rc<Cell<bool>>);

impl Default for Lifecycle {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl Lifecycle {
    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }

    pub fn unmount(&self) {
        self.0.set(false);
    }
}
