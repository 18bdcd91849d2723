use std::cell::RefCell;
use std::rc::Rc;

/// Single-writer / multiple-reader value cell.
///
/// Renderer event listeners are registered exactly once and live as long as
/// the map; re-registering them per domain update would leak listeners.
/// Instead, long-lived closures hold `LatestReader`s and read the current
/// mode/snapshot/callbacks at event time rather than values captured at
/// registration time.
///
/// Ownership: application state owns the `Latest` writer; the interaction
/// subsystem only holds readers. The writer is deliberately not cloneable.
#[derive(Debug)]
pub struct Latest<T> {
    inner: Rc<RefCell<T>>,
}

#[derive(Debug)]
pub struct LatestReader<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Latest<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Replaces the current value; readers observe it on their next read.
    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }

    pub fn reader(&self) -> LatestReader<T> {
        LatestReader {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }
}

impl<T> LatestReader<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.borrow().clone()
    }
}

impl<T> Clone for LatestReader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}
