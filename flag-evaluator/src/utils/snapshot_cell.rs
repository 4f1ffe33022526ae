use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

/// Holds the current version of a value that is replaced wholesale, never edited.
///
/// `load` hands out an `Arc` to the current value without taking a lock, and
/// `store` publishes a new one atomically. Readers keep working against the
/// `Arc` they loaded while a writer swaps; superseded values are freed once
/// the last reader drops its `Arc`.
pub struct SnapshotCell<T> {
    inner: ArcSwap<T>,
}

impl<T> SnapshotCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: ArcSwap::from_pointee(value),
        }
    }

    #[inline]
    pub fn load(&self) -> Arc<T> {
        self.inner.load_full()
    }

    pub fn store(&self, value: T) {
        self.store_arc(Arc::new(value));
    }

    pub fn store_arc(&self, value: Arc<T>) {
        self.inner.store(value);
    }

    /// Replaces the value and returns the previous one.
    pub fn swap(&self, value: T) -> Arc<T> {
        self.inner.swap(Arc::new(value))
    }
}

impl<T: Default> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SnapshotCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotCell")
            .field("value", &self.load())
            .finish()
    }
}
