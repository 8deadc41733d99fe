use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Shared state cell with interior mutability.
///
/// `State<T>` is cheap to clone; every clone points at the same value. The
/// table uses it for the slices it owns, and callers use it to hold slices
/// they control (see [`Controlled::from_state`](crate::Controlled::from_state)).
///
/// Each write bumps a revision counter, so observers can tell whether the
/// value changed since they last looked.
///
/// # Example
///
/// ```
/// use datagrid::State;
///
/// let page = State::new(0usize);
/// let handle = page.clone();
///
/// handle.update(|p| *p += 1);
/// assert_eq!(page.get(), 1);
/// assert_eq!(page.revision(), 1);
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    revision: Arc<AtomicU64>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Update the value using a closure
    ///
    /// The write lock is released before this returns.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
        drop(guard);
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of writes since the state was created
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            revision: Arc::clone(&self.revision),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
