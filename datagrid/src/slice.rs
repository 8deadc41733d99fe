//! Controlled and uncontrolled ownership of a state slice.

use std::fmt;
use std::sync::Arc;

use crate::State;

/// Callback invoked with the new value of a slice.
pub type OnChange<V> = Arc<dyn Fn(V) + Send + Sync>;

/// Reader for a controlled slice's current value.
pub type ReadFn<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// A slice owned by the caller.
///
/// The table never stores a copy of a controlled value: every read goes
/// through `read`, and every write is handed to `on_change`. Whether the
/// write actually takes effect is up to the caller.
pub struct Controlled<V> {
    read: ReadFn<V>,
    on_change: OnChange<V>,
}

impl<V> Controlled<V> {
    /// Control a slice with an explicit reader and change handler.
    pub fn new<R, C>(read: R, on_change: C) -> Self
    where
        R: Fn() -> V + Send + Sync + 'static,
        C: Fn(V) + Send + Sync + 'static,
    {
        Self {
            read: Arc::new(read),
            on_change: Arc::new(on_change),
        }
    }

    /// Control a slice through a caller-owned [`State`].
    ///
    /// Writes land in `state` directly; the caller observes them through its
    /// own clone of the handle.
    pub fn from_state(state: State<V>) -> Self
    where
        V: Clone + Send + Sync + 'static,
    {
        let reader = state.clone();
        Self::new(move || reader.get(), move |value| state.set(value))
    }
}

impl<V> Clone for Controlled<V> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            on_change: Arc::clone(&self.on_change),
        }
    }
}

/// Ownership of one piece of table state.
///
/// Each slice is either controlled by the caller or owned by the table.
/// [`Slice::commit`] is the only write path and dispatches on the variant.
pub enum Slice<V> {
    /// The caller owns the value.
    Controlled(Controlled<V>),
    /// The table owns the value; `observer` is notified after each write.
    Uncontrolled {
        state: State<V>,
        observer: Option<OnChange<V>>,
    },
}

impl<V: Clone> Slice<V> {
    /// An uncontrolled slice starting at `initial`.
    pub fn uncontrolled(initial: V, observer: Option<OnChange<V>>) -> Self {
        Slice::Uncontrolled {
            state: State::new(initial),
            observer,
        }
    }

    /// Returns `true` if the caller controls this slice.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Slice::Controlled(_))
    }

    /// Read the current value.
    pub fn get(&self) -> V {
        match self {
            Slice::Controlled(controlled) => (controlled.read)(),
            Slice::Uncontrolled { state, .. } => state.get(),
        }
    }

    /// Commit a new value.
    ///
    /// For an uncontrolled slice the internal state is written (and its lock
    /// released) before the observer runs, so the observer sees the new value
    /// and may call back into the table.
    pub fn commit(&self, value: V) {
        match self {
            Slice::Controlled(controlled) => (controlled.on_change)(value),
            Slice::Uncontrolled { state, observer } => match observer {
                Some(observer) => {
                    state.set(value.clone());
                    observer(value);
                }
                None => state.set(value),
            },
        }
    }

    /// Derive a new value from the current one and commit it.
    pub fn modify(&self, f: impl FnOnce(V) -> V) {
        let next = f(self.get());
        self.commit(next);
    }
}

impl<V> fmt::Debug for Slice<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slice::Controlled(_) => f.write_str("Slice::Controlled"),
            Slice::Uncontrolled { observer, .. } => f
                .debug_struct("Slice::Uncontrolled")
                .field("observer", &observer.is_some())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_uncontrolled_commit_notifies_observer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let slice = Slice::uncontrolled(1, Some(Arc::new(move |v: i32| sink.lock().unwrap().push(v))));

        slice.commit(2);
        slice.modify(|v| v * 10);

        assert_eq!(slice.get(), 20);
        assert_eq!(*seen.lock().unwrap(), vec![2, 20]);
    }

    #[test]
    fn test_controlled_reads_from_caller() {
        let owned = State::new(5);
        let slice = Slice::Controlled(Controlled::from_state(owned.clone()));

        assert!(slice.is_controlled());
        owned.set(6);
        assert_eq!(slice.get(), 6);

        slice.commit(7);
        assert_eq!(owned.get(), 7);
    }

    #[test]
    fn test_controlled_change_can_be_rejected() {
        let slice = Slice::Controlled(Controlled::new(|| 3, |_| {}));
        slice.commit(4);
        assert_eq!(slice.get(), 3);
    }
}
