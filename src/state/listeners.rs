//! Item-generic subscriber list.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An immutable copy of a store's full item list, shared by every
/// subscriber of one notification.
///
/// `version` grows by one with every accepted mutation. Notifications are
/// delivered outside the store lock, so concurrent writers can deliver
/// out of order; subscribers compare versions to drop stale snapshots.
pub struct Snapshot<T> {
    version: u64,
    items: Arc<[T]>,
}

impl<T> Snapshot<T> {
    pub fn new(version: u64, items: impl Into<Arc<[T]>>) -> Self {
        Self {
            version,
            items: items.into(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether both handles share the same underlying list.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.items, &b.items)
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("version", &self.version)
            .field("items", &&*self.items)
            .finish()
    }
}

/// Subscriber callback. Invoked synchronously with each new snapshot.
pub type Listener<T> = Arc<dyn Fn(&Snapshot<T>) + Send + Sync>;

/// Ordered subscriber list; registration order is notification order.
pub struct ListenerList<T> {
    listeners: Vec<Listener<T>>,
}

impl<T> ListenerList<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn push(&mut self, listener: Listener<T>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Cheap copy of the current subscribers, so they can be invoked after
    /// the owning lock has been released.
    pub fn handles(&self) -> Vec<Listener<T>> {
        self.listeners.clone()
    }
}

impl<T> Default for ListenerList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ListenerList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.listeners.len())
            .finish()
    }
}

/// Call every listener in order with the same snapshot.
pub fn notify<T>(listeners: &[Listener<T>], snapshot: &Snapshot<T>) {
    for listener in listeners {
        listener(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_notify_runs_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut list: ListenerList<u8> = ListenerList::new();
        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            list.push(Arc::new(move |_: &Snapshot<u8>| {
                order.lock().unwrap().push(tag);
            }));
        }

        let snapshot = Snapshot::new(1, vec![1u8, 2, 3]);
        notify(&list.handles(), &snapshot);

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_snapshot_clone_shares_items_and_version() {
        let snapshot = Snapshot::new(4, vec!["a", "b"]);
        let copy = snapshot.clone();
        assert!(Snapshot::ptr_eq(&snapshot, &copy));
        assert_eq!(copy.version(), 4);
        assert_eq!(&*copy, &["a", "b"]);
    }

    #[test]
    fn test_every_listener_sees_the_same_snapshot() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut list: ListenerList<u8> = ListenerList::default();
        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            list.push(Arc::new(move |snapshot: &Snapshot<u8>| {
                seen.lock().unwrap().push(snapshot.clone());
            }));
        }

        let snapshot = Snapshot::new(1, vec![7u8]);
        notify(&list.handles(), &snapshot);

        let seen = seen.lock().unwrap();
        assert!(Snapshot::ptr_eq(&seen[0], &seen[1]));
        assert_eq!(seen[0].version(), 1);
    }

    #[test]
    fn test_empty_list_is_a_noop() {
        let list: ListenerList<u8> = ListenerList::new();
        assert!(list.is_empty());
        notify(&list.handles(), &Snapshot::new(0, Vec::<u8>::new()));
    }
}
