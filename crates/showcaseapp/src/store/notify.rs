//! Change notification.
//!
//! A [`ChangeNotifier`] is a cheap, cloneable handle to one listener list. Whoever
//! composes the views creates it (or takes the store's) and hands clones around;
//! listeners register explicitly and are called synchronously, with no payload,
//! after each successful collection write.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

#[derive(Clone, Default)]
pub struct ChangeNotifier {
    inner: Rc<RefCell<Listeners>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((id, Rc::new(listener)));
        id
    }

    /// Returns false if the listener was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|(existing, _)| *existing != id);
        inner.entries.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Call every registered listener in registration order.
    pub fn notify(&self) {
        // Snapshot so listeners may (un)subscribe while being called.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        tracing::trace!(listeners = listeners.len(), "broadcasting data change");
        for listener in listeners {
            listener();
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn notifies_all_listeners() {
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let hits = Rc::clone(&hits);
            notifier.subscribe(move || hits.set(hits.get() + 1));
        }
        notifier.notify();
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn clones_share_listeners() {
        let notifier = ChangeNotifier::new();
        let other = notifier.clone();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        other.subscribe(move || h.set(h.get() + 1));
        notifier.notify();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = notifier.subscribe(move || h.set(h.get() + 1));

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify();
        assert_eq!(hits.get(), 0);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn listener_may_subscribe_during_notify() {
        let notifier = ChangeNotifier::new();
        let inner = notifier.clone();
        notifier.subscribe(move || {
            inner.subscribe(|| {});
        });
        notifier.notify();
        assert_eq!(notifier.listener_count(), 2);
    }
}
