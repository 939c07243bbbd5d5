//! Synchronous listener registry shared by the settings and notification stores.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

type Listener<E> = Rc<dyn Fn(&E)>;

struct ListenerRegistry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// Ordered set of listeners for events of type `E`. Clones share listeners.
pub struct ListenerSet<E> {
    inner: Rc<RefCell<ListenerRegistry<E>>>,
}

impl<E> Clone for ListenerSet<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for ListenerSet<E> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListenerRegistry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }
}

impl<E: 'static> ListenerSet<E> {
    /// Registers `listener` until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(&E) + 'static) -> Subscription {
        let id = {
            let mut registry = self.inner.borrow_mut();
            registry.next_id += 1;
            let id = registry.next_id;
            registry.listeners.push((id, Rc::new(listener)));
            id
        };
        let registry: Weak<RefCell<ListenerRegistry<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry
                        .borrow_mut()
                        .listeners
                        .retain(|(listener_id, _)| *listener_id != id);
                }
            })),
        }
    }

    /// Calls every listener once, in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while being notified; changes apply to the next
    /// notification.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle that keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Removes the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn dropped_subscriptions_stop_receiving() {
        let set = ListenerSet::<u32>::default();
        let seen = Rc::new(Cell::new(0));

        let counter = Rc::clone(&seen);
        let subscription = set.subscribe(move |value| counter.set(counter.get() + value));
        set.notify(&2);
        drop(subscription);
        set.notify(&5);

        assert_eq!(seen.get(), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn listeners_may_unsubscribe_during_notification() {
        let set = ListenerSet::<()>::default();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let handle = Rc::clone(&slot);
        let count = Rc::clone(&calls);
        *slot.borrow_mut() = Some(set.subscribe(move |_| {
            count.set(count.get() + 1);
            if let Some(subscription) = handle.borrow_mut().take() {
                subscription.unsubscribe();
            }
        }));

        set.notify(&());
        set.notify(&());
        assert_eq!(calls.get(), 1);
    }
}
