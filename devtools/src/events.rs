//! Observer plumbing with an explicit subscribe/unsubscribe lifecycle.
//!
//! Hosts (the browser shell, tests) push events into a [`Broadcast`];
//! consumers keep a [`Subscription`] alive for as long as they want to hear
//! them. Dropping the subscription unsubscribes.
//!
//! Everything here is single-threaded: the overlay lives on the browser's
//! event loop, so listeners are `Rc`/`RefCell` based and need not be `Send`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type Listener<E> = Box<dyn FnMut(&E)>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
    /// Nesting depth of `emit` calls currently running.
    dispatch_depth: u32,
    /// Ids unsubscribed while listeners were checked out for dispatch.
    pending_removals: Vec<u64>,
    /// Events emitted from inside a listener, delivered once the current
    /// dispatch finishes.
    queued: VecDeque<E>,
}

impl<E> Registry<E> {
    /// Detach a listener. The caller drops the returned closure once the
    /// registry borrow is released, since its captures may touch us again.
    fn remove(&mut self, id: u64) -> Option<Listener<E>> {
        if self.dispatch_depth > 0 {
            self.pending_removals.push(id);
        }
        let pos = self.listeners.iter().position(|(lid, _)| *lid == id)?;
        Some(self.listeners.remove(pos).1)
    }
}

/// Fan-out of events of type `E` to any number of listeners.
pub struct Broadcast<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for Broadcast<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: 'static> Default for Broadcast<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Broadcast<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 1,
                listeners: Vec::new(),
                dispatch_depth: 0,
                pending_removals: Vec::new(),
                queued: VecDeque::new(),
            })),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is dropped or explicitly unsubscribed.
    pub fn subscribe(&self, listener: impl FnMut(&E) + 'static) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.listeners.push((id, Box::new(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let removed = inner.borrow_mut().remove(id);
                    drop(removed);
                }
            })),
        }
    }

    /// Deliver `event` to every listener registered before the call.
    /// Returns how many listeners received it.
    ///
    /// Listeners may subscribe or unsubscribe while being called; those
    /// changes apply once dispatch finishes. An `emit` from inside a listener
    /// is queued and delivered, in order, after the current event has reached
    /// every listener; that nested call returns 0.
    pub fn emit(&self, event: &E) -> usize
    where
        E: Clone,
    {
        {
            let mut reg = self.inner.borrow_mut();
            if reg.dispatch_depth > 0 {
                reg.queued.push_back(event.clone());
                return 0;
            }
        }

        let delivered = self.dispatch(event);
        loop {
            let next = self.inner.borrow_mut().queued.pop_front();
            match next {
                Some(queued) => {
                    self.dispatch(&queued);
                }
                None => break,
            }
        }
        delivered
    }

    fn dispatch(&self, event: &E) -> usize {
        let mut active = {
            let mut reg = self.inner.borrow_mut();
            reg.dispatch_depth += 1;
            std::mem::take(&mut reg.listeners)
        };

        for (_, listener) in active.iter_mut() {
            listener(event);
        }
        let delivered = active.len();

        let gone: Vec<(u64, Listener<E>)> = {
            let mut reg = self.inner.borrow_mut();
            reg.dispatch_depth -= 1;
            let added = std::mem::take(&mut reg.listeners);
            active.extend(added);
            let removed = std::mem::take(&mut reg.pending_removals);
            let (keep, gone) = active
                .into_iter()
                .partition(|(id, _)| !removed.contains(id));
            reg.listeners = keep;
            gone
        };
        drop(gone);
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Handle tying a listener's lifetime to its owner.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the listener registered for the lifetime of the broadcast.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emit_reaches_every_subscriber() {
        let hub: Broadcast<u32> = Broadcast::new();
        let seen = Rc::new(Cell::new(0));
        let a = {
            let seen = Rc::clone(&seen);
            hub.subscribe(move |v| seen.set(seen.get() + v))
        };
        let b = {
            let seen = Rc::clone(&seen);
            hub.subscribe(move |v| seen.set(seen.get() + v * 10))
        };

        assert_eq!(hub.emit(&2), 2);
        assert_eq!(seen.get(), 22);
        drop((a, b));
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let hub: Broadcast<()> = Broadcast::new();
        let sub = hub.subscribe(|_| {});
        assert_eq!(hub.listener_count(), 1);
        drop(sub);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.emit(&()), 0);
    }

    #[test]
    fn detached_listener_outlives_handle() {
        let hub: Broadcast<()> = Broadcast::new();
        hub.subscribe(|_| {}).detach();
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn unsubscribe_during_dispatch_applies_after() {
        let hub: Broadcast<()> = Broadcast::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let sub = {
            let slot = Rc::clone(&slot);
            let calls = Rc::clone(&calls);
            hub.subscribe(move |_| {
                calls.set(calls.get() + 1);
                // Drop our own handle from inside the callback.
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(sub);

        hub.emit(&());
        hub.emit(&());
        assert_eq!(calls.get(), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn emit_from_listener_is_delivered_after_current_event() {
        let hub: Broadcast<u32> = Broadcast::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let _relay = {
            let relay_hub = hub.clone();
            let order = Rc::clone(&order);
            hub.subscribe(move |v| {
                order.borrow_mut().push(format!("relay {v}"));
                if *v == 1 {
                    assert_eq!(relay_hub.emit(&2), 0);
                }
            })
        };
        let _counter = {
            let order = Rc::clone(&order);
            hub.subscribe(move |v| order.borrow_mut().push(format!("count {v}")))
        };

        assert_eq!(hub.emit(&1), 2);
        assert_eq!(
            *order.borrow(),
            vec!["relay 1", "count 1", "relay 2", "count 2"]
        );
        assert_eq!(hub.listener_count(), 2);
    }

    #[test]
    fn subscription_after_broadcast_dropped_is_harmless() {
        let hub: Broadcast<()> = Broadcast::new();
        let sub = hub.subscribe(|_| {});
        drop(hub);
        sub.unsubscribe();
    }
}
