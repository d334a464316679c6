//! The "store changed" signal.
//!
//! Subscribers are plain callbacks invoked synchronously, on the calling
//! thread, in registration order, once per broadcast. The signal carries no
//! payload; subscribers re-read whatever slice of the store they display.
//!
//! Broadcasting is re-entrant: a callback may mutate the store (and thereby
//! broadcast again). The nested broadcast is queued and delivered as a fresh
//! round once the current round finishes, still before the outermost
//! `broadcast` returns.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct Registry {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(u64, Callback)>>,
    dispatching: Cell<bool>,
    pending: Cell<usize>,
}

impl Registry {
    fn is_registered(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|(i, _)| *i == id)
    }

    fn remove(&self, id: u64) -> bool {
        // The callback is dropped after the borrow ends: it may own other
        // subscriptions whose drop re-enters the registry.
        let removed = {
            let mut subscribers = self.subscribers.borrow_mut();
            let pos = subscribers.iter().position(|(i, _)| *i == id);
            pos.map(|pos| subscribers.remove(pos))
        };
        removed.is_some()
    }
}

/// Observer registry owned by a [`Store`](crate::Store).
pub struct ChangeChannel {
    registry: Rc<Registry>,
}

impl ChangeChannel {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry::default()),
        }
    }

    /// Register `callback`. Delivery lasts until the returned handle is
    /// dropped or [`Subscription::unsubscribe`]d.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));

        tracing::trace!(subscription = id, "subscriber registered");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers.borrow().len()
    }

    /// Invoke every registered subscriber once.
    ///
    /// Called while another broadcast is being delivered, this only queues a
    /// round; the active call delivers it before returning.
    pub fn broadcast(&self) {
        let registry = &self.registry;
        registry.pending.set(registry.pending.get() + 1);
        if registry.dispatching.get() {
            tracing::trace!(pending = registry.pending.get(), "broadcast queued");
            return;
        }

        let _dispatch = DispatchGuard::enter(registry);
        while registry.pending.get() > 0 {
            registry.pending.set(registry.pending.get() - 1);

            let round: Vec<(u64, Callback)> = registry
                .subscribers
                .borrow()
                .iter()
                .map(|(id, cb)| (*id, Rc::clone(cb)))
                .collect();

            for (id, callback) in round {
                // skip anyone unsubscribed earlier in this round
                if registry.is_registered(id) {
                    callback();
                }
            }
        }
    }
}

impl Default for ChangeChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Marks the registry as dispatching; cleared even if a callback panics.
struct DispatchGuard<'a>(&'a Registry);

impl<'a> DispatchGuard<'a> {
    fn enter(registry: &'a Registry) -> Self {
        registry.dispatching.set(true);
        Self(registry)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.dispatching.set(false);
        self.0.pending.set(0);
    }
}

/// Handle returned by [`ChangeChannel::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Stop receiving the signal. Same as dropping the handle.
    pub fn unsubscribe(self) {}

    /// `false` once the owning channel is gone.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.is_registered(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.remove(self.id) {
                tracing::trace!(subscription = self.id, "subscriber removed");
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
