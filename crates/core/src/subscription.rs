//! Listener registry with explicit cancellation
//!
//! Both the identity provider and the session holder fan state changes out to
//! callbacks. Every registration hands back a [`Subscription`]; once
//! `cancel()` returns (or the token is dropped) the callback is never invoked
//! again. A dispatch already running on another thread finishes before
//! `cancel()` returns.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    active: AtomicBool,
    // Held for the duration of each dispatch. Reentrant so a callback may
    // cancel its own subscription.
    gate: ReentrantMutex<()>,
    callback: Callback<T>,
}

/// Set of callbacks notified with values of type `T`.
pub struct ListenerRegistry<T> {
    next_id: AtomicU64,
    slots: Mutex<BTreeMap<u64, Arc<Slot<T>>>>,
}

impl<T: 'static> ListenerRegistry<T> {
    /// Empty registry, shared so subscriptions can unregister themselves.
    pub fn new() -> Arc<Self> {
        Arc::new(Self { next_id: AtomicU64::new(0), slots: Mutex::new(BTreeMap::new()) })
    }

    /// Register `callback`; it stays registered until the returned
    /// subscription is cancelled or dropped.
    pub fn register<F>(self: &Arc<Self>, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let slot = Arc::new(Slot {
            active: AtomicBool::new(true),
            gate: ReentrantMutex::new(()),
            callback: Box::new(callback),
        });
        self.slots.lock().insert(id, Arc::clone(&slot));

        let registry: Weak<Self> = Arc::downgrade(self);
        Subscription::new(move || {
            slot.active.store(false, Ordering::SeqCst);
            // Wait out any dispatch currently inside the callback.
            drop(slot.gate.lock());
            if let Some(registry) = registry.upgrade() {
                registry.slots.lock().remove(&id);
            }
        })
    }

    /// Invoke every active callback with `value`, in registration order.
    pub fn notify(&self, value: &T) {
        let slots: Vec<Arc<Slot<T>>> = self.slots.lock().values().cloned().collect();

        for slot in slots {
            let _gate = slot.gate.lock();
            if slot.active.load(Ordering::SeqCst) {
                (slot.callback)(value);
            }
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// True when no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cancellation token returned by every subscribe operation.
///
/// Callers must keep it for as long as they want callbacks and cancel it on
/// teardown. Dropping it cancels as well.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Token that runs `cancel` exactly once, on `cancel()` or drop.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A subscription with nothing to cancel.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    /// Stop receiving callbacks.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn notifies_in_registration_order() {
        let registry = ListenerRegistry::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            registry.register(move |value: &u32| seen.lock().push(("first", *value)))
        };
        let second = {
            let seen = Arc::clone(&seen);
            registry.register(move |value: &u32| seen.lock().push(("second", *value)))
        };

        registry.notify(&5);

        assert_eq!(*seen.lock(), vec![("first", 5), ("second", 5)]);
        drop((first, second));
    }

    #[test]
    fn cancelled_subscription_receives_nothing() {
        let registry = ListenerRegistry::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let subscription = {
            let calls = Arc::clone(&calls);
            registry.register(move |_: &u32| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };

        registry.notify(&1);
        subscription.cancel();
        registry.notify(&2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn dropping_subscription_cancels_it() {
        let registry = ListenerRegistry::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        {
            let calls = Arc::clone(&calls);
            let _subscription = registry.register(move |_: &u32| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }

        registry.notify(&1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callback_may_cancel_its_own_subscription() {
        let registry = ListenerRegistry::<u32>::new();
        let holder: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(AtomicUsize::new(0));

        let subscription = {
            let holder = Arc::clone(&holder);
            let calls = Arc::clone(&calls);
            registry.register(move |_: &u32| {
                calls.fetch_add(1, Ordering::SeqCst);
                let own = holder.lock().take();
                if let Some(own) = own {
                    own.cancel();
                }
            })
        };
        *holder.lock() = Some(subscription);

        registry.notify(&1);
        registry.notify(&2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_waits_for_in_flight_callback() {
        let registry = ListenerRegistry::<u32>::new();
        let finished = Arc::new(AtomicBool::new(false));
        let (entered_tx, entered_rx) = mpsc::channel();

        let subscription = {
            let finished = Arc::clone(&finished);
            registry.register(move |_: &u32| {
                let _ = entered_tx.send(());
                thread::sleep(Duration::from_millis(50));
                finished.store(true, Ordering::SeqCst);
            })
        };

        let dispatcher = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.notify(&1))
        };

        entered_rx.recv().unwrap();
        subscription.cancel();
        assert!(finished.load(Ordering::SeqCst), "cancel returned while callback was running");

        dispatcher.join().unwrap();
    }

    #[test]
    fn subscription_outliving_registry_cancels_cleanly() {
        let registry = ListenerRegistry::<u32>::new();
        let subscription = registry.register(|_: &u32| {});
        drop(registry);
        subscription.cancel();
    }
}
