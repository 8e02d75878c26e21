// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The observable value cell and its subscription handle.

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use smallvec::SmallVec;

/// Subscriber callbacks are shared so a notification pass can keep invoking a
/// snapshot of the list even while the live list is being edited underneath it.
type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Slot<T: 'static> {
    id: u64,
    callback: Callback<T>,
}

struct Shared<T: 'static> {
    value: RefCell<T>,
    subscribers: RefCell<SmallVec<[Slot<T>; 2]>>,
    next_id: Cell<u64>,
}

/// A single-value observable state container.
///
/// A `Store` holds exactly one value of type `T` plus a set of subscriber
/// callbacks. Replacing the value with [`Store::set`] synchronously notifies
/// every subscriber that was registered before the call began, in
/// registration order. Relative order across subscribers is not part of the
/// contract; subscribers must not depend on seeing each other's side effects.
///
/// `Store` is a shared handle: cloning it yields another handle onto the same
/// cell. This is what lets a navigation engine hand the same pair of stores
/// to every role it mints without any process-wide state.
///
/// Values are always replaced whole, never mutated in place. Consumers that
/// rely on value-identity change detection (for example a copy-on-write map
/// snapshot compared by pointer) stay sound under this discipline.
///
/// Re-entrancy: a subscriber may read the store and may mutate *other*
/// stores, but must not call [`Store::set`] on the store it is currently
/// being notified by. Doing so panics on the callback's `RefCell`.
pub struct Store<T: 'static> {
    shared: Rc<Shared<T>>,
}

impl<T> Store<T> {
    /// Creates a store holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(initial),
                subscribers: RefCell::new(SmallVec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Reads the current value through a closure, without cloning it.
    ///
    /// The borrow is released before `with` returns, so the closure's result
    /// may be kept freely. The closure must not call [`Store::set`] on this
    /// store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.borrow())
    }

    /// Registers `f` to be invoked with the new value on every [`Store::set`].
    ///
    /// The returned [`Subscription`] keeps the subscriber registered; it is
    /// removed when the subscription is dropped or explicitly unsubscribed.
    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> Subscription<T> {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        self.shared.subscribers.borrow_mut().push(Slot {
            id,
            callback: Rc::new(RefCell::new(f)),
        });
        Subscription {
            shared: Rc::downgrade(&self.shared),
            id: Cell::new(Some(id)),
        }
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().len()
    }
}

impl<T: Clone> Store<T> {
    /// Returns a clone of the current value. No side effects.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Replaces the value, then synchronously notifies subscribers.
    ///
    /// The subscriber list is snapshotted before iterating: a subscriber that
    /// unsubscribes (itself or another) during notification still receives
    /// this notification, and a subscriber registered during notification
    /// first hears about the *next* `set`. Notification happens even when the
    /// new value equals the old one; deduplication belongs to
    /// [`Store::watch`].
    pub fn set(&self, value: T) {
        *self.shared.value.borrow_mut() = value.clone();
        let snapshot: SmallVec<[Callback<T>; 2]> = self
            .shared
            .subscribers
            .borrow()
            .iter()
            .map(|slot| Rc::clone(&slot.callback))
            .collect();
        for callback in snapshot {
            (callback.borrow_mut())(&value);
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T> core::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Capability to remove a subscriber registered via [`Store::subscribe`].
///
/// Unsubscribing is idempotent: calling [`Subscription::unsubscribe`] more
/// than once has no additional effect. Dropping the subscription also
/// unsubscribes, so a subscriber naturally lives exactly as long as the
/// consumer that holds its handle. Leaking the handle (`core::mem::forget`)
/// keeps the subscriber registered for the store's lifetime.
pub struct Subscription<T: 'static> {
    shared: Weak<Shared<T>>,
    id: Cell<Option<u64>>,
}

impl<T> Subscription<T> {
    /// Removes the subscriber from the store's subscriber set.
    ///
    /// Safe to call any number of times; only the first call has an effect.
    pub fn unsubscribe(&self) {
        let Some(id) = self.id.take() else { return };
        if let Some(shared) = self.shared.upgrade() {
            shared.subscribers.borrow_mut().retain(|slot| slot.id != id);
        }
    }

    /// Returns `true` while the subscriber is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.get().is_some()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl<T> core::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recording_store() -> (Store<u32>, Rc<RefCell<Vec<u32>>>, Subscription<u32>) {
        let store = Store::new(0_u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = Rc::clone(&seen);
            store.subscribe(move |v| seen.borrow_mut().push(*v))
        };
        (store, seen, sub)
    }

    #[test]
    fn get_and_set_replace_the_single_value() {
        let store = Store::new(1_u32);
        assert_eq!(store.get(), 1);
        store.set(2);
        assert_eq!(store.get(), 2);
        assert_eq!(store.with(|v| *v), 2);
    }

    #[test]
    fn subscribers_are_notified_in_registration_order() {
        let store = Store::new(0_u32);
        let order = Rc::new(RefCell::new(Vec::new()));

        let _a = {
            let order = Rc::clone(&order);
            store.subscribe(move |_| order.borrow_mut().push("a"))
        };
        let _b = {
            let order = Rc::clone(&order);
            store.subscribe(move |_| order.borrow_mut().push("b"))
        };

        store.set(1);
        assert_eq!(*order.borrow(), ["a", "b"]);
    }

    #[test]
    fn unsubscribe_stops_notification() {
        let (store, seen, sub) = recording_store();
        store.set(1);
        sub.unsubscribe();
        store.set(2);
        assert_eq!(*seen.borrow(), [1]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn double_unsubscribe_is_a_no_op() {
        let (store, seen, sub) = recording_store();
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        store.set(1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn dropping_the_subscription_unsubscribes() {
        let (store, seen, sub) = recording_store();
        drop(sub);
        store.set(1);
        assert!(seen.borrow().is_empty());
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn subscriber_removed_mid_notification_still_hears_that_set() {
        let store = Store::new(0_u32);
        let seen = Rc::new(RefCell::new(Vec::new()));

        // The second subscription handle has to be reachable from the first
        // subscriber so it can unsubscribe its sibling during notification.
        let sibling: Rc<RefCell<Option<Subscription<u32>>>> = Rc::new(RefCell::new(None));

        let _a = {
            let sibling = Rc::clone(&sibling);
            let seen = Rc::clone(&seen);
            store.subscribe(move |v| {
                seen.borrow_mut().push(("a", *v));
                if let Some(sub) = sibling.borrow().as_ref() {
                    sub.unsubscribe();
                }
            })
        };
        *sibling.borrow_mut() = {
            let seen = Rc::clone(&seen);
            Some(store.subscribe(move |v| seen.borrow_mut().push(("b", *v))))
        };

        // "b" was registered before this set began, so it is notified even
        // though "a" removed it first.
        store.set(1);
        assert_eq!(*seen.borrow(), [("a", 1), ("b", 1)]);

        store.set(2);
        assert_eq!(*seen.borrow(), [("a", 1), ("b", 1), ("a", 2)]);
    }

    #[test]
    fn subscriber_added_mid_notification_waits_for_the_next_set() {
        let store = Store::new(0_u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let late: Rc<RefCell<Option<Subscription<u32>>>> = Rc::new(RefCell::new(None));

        let _a = {
            let store = store.clone();
            let late = Rc::clone(&late);
            let seen = Rc::clone(&seen);
            store.clone().subscribe(move |v| {
                seen.borrow_mut().push(("a", *v));
                if late.borrow().is_none() {
                    let seen = Rc::clone(&seen);
                    *late.borrow_mut() =
                        Some(store.subscribe(move |v| seen.borrow_mut().push(("late", *v))));
                }
            })
        };

        store.set(1);
        assert_eq!(*seen.borrow(), [("a", 1)]);
        store.set(2);
        assert_eq!(*seen.borrow(), [("a", 1), ("a", 2), ("late", 2)]);
    }

    #[test]
    fn clones_share_one_cell() {
        let store = Store::new(0_u32);
        let handle = store.clone();
        let tally = Rc::new(RefCell::new(0_u32));
        let _sub = {
            let t = Rc::clone(&tally);
            store.subscribe(move |v| *t.borrow_mut() = *v)
        };
        handle.set(7);
        assert_eq!(store.get(), 7);
        assert_eq!(*tally.borrow(), 7);
    }

    #[test]
    fn unsubscribe_after_store_dropped_is_harmless() {
        let store = Store::new(0_u32);
        let sub = store.subscribe(|_| {});
        drop(store);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
