// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot-diffing bridge between a [`Store`] and a host's redraw cycle.
//!
//! A raw [`Store::subscribe`] fires on every [`Store::set`], including sets
//! that replace the value with an equal one. Hosts that re-render from store
//! state usually want the narrower contract "invoke me once now, then again
//! whenever the snapshot actually changes" — that is [`Store::watch`].
//!
//! Change detection is `PartialEq` on the value. Stores holding copy-on-write
//! snapshots compared by pointer identity (such as the navigation registry)
//! get exact mutation tracking out of this, because their replacement
//! discipline guarantees a fresh identity per mutation.

use crate::store::{Store, Subscription};

impl<T: Clone + PartialEq> Store<T> {
    /// Delivers the current value to `f` immediately, then re-invokes `f`
    /// whenever a [`Store::set`] installs a value that differs from the last
    /// one delivered.
    ///
    /// Equal consecutive values are skipped, so `f` can be an unconditional
    /// "schedule a redraw" hook without causing redundant work.
    ///
    /// ```rust
    /// use waypost_store::Store;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let store = Store::new(1_u32);
    /// let redraws = Rc::new(Cell::new(0_u32));
    /// let sub = {
    ///     let redraws = Rc::clone(&redraws);
    ///     store.watch(move |_| redraws.set(redraws.get() + 1))
    /// };
    ///
    /// assert_eq!(redraws.get(), 1); // initial delivery
    /// store.set(1); // unchanged: skipped
    /// store.set(2);
    /// assert_eq!(redraws.get(), 2);
    /// # drop(sub);
    /// ```
    pub fn watch(&self, mut f: impl FnMut(&T) + 'static) -> Subscription<T> {
        let mut last = self.get();
        f(&last);
        self.subscribe(move |value| {
            if *value != last {
                last = value.clone();
                f(value);
            }
        })
    }
}
