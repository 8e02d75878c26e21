// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Copy-on-write snapshot of the target → element-handle mapping.

use alloc::rc::Rc;
use core::hash::Hash;
use hashbrown::HashMap;

/// An immutable snapshot of which targets currently have a mounted element.
///
/// A target is present iff its region is mounted. Mutations never touch the
/// underlying map: [`insert`](Self::insert) and [`remove`](Self::remove)
/// build a new map and return a new snapshot with a fresh identity, so a
/// store holding a `Registry` can detect mutations by comparing snapshots.
///
/// Equality (`PartialEq`) is **snapshot identity**, not deep map equality:
/// two snapshots compare equal iff they share the same allocation. Under the
/// copy-on-write discipline that is exactly "no mutation happened in
/// between", which is what
/// [`Store::watch`](waypost_store::Store::watch)-style change detection
/// needs; it is deliberately not a structural comparison.
pub struct Registry<K, H> {
    map: Rc<HashMap<K, H>>,
}

impl<K, H> Registry<K, H> {
    /// Creates an empty registry snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: Rc::new(HashMap::new()),
        }
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` when no targets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Eq + Hash, H> Registry<K, H> {
    /// `true` if `target` currently has a mounted element.
    #[must_use]
    pub fn contains(&self, target: &K) -> bool {
        self.map.contains_key(target)
    }

    /// The element handle registered for `target`, if any.
    #[must_use]
    pub fn get(&self, target: &K) -> Option<&H> {
        self.map.get(target)
    }

    /// Iterates over the registered targets, in no particular order.
    pub fn targets(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }
}

impl<K: Clone + Eq + Hash, H: Clone> Registry<K, H> {
    /// Returns a new snapshot with `target` mapped to `handle`.
    ///
    /// An existing entry for `target` is replaced (last write wins). The
    /// result is always a fresh snapshot, even when the handle is unchanged.
    #[must_use]
    pub fn insert(&self, target: K, handle: H) -> Self {
        let mut map = (*self.map).clone();
        map.insert(target, handle);
        Self { map: Rc::new(map) }
    }

    /// Returns a new snapshot without `target`.
    ///
    /// Removing an absent target is not a mutation: the same snapshot is
    /// returned (identical identity), so observers see no change.
    #[must_use]
    pub fn remove(&self, target: &K) -> Self {
        if !self.map.contains_key(target) {
            return self.clone();
        }
        let mut map = (*self.map).clone();
        map.remove(target);
        Self { map: Rc::new(map) }
    }
}

impl<K, H> Clone for Registry<K, H> {
    fn clone(&self) -> Self {
        Self {
            map: Rc::clone(&self.map),
        }
    }
}

impl<K, H> Default for Registry<K, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> PartialEq for Registry<K, H> {
    /// Snapshot identity: `true` iff both snapshots share one allocation.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.map, &other.map)
    }
}

impl<K, H> core::fmt::Debug for Registry<K, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
