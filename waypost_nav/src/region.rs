// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The target-region role: mount bookkeeping and visibility promotion.

use core::hash::Hash;

use kurbo::Rect;
use waypost_store::Store;
use waypost_visibility::{VisibilityEvent, VisibilityState};

use crate::registry::Registry;

/// One navigable page region bound to a target identifier.
///
/// A region writes to both engine stores: the registry on mount and unmount
/// (always by copy-on-write snapshot replacement), and the active target
/// when its watcher reports the region crossed into view. The host renderer
/// owns the actual element; it reports the element's existence through
/// [`element_ref`](Self::element_ref) and its geometry through
/// [`update`](Self::update).
///
/// Per-target lifecycle: unmounted → mounted and hidden → mounted and
/// visible, and back. Crossing into view sets the active target to this
/// region's target. Unmounting removes the target from the registry but
/// intentionally leaves the active target untouched even when it points at
/// this region — the user's last selection survives, and activating an
/// unavailable target is simply a scroll no-op.
///
/// Minted by [`Nav::region`](crate::Nav::region).
#[derive(Debug)]
pub struct TargetRegion<K, H>
where
    K: Clone + Eq + Hash + 'static,
    H: Clone + 'static,
{
    target: K,
    active: Store<K>,
    registry: Store<Registry<K, H>>,
    watcher: VisibilityState,
    mounted: bool,
}

impl<K, H> TargetRegion<K, H>
where
    K: Clone + Eq + Hash,
    H: Clone,
{
    pub(crate) fn new(
        target: K,
        active: Store<K>,
        registry: Store<Registry<K, H>>,
        watcher: VisibilityState,
    ) -> Self {
        Self {
            target,
            active,
            registry,
            watcher,
            mounted: false,
        }
    }

    /// The target this region represents.
    #[must_use]
    pub fn target(&self) -> &K {
        &self.target
    }

    /// `true` while an element is mounted for this region.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Read access to the region's visibility watcher.
    #[must_use]
    pub fn watcher(&self) -> &VisibilityState {
        &self.watcher
    }

    /// The element-existence callback for the host renderer.
    ///
    /// Call with `Some(handle)` exactly once per mount and with `None` once
    /// per unmount; this forwards to [`mount`](Self::mount) and
    /// [`unmount`](Self::unmount).
    pub fn element_ref(&mut self, handle: Option<H>) {
        match handle {
            Some(handle) => self.mount(handle),
            None => self.unmount(),
        }
    }

    /// Registers `handle` for this region's target and starts watching.
    ///
    /// Mounting while already mounted rebinds: the watcher restarts from
    /// hidden and the registry entry is replaced. Two live regions sharing
    /// one target identifier are not supported; the registry is last write
    /// wins and whichever region unmounts first removes the shared entry.
    pub fn mount(&mut self, handle: H) {
        self.registry
            .set(self.registry.get().insert(self.target.clone(), handle));
        self.watcher.attach();
        self.mounted = true;
    }

    /// Removes this region's target from the registry and stops watching.
    ///
    /// Idempotent. The active target is left unchanged even when it is this
    /// region's target.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.watcher.detach();
        self.registry.set(self.registry.get().remove(&self.target));
    }

    /// Feeds one geometry sample for the mounted element.
    ///
    /// `bounds` is the element's rectangle and `viewport` the visible window,
    /// both in the same coordinate space. When the sample makes the region
    /// cross into view, the active target is set to this region's target.
    /// Returns the underlying crossing event, if any; no-op while unmounted.
    pub fn update(&mut self, bounds: Rect, viewport: Rect) -> Option<VisibilityEvent> {
        let event = self.watcher.update(bounds, viewport)?;
        if event.entered() {
            self.active.set(self.target.clone());
        }
        Some(event)
    }
}

impl<K, H> Drop for TargetRegion<K, H>
where
    K: Clone + Eq + Hash + 'static,
    H: Clone + 'static,
{
    fn drop(&mut self) {
        // A dropped region must not leave a stale registry entry behind.
        self.unmount();
    }
}
