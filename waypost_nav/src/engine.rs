// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: one pair of stores and the role constructors.

use core::hash::Hash;

use waypost_store::Store;
use waypost_visibility::{IntersectionConfig, VisibilityState};

use crate::item::NavItem;
use crate::region::TargetRegion;
use crate::registry::Registry;

/// A scroll-spy navigation engine instance.
///
/// Each `Nav` owns its own pair of stores — the active target and the
/// registry — created at construction and shared by every role it mints.
/// Engines are independent: two `Nav`s on one page never interact, and an
/// engine (not a process-wide global) is the unit of testing.
///
/// `Nav` is a cheap handle; clones share the same store pair. It is
/// single-threaded by design (`!Send`/`!Sync` through its `Rc`-based
/// stores): all mutations and notifications run synchronously on the
/// calling thread, and the two stores are not transactionally coupled — an
/// observer may see one updated before the other, and both converge once
/// the respective `set` returns.
pub struct Nav<K: 'static, H: 'static> {
    active: Store<K>,
    registry: Store<Registry<K, H>>,
}

impl<K, H> Nav<K, H>
where
    K: Clone + Eq + Hash,
    H: Clone,
{
    /// Creates an engine whose active target starts as `initial`.
    #[must_use]
    pub fn new(initial: K) -> Self {
        Self {
            active: Store::new(initial),
            registry: Store::new(Registry::new()),
        }
    }

    /// The current active target.
    #[must_use]
    pub fn active(&self) -> K {
        self.active.get()
    }

    /// `true` if `target` currently has a mounted region.
    #[must_use]
    pub fn is_registered(&self, target: &K) -> bool {
        self.registry.with(|registry| registry.contains(target))
    }

    /// The element handle registered for `target`, if any.
    #[must_use]
    pub fn registered_handle(&self, target: &K) -> Option<H> {
        self.registry.with(|registry| registry.get(target).cloned())
    }

    /// The active-target store, for hosts that subscribe directly.
    #[must_use]
    pub fn active_store(&self) -> &Store<K> {
        &self.active
    }

    /// The registry store, for hosts that subscribe directly.
    #[must_use]
    pub fn registry_store(&self) -> &Store<Registry<K, H>> {
        &self.registry
    }

    /// Mints a navigation item for `target`.
    #[must_use]
    pub fn item(&self, target: K) -> NavItem<K, H> {
        NavItem::new(target, self.active.clone(), self.registry.clone())
    }

    /// Mints a target region for `target` with the given detection config.
    #[must_use]
    pub fn region(&self, target: K, config: IntersectionConfig) -> TargetRegion<K, H> {
        TargetRegion::new(
            target,
            self.active.clone(),
            self.registry.clone(),
            VisibilityState::new(config),
        )
    }
}

impl<K, H> Clone for Nav<K, H> {
    fn clone(&self) -> Self {
        Self {
            active: self.active.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl<K, H> core::fmt::Debug for Nav<K, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Nav")
            .field("registered", &self.registry.with(Registry::len))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Rect;

    /// A page of stacked 100-tall sections and a 100-tall viewport.
    fn section_bounds(index: usize) -> Rect {
        let top = 100.0 * index as f64;
        Rect::new(0.0, top, 100.0, top + 100.0)
    }

    fn viewport_at(scroll: f64) -> Rect {
        Rect::new(0.0, scroll, 100.0, scroll + 100.0)
    }

    #[test]
    fn unmounted_item_is_neither_active_nor_available() {
        // Engine starts at "anchor-0"; nothing mounted.
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let item = nav.item("anchor-1");
        let props = item.props();
        assert_eq!(props.target, "anchor-1");
        assert!(!props.is_active);
        assert!(!props.is_available);
    }

    #[test]
    fn mounting_makes_an_item_available_but_not_active() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let item = nav.item("anchor-1");
        let mut region = nav.region("anchor-1", IntersectionConfig::default());

        region.element_ref(Some(7));
        let props = item.props();
        assert!(props.is_available);
        assert!(!props.is_active);
        assert_eq!(nav.active(), "anchor-0");
    }

    #[test]
    fn entering_view_activates_exactly_one_target() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let item_1 = nav.item("anchor-1");
        let item_2 = nav.item("anchor-2");
        let mut region_1 = nav.region("anchor-1", IntersectionConfig::new(0.5));
        let mut region_2 = nav.region("anchor-2", IntersectionConfig::new(0.5));

        region_1.element_ref(Some(1));
        region_2.element_ref(Some(2));

        // Viewport over section 0: region 1 (section 1) enters as we scroll.
        region_1.update(section_bounds(1), viewport_at(60.0));
        region_2.update(section_bounds(2), viewport_at(60.0));

        assert_eq!(nav.active(), "anchor-1");
        assert!(item_1.props().is_active);
        assert!(!item_2.props().is_active);

        // Scroll on: region 2 enters and takes over.
        region_1.update(section_bounds(1), viewport_at(160.0));
        region_2.update(section_bounds(2), viewport_at(160.0));
        assert_eq!(nav.active(), "anchor-2");
        assert!(!item_1.props().is_active);
        assert!(item_2.props().is_active);
    }

    #[test]
    fn activation_returns_the_scroll_handle_and_wins_over_stale_visibility() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let item_3 = nav.item("anchor-3");
        let mut region_3 = nav.region("anchor-3", IntersectionConfig::default());

        region_3.element_ref(Some(33));

        // Click: active becomes "anchor-3" and the handle comes back once.
        assert_eq!(item_3.activate(), Some(33));
        assert_eq!(nav.active(), "anchor-3");

        // Geometry that produces no crossing leaves the click's pick alone.
        region_3.update(section_bounds(3), viewport_at(0.0));
        assert_eq!(nav.active(), "anchor-3");
    }

    #[test]
    fn activating_an_unavailable_target_skips_the_scroll_but_not_the_state() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let item = nav.item("anchor-9");
        assert_eq!(item.activate(), None);
        assert_eq!(nav.active(), "anchor-9");
    }

    #[test]
    fn unmounting_the_active_region_leaves_the_active_target_stale() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let item = nav.item("anchor-1");
        let mut region = nav.region("anchor-1", IntersectionConfig::default());

        region.element_ref(Some(1));
        region.update(section_bounds(1), viewport_at(100.0));
        assert_eq!(nav.active(), "anchor-1");

        region.element_ref(None);
        assert!(!nav.is_registered(&"anchor-1"));

        // The last selection survives: active but unavailable.
        let props = item.props();
        assert!(props.is_active);
        assert!(!props.is_available);
    }

    #[test]
    fn registry_reflects_mount_state_through_mount_unmount_cycles() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let mut region = nav.region("anchor-1", IntersectionConfig::default());

        assert!(!nav.is_registered(&"anchor-1"));
        region.mount(5);
        assert!(nav.is_registered(&"anchor-1"));
        assert_eq!(nav.registered_handle(&"anchor-1"), Some(5));
        region.unmount();
        assert!(!nav.is_registered(&"anchor-1"));
        region.unmount(); // idempotent
        assert!(!nav.is_registered(&"anchor-1"));
        region.mount(6);
        assert_eq!(nav.registered_handle(&"anchor-1"), Some(6));
    }

    #[test]
    fn registry_mutations_replace_the_snapshot() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let mut region = nav.region("anchor-1", IntersectionConfig::default());

        let before = nav.registry_store().get();
        region.mount(5);
        let mounted = nav.registry_store().get();
        assert!(mounted != before);
        region.unmount();
        let unmounted = nav.registry_store().get();
        assert!(unmounted != mounted);
    }

    #[test]
    fn dropping_a_region_unmounts_it() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        {
            let mut region = nav.region("anchor-1", IntersectionConfig::default());
            region.mount(5);
            assert!(nav.is_registered(&"anchor-1"));
        }
        assert!(!nav.is_registered(&"anchor-1"));
    }

    #[test]
    fn bound_item_redraws_on_active_changes_and_presence_flips_only() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let mut item = nav.item("anchor-1");
        let redraws = Rc::new(Cell::new(0_u32));
        {
            let redraws = Rc::clone(&redraws);
            item.bind(move || redraws.set(redraws.get() + 1));
        }

        // Active-target changes always redraw, even for other targets.
        nav.active_store().set("anchor-2");
        assert_eq!(redraws.get(), 1);

        // Registry churn for other targets does not redraw this item.
        let mut other = nav.region("anchor-2", IntersectionConfig::default());
        other.mount(2);
        assert_eq!(redraws.get(), 1);

        // A presence flip for this item's target does.
        let mut region = nav.region("anchor-1", IntersectionConfig::default());
        region.mount(1);
        assert_eq!(redraws.get(), 2);

        // Handle replacement without a presence flip: no redraw.
        region.mount(11);
        assert_eq!(redraws.get(), 2);

        region.unmount();
        assert_eq!(redraws.get(), 3);

        // Unbinding stops redraws.
        item.unbind();
        nav.active_store().set("anchor-3");
        assert_eq!(redraws.get(), 3);
    }

    #[test]
    fn renderer_receives_the_prop_bundle() {
        let nav: Nav<&str, u32> = Nav::new("anchor-1");
        let item = nav.item("anchor-1");
        let label = item.render(|props| {
            if props.is_active {
                "active"
            } else {
                "idle"
            }
        });
        assert_eq!(label, "active");
    }

    #[test]
    fn duplicate_target_mounts_are_last_write_wins() {
        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let mut first = nav.region("anchor-1", IntersectionConfig::default());
        let mut second = nav.region("anchor-1", IntersectionConfig::default());

        first.mount(1);
        second.mount(2);
        assert_eq!(nav.registered_handle(&"anchor-1"), Some(2));

        // Whichever region unmounts first removes the shared entry.
        first.unmount();
        assert!(!nav.is_registered(&"anchor-1"));
        second.unmount();
    }

    #[test]
    fn scroll_sweep_keeps_a_single_active_target() {
        // Drive a full scroll sweep over five sections and check that every
        // activation is caused by exactly one region at a time.
        let nav: Nav<usize, u32> = Nav::new(0);
        let mut regions: Vec<_> = (0..5)
            .map(|i| nav.region(i, IntersectionConfig::new(0.5)))
            .collect();
        for (i, region) in regions.iter_mut().enumerate() {
            region.element_ref(Some(u32::try_from(i).unwrap()));
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let log = Rc::clone(&log);
            nav.active_store().subscribe(move |active| log.borrow_mut().push(*active))
        };

        let mut scroll = 0.0;
        while scroll <= 400.0 {
            for (i, region) in regions.iter_mut().enumerate() {
                region.update(section_bounds(i), viewport_at(scroll));
            }
            scroll += 20.0;
        }

        // Sections activate in order, once each.
        assert_eq!(*log.borrow(), [0, 1, 2, 3, 4]);
        assert_eq!(nav.active(), 4);
    }

    #[test]
    fn engines_are_independent() {
        let left: Nav<&str, u32> = Nav::new("a");
        let right: Nav<&str, u32> = Nav::new("a");
        left.item("b").activate();
        assert_eq!(left.active(), "b");
        assert_eq!(right.active(), "a");
    }

    #[test]
    fn public_surface_types_are_reachable_from_this_crate() {
        // Every type named in the API resolves through this crate's own
        // re-exports, so consumers need no direct leaf-crate dependencies.
        use crate::kurbo::Rect;
        use crate::{IntersectionConfig, Nav, Store, Subscription, VisibilityEvent};

        let nav: Nav<&str, u32> = Nav::new("anchor-0");
        let active: &Store<&str> = nav.active_store();
        assert_eq!(active.get(), "anchor-0");

        let _sub: Subscription<&str> = active.subscribe(|_| {});
        let mut region = nav.region("anchor-0", IntersectionConfig::default());
        region.element_ref(Some(1));
        let event: Option<VisibilityEvent> = region.update(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        assert!(event.is_some_and(|e| e.entered()));
    }
}
