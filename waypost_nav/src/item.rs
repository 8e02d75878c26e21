// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation-item role: derived props, activation, and redraw binding.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::hash::Hash;

use waypost_store::{Store, Subscription};

use crate::registry::Registry;

/// The prop bundle a [`NavItem`] hands to its renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemProps<K> {
    /// The target this item navigates to.
    pub target: K,
    /// `true` when this item's target is the active target.
    pub is_active: bool,
    /// `true` when this item's target has a mounted region.
    pub is_available: bool,
}

/// One navigation item bound to a target identifier.
///
/// The item reads the engine's two stores and derives two booleans for its
/// renderer: `is_active` (value equality against the active target) and
/// `is_available` (presence in the registry). It never owns visual output;
/// [`render`](Self::render) passes the derived [`ItemProps`] to whatever
/// renderer the host supplies.
///
/// Minted by [`Nav::item`](crate::Nav::item).
pub struct NavItem<K: 'static, H: 'static> {
    target: K,
    active: Store<K>,
    registry: Store<Registry<K, H>>,
    binding: Option<ItemBinding<K, H>>,
}

/// Keeps the redraw subscriptions alive for a bound item.
struct ItemBinding<K: 'static, H: 'static> {
    _active: Subscription<K>,
    _registry: Subscription<Registry<K, H>>,
}

impl<K, H> NavItem<K, H>
where
    K: Clone + Eq + Hash,
    H: Clone,
{
    pub(crate) fn new(target: K, active: Store<K>, registry: Store<Registry<K, H>>) -> Self {
        Self {
            target,
            active,
            registry,
            binding: None,
        }
    }

    /// The target this item navigates to.
    #[must_use]
    pub fn target(&self) -> &K {
        &self.target
    }

    /// `true` when this item's target is the active target.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.with(|active| *active == self.target)
    }

    /// `true` when this item's target has a mounted region.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.registry.with(|registry| registry.contains(&self.target))
    }

    /// A snapshot of the props this item would render with right now.
    #[must_use]
    pub fn props(&self) -> ItemProps<K> {
        ItemProps {
            target: self.target.clone(),
            is_active: self.is_active(),
            is_available: self.is_available(),
        }
    }

    /// Renders through a caller-supplied renderer.
    ///
    /// The renderer receives the current [`ItemProps`] and returns whatever
    /// output the host understands; the engine never inspects it. A
    /// pre-built element is wrapped at the call site as a renderer that
    /// ignores or applies the props, so this single function shape covers
    /// both styles of consumer.
    pub fn render<R>(&self, renderer: impl FnOnce(ItemProps<K>) -> R) -> R {
        renderer(self.props())
    }

    /// Activates this item's target, as a user click would.
    ///
    /// Unconditionally sets the active target to this item's target —
    /// overriding any earlier visibility-driven pick — then returns the
    /// registered element handle so the host can scroll it into view. When
    /// the target has no mounted region the scroll request is `None` and the
    /// active target is still updated.
    pub fn activate(&self) -> Option<H> {
        self.active.set(self.target.clone());
        self.registry
            .with(|registry| registry.get(&self.target).cloned())
    }

    /// Binds a redraw hook to this item's observable inputs.
    ///
    /// `redraw` fires on every active-target change, and on registry changes
    /// only when they flip this target's presence — registry churn for other
    /// targets does not redraw this item. Binding again replaces the
    /// previous hook; dropping the item (or calling
    /// [`unbind`](Self::unbind)) removes it.
    pub fn bind(&mut self, redraw: impl FnMut() + 'static) {
        let redraw = Rc::new(RefCell::new(redraw));

        let active_sub = {
            let redraw = Rc::clone(&redraw);
            self.active.subscribe(move |_| (redraw.borrow_mut())())
        };

        let registry_sub = {
            let target = self.target.clone();
            let mut last_present = self.is_available();
            self.registry.subscribe(move |registry| {
                let present = registry.contains(&target);
                if present != last_present {
                    last_present = present;
                    (redraw.borrow_mut())();
                }
            })
        };

        self.binding = Some(ItemBinding {
            _active: active_sub,
            _registry: registry_sub,
        });
    }

    /// Removes the redraw hook installed by [`bind`](Self::bind), if any.
    pub fn unbind(&mut self) {
        self.binding = None;
    }
}

impl<K: core::fmt::Debug, H> core::fmt::Debug for NavItem<K, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavItem")
            .field("target", &self.target)
            .field("bound", &self.binding.is_some())
            .finish_non_exhaustive()
    }
}
