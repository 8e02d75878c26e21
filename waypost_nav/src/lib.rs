// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypost Nav: a renderer-agnostic scroll-spy navigation engine.
//!
//! A set of navigation items tracks which of several page regions is
//! currently in view or selected, and activating an item asks the host to
//! scroll the matching region into view. This crate is the reactive core of
//! that behavior; it knows nothing about widgets, markup, or any particular
//! UI framework.
//!
//! Each [`Nav`] instance composes two independent
//! [`Store`](waypost_store::Store)s:
//!
//! - the **active target**: the identifier of the region currently
//!   considered selected, and
//! - the **registry**: a copy-on-write [`Registry`] mapping each mounted
//!   region's identifier to an opaque element handle.
//!
//! From the engine you mint the two consumer-facing roles:
//!
//! - [`NavItem`]: reads both stores, exposes
//!   `{ target, is_active, is_available }` props to a renderer, and on
//!   activation sets the active target and returns the registered handle as
//!   a scroll request for the host's scrolling primitive.
//! - [`TargetRegion`]: owns a [`VisibilityState`] watcher, inserts/removes
//!   its handle in the registry on mount/unmount, and promotes its target to
//!   active when the watcher reports the region crossed into view.
//!
//! Target identifiers are any `Clone + Eq + Hash` value; element handles are
//! any `Clone` value and the engine never interprets them.
//!
//! ## Minimal example
//!
//! ```rust
//! use waypost_nav::kurbo::Rect;
//! use waypost_nav::{IntersectionConfig, Nav};
//!
//! // An engine with string targets and integer element handles.
//! let nav: Nav<&str, u32> = Nav::new("anchor-0");
//! let item = nav.item("anchor-1");
//! let mut region = nav.region("anchor-1", IntersectionConfig::default());
//!
//! // Nothing mounted yet: the item is neither active nor available.
//! assert!(!item.props().is_active);
//! assert!(!item.props().is_available);
//!
//! // The host mounts the region's element (handle 7) and reports geometry.
//! region.element_ref(Some(7));
//! region.update(
//!     Rect::new(0.0, 0.0, 100.0, 50.0),   // element bounds
//!     Rect::new(0.0, 0.0, 100.0, 100.0),  // viewport
//! );
//!
//! // The region entered the viewport, so its item is now the active one.
//! assert!(item.props().is_active);
//! assert!(item.props().is_available);
//!
//! // A click: active is set (it already was) and the handle comes back as
//! // the scroll-into-view request.
//! assert_eq!(item.activate(), Some(7));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod item;
mod region;
mod registry;

pub use engine::Nav;
pub use item::{ItemProps, NavItem};
pub use region::TargetRegion;
pub use registry::Registry;

// Everything that appears in this crate's public API is reachable from it:
// the store handles behind `active_store`/`registry_store`, the visibility
// types, and the geometry crate the region updates are expressed in.
pub use kurbo;
pub use waypost_store::{Store, Subscription};
pub use waypost_visibility::{IntersectionConfig, VisibilityEvent, VisibilityFlags, VisibilityState};
