// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypost Visibility: viewport intersection and crossing detection.
//!
//! This crate answers one question for scroll-spy style UIs: *has this
//! element crossed into or out of view?* It has two layers:
//!
//! - [`intersection_ratio`]: pure geometry — how much of a target rectangle
//!   overlaps a viewport rectangle, as a ratio of the target's area.
//! - [`VisibilityState`]: a small `&mut`-driven watcher that owns the
//!   attach/detach discipline for one element and turns a stream of geometry
//!   updates into edge events ([`VisibilityEvent`]) emitted only when
//!   visibility crosses the configured threshold.
//!
//! There is no platform observation primitive here: the host feeds element
//! and viewport rectangles (per frame, per scroll tick, or whenever layout
//! changes), and the watcher reports crossings as return values. Higher
//! layers wire those events into whatever state they drive; this crate
//! stores no callbacks.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use waypost_visibility::{IntersectionConfig, VisibilityState};
//!
//! // Visible once half the element's area is inside the viewport.
//! let mut watcher = VisibilityState::new(IntersectionConfig::new(0.5));
//! watcher.attach();
//!
//! let element = Rect::new(0.0, 100.0, 100.0, 200.0);
//!
//! // Element fully below a 100-tall viewport: nothing to report.
//! assert!(watcher.update(element, Rect::new(0.0, 0.0, 100.0, 100.0)).is_none());
//!
//! // Scroll down 150: 50% of the element is in view — it entered.
//! let event = watcher.update(element, Rect::new(0.0, 150.0, 100.0, 250.0)).unwrap();
//! assert!(event.entered());
//!
//! // Further scrolling in view produces no duplicate events.
//! assert!(watcher.update(element, Rect::new(0.0, 160.0, 100.0, 260.0)).is_none());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod intersect;
mod state;

pub use intersect::intersection_ratio;
pub use state::{IntersectionConfig, VisibilityEvent, VisibilityFlags, VisibilityState};
