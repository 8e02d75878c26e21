// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element visibility watcher: threshold config, crossing events, and
//! the attach/detach discipline.

use kurbo::Rect;

use crate::intersect::intersection_ratio;

/// Detection configuration for a [`VisibilityState`].
///
/// `threshold` is the visible-area ratio at or above which the element
/// counts as visible. A threshold of `0.0` means any positive overlap is
/// enough; an edge touch without overlap does not count. `margin` expands
/// the viewport rectangle on all four sides before intersecting, so an
/// element can be treated as visible shortly before it scrolls into the real
/// viewport (a negative margin shrinks it instead).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionConfig {
    /// Visible-area ratio in `[0, 1]` required for the element to count as visible.
    pub threshold: f64,
    /// Amount the viewport is expanded on every side before intersecting.
    pub margin: f64,
}

impl IntersectionConfig {
    /// Creates a config with the given `threshold`, clamped to `[0, 1]`, and no margin.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            margin: 0.0,
        }
    }

    /// Sets the viewport margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Whether `ratio` counts as visible under this config.
    #[must_use]
    pub fn is_visible(&self, ratio: f64) -> bool {
        if self.threshold == 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }
}

impl Default for IntersectionConfig {
    /// Any positive overlap counts as visible; no margin.
    fn default() -> Self {
        Self::new(0.0)
    }
}

bitflags::bitflags! {
    /// Flags describing a visibility transition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct VisibilityFlags: u8 {
        /// The element currently counts as visible.
        const VISIBLE = 0b0000_0001;
        /// This event marks the crossing from hidden to visible.
        const ENTERED = 0b0000_0010;
        /// This event marks the crossing from visible to hidden.
        const EXITED  = 0b0000_0100;
    }
}

/// A visibility crossing reported by [`VisibilityState::update`].
///
/// Exactly one of [`entered`](Self::entered) / [`exited`](Self::exited) holds
/// for every event; steady states produce no events at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityEvent {
    /// Transition flags for this event.
    pub flags: VisibilityFlags,
    /// The intersection ratio observed at the crossing, in `[0, 1]`.
    pub ratio: f64,
}

impl VisibilityEvent {
    /// `true` if the element just crossed into view.
    #[must_use]
    pub fn entered(&self) -> bool {
        self.flags.contains(VisibilityFlags::ENTERED)
    }

    /// `true` if the element just crossed out of view.
    #[must_use]
    pub fn exited(&self) -> bool {
        self.flags.contains(VisibilityFlags::EXITED)
    }
}

/// Visibility watcher for a single element.
///
/// The watcher is driven by the host: feed it the element's rectangle and
/// the viewport rectangle with [`update`](Self::update) whenever either may
/// have moved, and it returns a [`VisibilityEvent`] only when visibility
/// crosses the configured threshold edge. While detached it observes nothing
/// and emits nothing.
///
/// [`attach`](Self::attach) and [`detach`](Self::detach) carry the teardown
/// discipline the engine relies on: detaching resets the edge state, so a
/// later attach starts from "not visible" and cannot replay or suppress
/// events left over from a previous element binding. Attaching while already
/// attached first detaches, so observation is torn down exactly once per
/// rebind by construction.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityState {
    config: IntersectionConfig,
    attached: bool,
    was_visible: bool,
}

impl VisibilityState {
    /// Creates a detached watcher with the given config.
    #[must_use]
    pub fn new(config: IntersectionConfig) -> Self {
        Self {
            config,
            attached: false,
            was_visible: false,
        }
    }

    /// The detection config.
    #[must_use]
    pub fn config(&self) -> IntersectionConfig {
        self.config
    }

    /// Replaces the detection config.
    ///
    /// The edge state is kept; the new thresholds apply from the next
    /// [`update`](Self::update).
    pub fn set_config(&mut self, config: IntersectionConfig) {
        self.config = config;
    }

    /// `true` while an element is bound to this watcher.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// `true` if the watched element currently counts as visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.attached && self.was_visible
    }

    /// Starts observing. Rebinds (detach, then attach) if already attached.
    pub fn attach(&mut self) {
        self.detach();
        self.attached = true;
    }

    /// Stops observing and resets the edge state. Idempotent and immediate;
    /// no events are emitted after a detach until the next attach.
    pub fn detach(&mut self) {
        self.attached = false;
        self.was_visible = false;
    }

    /// Feeds one geometry sample and reports a threshold crossing, if any.
    ///
    /// Returns `None` while detached, and `None` when the sample leaves the
    /// element on the same side of the threshold as the previous sample. The
    /// first sample after an attach may report an immediate entry when the
    /// element is already in view.
    pub fn update(&mut self, target: Rect, viewport: Rect) -> Option<VisibilityEvent> {
        if !self.attached {
            return None;
        }

        let expanded = viewport.inflate(self.config.margin, self.config.margin);
        let ratio = intersection_ratio(target, expanded);
        let visible = self.config.is_visible(ratio);
        if visible == self.was_visible {
            return None;
        }
        self.was_visible = visible;

        let flags = if visible {
            VisibilityFlags::ENTERED | VisibilityFlags::VISIBLE
        } else {
            VisibilityFlags::EXITED
        };
        Some(VisibilityEvent { flags, ratio })
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new(IntersectionConfig::default())
    }
}
