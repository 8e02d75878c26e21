// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area-ratio intersection between a target rect and a viewport rect.

use kurbo::Rect;

/// Returns how much of `target` lies inside `viewport`, in `[0, 1]`.
///
/// The ratio is the area of the overlap divided by the area of the target,
/// so `1.0` means the target is fully contained and `0.0` means the two
/// rectangles are disjoint or merely share an edge. Both inputs are
/// normalized with [`Rect::abs`] first, so inverted rects are accepted.
///
/// Degenerate targets (zero width or height, such as an anchor line) have no
/// area to ratio against; they report `1.0` when they touch the viewport and
/// `0.0` otherwise.
#[must_use]
pub fn intersection_ratio(target: Rect, viewport: Rect) -> f64 {
    let target = target.abs();
    let viewport = viewport.abs();

    let target_area = target.area();
    if target_area == 0.0 {
        let touches = target.x0 <= viewport.x1
            && target.x1 >= viewport.x0
            && target.y0 <= viewport.y1
            && target.y1 >= viewport.y0;
        return if touches { 1.0 } else { 0.0 };
    }

    // `Rect::intersect` clamps, so a disjoint pair yields a zero-area rect.
    let overlap = target.intersect(viewport);
    (overlap.area() / target_area).clamp(0.0, 1.0)
}
