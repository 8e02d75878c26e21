// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-spy over a simulated page: sticky nav tracking five sections.
//!
//! The "page" is five 300-tall sections stacked vertically, viewed through a
//! 400-tall viewport. Scrolling is simulated by moving the viewport; each
//! region is fed the same geometry a real host would read back from layout.
//!
//! Run:
//! - `cargo run -p waypost_demos --example scroll_spy`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use waypost_nav::{IntersectionConfig, Nav};
use waypost_store::Subscription;
use waypost_visibility::intersection_ratio;

const SECTION_HEIGHT: f64 = 300.0;
const VIEWPORT_HEIGHT: f64 = 400.0;

fn section_bounds(index: usize) -> Rect {
    let top = SECTION_HEIGHT * index as f64;
    Rect::new(0.0, top, 800.0, top + SECTION_HEIGHT)
}

fn viewport_at(scroll: f64) -> Rect {
    Rect::new(0.0, scroll, 800.0, scroll + VIEWPORT_HEIGHT)
}

fn main() {
    let titles = [
        "Introduction",
        "Getting started",
        "Core concepts",
        "Advanced usage",
        "Reference",
    ];

    // Element handles are just section indices here; a real host would hand
    // the engine whatever it uses to address a rendered element.
    let nav: Nav<&str, usize> = Nav::new(titles[0]);

    // Watch the active target directly; a host might drive analytics or a
    // URL fragment off this store instead of a nav item.
    let _active_log: Subscription<&str> = nav
        .active_store()
        .subscribe(|active| println!("         -> active: {active}"));

    // Mount one region per section. A section counts as "in view" once 40%
    // of it is inside the viewport.
    let config = IntersectionConfig::new(0.4);
    let mut regions: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(index, title)| {
            let mut region = nav.region(*title, config);
            region.element_ref(Some(index));
            region
        })
        .collect();

    // Bind one nav item per section; redraws repaint the whole nav bar.
    let dirty = Rc::new(RefCell::new(true));
    let mut items = Vec::new();
    for title in titles {
        let mut item = nav.item(title);
        let dirty = Rc::clone(&dirty);
        item.bind(move || *dirty.borrow_mut() = true);
        items.push(item);
    }

    let paint_nav = |scroll: f64| {
        let bar: Vec<String> = items
            .iter()
            .map(|item| {
                item.render(|props| {
                    if props.is_active {
                        format!("[{}]", props.target)
                    } else {
                        props.target.to_string()
                    }
                })
            })
            .collect();
        println!("scroll {scroll:>6.0}  |  {}", bar.join("  "));
    };

    // Scroll from top to bottom; repaint only when something changed.
    println!("-- scrolling --");
    let mut scroll = 0.0;
    let max_scroll = SECTION_HEIGHT * titles.len() as f64 - VIEWPORT_HEIGHT;
    while scroll <= max_scroll {
        for (index, region) in regions.iter_mut().enumerate() {
            region.update(section_bounds(index), viewport_at(scroll));
        }
        if std::mem::replace(&mut *dirty.borrow_mut(), false) {
            paint_nav(scroll);
        }
        scroll += 50.0;
    }

    // Click "Getting started": the engine hands back the element handle so
    // the host can scroll it into view (smooth scrolling is the host's job).
    println!("-- click \"Getting started\" --");
    let clicked = &items[1];
    if let Some(handle) = clicked.activate() {
        let target_scroll = section_bounds(handle).y0;
        for (index, region) in regions.iter_mut().enumerate() {
            region.update(section_bounds(index), viewport_at(target_scroll));
        }
        if std::mem::replace(&mut *dirty.borrow_mut(), false) {
            paint_nav(target_scroll);
        }
        let ratio = intersection_ratio(section_bounds(handle), viewport_at(target_scroll));
        println!("\"{}\" now {:.0}% in view", titles[handle], ratio * 100.0);
    }

    // Unmount the active section: the selection goes stale but sticks.
    println!("-- unmount \"Getting started\" --");
    regions[1].element_ref(None);
    let props = items[1].props();
    println!(
        "active: {}  available: {}",
        props.is_active, props.is_available
    );
}
