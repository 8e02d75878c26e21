// Copyright 2026 the Waypost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypost Store: single-value observable state containers.
//!
//! A [`Store`] holds exactly one value and notifies subscribers synchronously
//! whenever the value is replaced. It is the shared-state primitive the rest
//! of Waypost is built on: the navigation engine keeps its active target and
//! its target registry in two independent stores, and UI-facing roles observe
//! them through subscriptions.
//!
//! The model is single-threaded and event-driven:
//!
//! - [`Store`] is a cheap [`Clone`] handle; clones share one cell. It is
//!   deliberately neither `Send` nor `Sync` — a parallel host must confine a
//!   store to one thread.
//! - [`Store::set`] replaces the value and notifies inline, with no queuing
//!   or batching. The subscriber list is snapshotted before iterating, so a
//!   subscriber removed during notification still receives that
//!   notification, and one added during notification does not.
//! - [`Store::subscribe`] returns a [`Subscription`] that removes the
//!   subscriber when dropped or when [`Subscription::unsubscribe`] is called
//!   (idempotently).
//!
//! For consumers that cache a view of the value, [`Store::watch`] is the
//! subscribe-and-snapshot bridge: it delivers the current value immediately
//! and then re-invokes the consumer only when a notification carries a value
//! that differs from the last one delivered.
//!
//! ## Minimal example
//!
//! ```rust
//! use waypost_store::Store;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let store = Store::new(0_u32);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sub = {
//!     let seen = Rc::clone(&seen);
//!     store.subscribe(move |v| seen.borrow_mut().push(*v))
//! };
//!
//! store.set(1);
//! store.set(2);
//! assert_eq!(*seen.borrow(), vec![1, 2]);
//!
//! sub.unsubscribe();
//! store.set(3);
//! assert_eq!(*seen.borrow(), vec![1, 2]);
//! assert_eq!(store.get(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod store;
mod watch;

pub use store::{Store, Subscription};
