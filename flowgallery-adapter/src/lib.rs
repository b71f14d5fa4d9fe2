//! Adapter utilities for the `flowgallery` crate.
//!
//! The `flowgallery` crate is UI-agnostic and only talks to an animation primitive through its
//! `Animator` trait. This crate provides the small, framework-neutral pieces an adapter
//! usually needs on top:
//!
//! - A tween-driven [`TweenAnimator`] that tracks box geometry without any UI objects
//! - A [`Controller`] that routes host events, owns listener lifecycle and produces a
//!   render [`Scene`] per frame
//!
//! This crate is intentionally framework-agnostic (no DOM or widget toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod animator;
mod controller;
mod scene;
mod subscription;
mod tween;


pub use animator::{Geometry, TweenAnimator};
pub use controller::{Controller, Event};
pub use scene::{ItemView, Scene};
pub use subscription::{Channel, EventHost, SubscriptionId};
pub use tween::Tween;
