//! A headless cover flow gallery engine.
//!
//! One image is active (large, centered) and the rest shrink into thumbnails packed on either
//! side of it. This crate holds the parts with real logic: per-image load tracking and
//! thumbnail sizing, the pure flow layout, and the transition state machine that keeps item
//! state consistent while moves overlap.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - image load notifications (see [`LoadSignal`])
//! - the container width (see [`ContainerWidth`])
//! - an [`Animator`] that moves boxes and reports finished transitions
//!
//! For a tween-driven animator and event routing, see the `flowgallery-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod animator;
mod api;
mod caption;
mod error;
mod gallery;
mod item;
mod layout;
mod options;
mod types;

#[cfg(test)]
mod tests;

pub use animator::Animator;
pub use api::GalleryApi;
pub use caption::{Caption, place_caption};
pub use error::MoveError;
pub use gallery::Gallery;
pub use item::{ImageSource, Item, LoadSignal, LoadState, derive_thumb_size};
pub use layout::{Frame, Layout, Placement, compute_layout};
pub use options::{ContainerWidth, Dimension, GalleryOptions, ITEM_GAP, ImageProbe, OptionsPatch};
pub use types::{Easing, Key, Phase, Size, Style, Target, Timing, TransitionHandle};
