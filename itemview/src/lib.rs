//! A headless item-view engine: virtualization, pluggable layouts and scroll domains.
//!
//! For input handling and animation (pan, flick, wheel, anchoring, overshoot), see the
//! `itemview-adapter` crate.
//!
//! This crate focuses on the model behind a scrolling item view over a conceptually unbounded
//! sequence: which items must be resident for a layout position, where each of them goes, and
//! how far the position may travel. Only a window around the visible area is ever materialized.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - an [`ItemFactory`] that creates and receives item content
//! - the layout area size
//! - a frame loop that drives scrolling and calls [`ItemView::refresh_if_due`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod clamp;
mod depth;
mod float;
mod grid;
mod layout;
mod options;
mod pool;
mod refresh;
mod spiral;
mod state;
mod types;
mod view;


pub use clamp::{
    Clamped, DEFAULT_OVERSHOOT_REFERENCE, Domain, clamp_layout_position,
    clamp_layout_position_with_reference, normalize_overshoot, overshoot_indicator_height,
};
pub use depth::DepthLayout;
pub use float::EPSILON;
pub use grid::GridLayout;
pub use layout::{ItemLayout, Layout, scroll_distance};
pub use options::{EventCallback, ItemViewOptions};
pub use pool::{ItemFactory, ItemPool};
pub use refresh::RefreshScheduler;
pub use spiral::SpiralLayout;
pub use state::{FrameState, ScrollState};
pub use types::{
    ControlOrientation, FocusDirection, ItemId, ItemRange, ItemTransform, ItemViewEvent,
    PoolDiff, Rotation, ScrollDirection, Vec2, Vec3,
};
pub use view::{ItemView, LayoutActivation};
