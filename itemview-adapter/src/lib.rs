//! Input and animation driving for the `itemview` crate.
//!
//! The `itemview` crate owns layouts, the item pool and the scroll domain, but it never moves the
//! layout position on its own. This crate provides the framework-neutral pieces an adapter needs
//! to make a view scroll:
//!
//! - Pan gesture handling with boundary overshoot
//! - Flick and anchoring plans
//! - Mouse wheel stepping with a finished timeout
//! - Tween-based animations sampled by the adapter's frame clock
//!
//! There are no bindings to any UI toolkit here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod gesture;
mod overshoot;
mod tween;

#[cfg(test)]
mod tests;

pub use anchor::{AnchorPlan, FlickPlan, plan_anchor, plan_flick};
pub use controller::{Controller, FrameUpdate, ScrollAnimation, ScrollAnimationKind};
pub use gesture::{GesturePhase, PanGesture, WheelEvent, is_swipe, swipe_speed};
pub use overshoot::{OvershootAnimator, OvershootConfig};
pub use tween::{Easing, Tween};

#[inline]
pub(crate) fn abs(x: f32) -> f32 {
    if x < 0.0 { -x } else { x }
}
