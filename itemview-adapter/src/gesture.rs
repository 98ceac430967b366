use itemview::{ItemViewOptions, Vec2};

use crate::abs;

/// Pan velocities are in pixels per millisecond; swipe speeds are scaled to seconds.
const MILLISECONDS_PER_SECOND: f32 = 1000.0;

/// The state of a pan gesture as reported by the host's gesture recognizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GesturePhase {
    #[default]
    Clear,
    Started,
    Continuing,
    Finished,
    Cancelled,
}

/// One pan gesture update.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanGesture {
    pub phase: GesturePhase,
    /// Movement since the previous update, in pixels.
    pub displacement: Vec2,
    /// Pixels per millisecond.
    pub velocity: Vec2,
}

impl PanGesture {
    pub fn new(phase: GesturePhase, displacement: Vec2, velocity: Vec2) -> Self {
        Self {
            phase,
            displacement,
            velocity,
        }
    }

    pub fn started(displacement: Vec2, velocity: Vec2) -> Self {
        Self::new(GesturePhase::Started, displacement, velocity)
    }

    pub fn continuing(displacement: Vec2, velocity: Vec2) -> Self {
        Self::new(GesturePhase::Continuing, displacement, velocity)
    }

    pub fn finished() -> Self {
        Self::new(GesturePhase::Finished, Vec2::ZERO, Vec2::ZERO)
    }

    pub fn cancelled() -> Self {
        Self::new(GesturePhase::Cancelled, Vec2::ZERO, Vec2::ZERO)
    }
}

/// A mouse wheel notch. Positive `z` scrolls towards later items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelEvent {
    pub z: i32,
}

/// Converts a pan velocity into a swipe speed in layout positions.
///
/// The speed grows with the square of the pan speed and saturates at `maximum`.
pub fn swipe_speed(velocity: Vec2, flick_speed_factor: f32, maximum: f32) -> f32 {
    let squared = velocity.x * velocity.x + velocity.y * velocity.y;
    (squared * flick_speed_factor * MILLISECONDS_PER_SECOND).clamp(0.0, maximum.max(0.0))
}

/// A release is a swipe when both the projected distance and the speed clear their minimums.
pub fn is_swipe(scroll_distance: f32, scroll_speed: f32, options: &ItemViewOptions) -> bool {
    abs(scroll_distance) > options.minimum_swipe_distance
        && scroll_speed > options.minimum_swipe_speed
}
