use itemview::{ItemFactory, ItemLayout, ItemView};

use crate::{abs, is_swipe};

/// Where a released swipe should travel and for how long.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlickPlan {
    /// The final layout position, clamped into the domain and snapped to an anchor when
    /// anchoring is enabled.
    pub target: f32,
    /// How far the unclamped destination lay outside the domain.
    ///
    /// A flick ending with a non-zero excess bounces the overshoot indicator.
    pub excess: f32,
    pub duration_ms: u64,
}

/// The anchor position to settle on once scrolling stops.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorPlan {
    pub target: f32,
    pub duration_ms: u64,
}

/// Plans a flick for a pan released with the given projected distance and swipe speed.
///
/// Returns `None` when the release is not a swipe, there is no active layout, or the domain
/// cannot scroll.
pub fn plan_flick<F: ItemFactory>(
    view: &ItemView<F>,
    scroll_distance: f32,
    scroll_speed: f32,
) -> Option<FlickPlan> {
    let options = view.options();
    if !is_swipe(scroll_distance, scroll_speed, options) {
        return None;
    }
    let layout = view.active_layout()?;
    if !view.is_scrollable() {
        idebug!(scroll_distance, scroll_speed, "plan_flick: domain not scrollable");
        return None;
    }

    let direction = if scroll_distance < 0.0 { -1.0 } else { 1.0 };
    let current = view.layout_position();
    let clamped = view.clamp_position(current + scroll_speed * direction);
    let target = if options.anchoring {
        // Anchors near a fractional floor can round past it.
        view.clamp_position(layout.closest_anchor_position(clamped.position)).position
    } else {
        clamped.position
    };

    let seconds = layout.item_flick_animation_duration() * abs(target - current).max(1.0);
    let duration_ms = ((seconds * 1000.0) as u64).clamp(
        options.minimum_swipe_duration_ms,
        options
            .maximum_swipe_duration_ms
            .max(options.minimum_swipe_duration_ms),
    );

    idebug!(current, target, excess = clamped.excess, duration_ms, "plan_flick");
    Some(FlickPlan {
        target,
        excess: clamped.excess,
        duration_ms,
    })
}

/// Plans the settle animation onto the closest anchor, kept within the domain.
///
/// Returns `None` when anchoring is disabled or there is no active layout.
pub fn plan_anchor<F: ItemFactory>(view: &ItemView<F>) -> Option<AnchorPlan> {
    let options = view.options();
    if !options.anchoring {
        return None;
    }
    let layout = view.active_layout()?;
    let anchor = layout.closest_anchor_position(view.layout_position());
    let target = view.clamp_position(anchor).position;
    Some(AnchorPlan {
        target,
        duration_ms: options.anchoring_duration_ms,
    })
}
