use crate::float::{self, EPSILON};
use crate::Vec2;

/// Layout positions of overscroll that map to a full overshoot of `±1`.
pub const DEFAULT_OVERSHOOT_REFERENCE: f32 = 1.0;

/// A raw layout position bounded to `[floor, 0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clamped {
    pub position: f32,
    /// `raw - position`: positive past the start, negative past the end.
    pub excess: f32,
    /// `excess` normalized and saturated to `[-1, 1]`.
    pub overshoot: f32,
}

impl Clamped {
    pub fn is_within_domain(&self) -> bool {
        float::abs(self.excess) <= EPSILON
    }
}

/// Clamps `raw` into `[min(floor, 0), 0]` with the default overshoot reference.
pub fn clamp_layout_position(raw: f32, floor: f32) -> Clamped {
    clamp_layout_position_with_reference(raw, floor, DEFAULT_OVERSHOOT_REFERENCE)
}

pub fn clamp_layout_position_with_reference(raw: f32, floor: f32, reference: f32) -> Clamped {
    // A positive floor would leave an empty domain; the start wins.
    let floor = floor.min(0.0);
    let position = if raw.is_nan() { 0.0 } else { raw.clamp(floor, 0.0) };
    let excess = if raw.is_nan() { 0.0 } else { raw - position };
    Clamped {
        position,
        excess,
        overshoot: normalize_overshoot(excess, reference),
    }
}

/// Maps an overscroll distance to `[-1, 1]`.
///
/// A non-positive `reference` yields only the sign of `excess`.
pub fn normalize_overshoot(excess: f32, reference: f32) -> f32 {
    if float::abs(excess) <= EPSILON {
        return 0.0;
    }
    if reference <= 0.0 {
        return if excess > 0.0 { 1.0 } else { -1.0 };
    }
    (excess / reference).clamp(-1.0, 1.0)
}

/// The scrollable domain of the active layout, re-derived whenever the item count, the layout or
/// the layout size changes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    /// The domain floor, always `<= 0`.
    pub min_layout_position: f32,
    /// `-min_layout_position`.
    pub scroll_position_max: f32,
    /// Distance in pixels between the first and the last scroll-to positions.
    pub content_size: f32,
    pub scrollable: bool,
}

impl Domain {
    /// The domain of an empty or inactive view.
    pub const EMPTY: Self = Self {
        min_layout_position: 0.0,
        scroll_position_max: 0.0,
        content_size: 0.0,
        scrollable: false,
    };

    pub fn clamp(&self, raw: f32) -> Clamped {
        clamp_layout_position(raw, self.min_layout_position)
    }

    /// The domain size as reported to scroll bars: `(0, content_size)`.
    pub fn size(&self) -> Vec2 {
        Vec2::new(0.0, self.content_size)
    }
}

/// Height of the overshoot indicator for a view whose cross extent is `cross_extent`.
///
/// Narrow views (`<= 180`) get half the configured height.
pub fn overshoot_indicator_height(cross_extent: f32, overshoot_size: Vec2) -> f32 {
    if cross_extent <= 180.0 {
        overshoot_size.y * 0.5
    } else {
        overshoot_size.y
    }
}
