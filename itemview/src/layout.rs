use alloc::boxed::Box;

use crate::float;
use crate::{
    ControlOrientation, DepthLayout, FocusDirection, GridLayout, ItemId, ItemRange, ItemTransform,
    SpiralLayout, Vec2, Vec3,
};

/// A layout policy: maps a layout position and a layout size to visible ids and per-item
/// transforms.
///
/// Layouts hold configuration only. Which layout is active, and the current layout position, are
/// owned by [`crate::ItemView`].
///
/// Layout positions are measured in items along the scroll axis: `0.0` shows item `0` at the
/// start and increasingly negative values scroll further into the sequence.
pub trait ItemLayout {
    fn orientation(&self) -> ControlOrientation;

    fn set_orientation(&mut self, orientation: ControlOrientation);

    /// The size set with [`ItemLayout::set_item_size`], if any.
    fn custom_item_size(&self) -> Option<Vec3>;

    /// Overrides the default item size for every item. `None` restores the default.
    fn set_item_size(&mut self, size: Option<Vec3>);

    /// The size this layout picks for `id` when no custom size is set.
    fn default_item_size(&self, id: ItemId, layout_size: Vec3) -> Vec3;

    fn item_size(&self, id: ItemId, layout_size: Vec3) -> Vec3 {
        self.custom_item_size()
            .unwrap_or_else(|| self.default_item_size(id, layout_size))
    }

    /// The domain floor: the most negative layout position that still shows content.
    fn minimum_layout_position(&self, count: u32, layout_size: Vec3) -> f32;

    /// The anchor closest to `layout_position`.
    ///
    /// Implementations must be idempotent.
    fn closest_anchor_position(&self, layout_position: f32) -> f32;

    /// The layout position that brings `id` to the start of the layout.
    fn item_scroll_to_position(&self, id: ItemId) -> f32;

    /// Ids that are (at least partially) visible at `layout_position`.
    ///
    /// The result is not clamped to the item count; callers intersect it with `[0, count)`.
    fn items_within_area(&self, layout_position: f32, layout_size: Vec3) -> ItemRange;

    /// The layout position that brings `id` on screen, or `current` if it is already visible.
    fn closest_on_screen_layout_position(&self, id: ItemId, current: f32, layout_size: Vec3) -> f32 {
        let position = self.item_position(id, current, layout_size);
        let mut item_size = self.item_size(id, layout_size);
        if self.orientation().is_horizontal() {
            item_size = item_size.swap_xy();
        }
        let half_x = (layout_size.x - item_size.x) * 0.5;
        let half_y = (layout_size.y - item_size.y) * 0.5;
        if position.x < -half_x || position.x > half_x || position.y < -half_y || position.y > half_y
        {
            self.item_scroll_to_position(id)
        } else {
            current
        }
    }

    /// Extra ids to keep resident on either side of the visible range.
    fn reserve_item_count(&self, layout_size: Vec3) -> u32;

    /// Scroll direction in degrees, used to project pan displacement onto the scroll axis.
    fn scroll_direction(&self) -> f32;

    /// Layout positions per pixel of pan.
    fn scroll_speed_factor(&self) -> f32;

    /// Scale applied to pan velocity when computing swipe speed.
    fn flick_speed_factor(&self) -> f32 {
        self.scroll_speed_factor()
    }

    fn maximum_swipe_speed(&self) -> f32;

    /// Flick animation duration per layout position travelled, in seconds.
    fn item_flick_animation_duration(&self) -> f32;

    /// The id keyboard focus moves to from `id`.
    fn next_focus_item_id(
        &self,
        id: ItemId,
        count: u32,
        direction: FocusDirection,
        loop_enabled: bool,
    ) -> ItemId {
        step_focus(id, count, 1, direction, loop_enabled)
    }

    /// Position of `id` relative to the center of the layout area.
    fn item_position(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> Vec3;

    /// The full per-frame transform of `id`.
    fn item_transform(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> ItemTransform {
        ItemTransform::new(
            self.item_position(id, layout_position, layout_size),
            self.item_size(id, layout_size),
        )
    }
}

/// Moves focus by one item horizontally and by `row_stride` items vertically.
///
/// With `loop_enabled`, stepping past either end wraps around; otherwise focus stays in range.
pub(crate) fn step_focus(
    id: ItemId,
    count: u32,
    row_stride: u32,
    direction: FocusDirection,
    loop_enabled: bool,
) -> ItemId {
    if count == 0 {
        return 0;
    }
    let id = i64::from(id);
    let count = i64::from(count);
    let stride = i64::from(row_stride.max(1));
    let next = match direction {
        FocusDirection::Left => {
            let next = id - 1;
            if next < 0 {
                if loop_enabled { count - 1 } else { 0 }
            } else {
                next
            }
        }
        FocusDirection::Right => {
            let next = id + 1;
            if next >= count {
                if loop_enabled { 0 } else { count - 1 }
            } else {
                next
            }
        }
        FocusDirection::Up => {
            let next = id - stride;
            if next < 0 {
                if loop_enabled { next + count } else { next + stride }
            } else {
                next
            }
        }
        FocusDirection::Down => {
            let next = id + stride;
            if next >= count {
                if loop_enabled { 0 } else { next - stride }
            } else {
                next
            }
        }
    };
    next.clamp(0, count - 1) as ItemId
}

/// Projects a 2D pan displacement onto a scroll axis given in degrees.
pub fn scroll_distance(pan: Vec2, direction_degrees: f32) -> f32 {
    let radians = float::to_radians(direction_degrees);
    pan.x * float::sin(radians) + pan.y * float::cos(radians)
}

/// The length of the layout area along the scroll axis.
pub(crate) fn scroll_extent(orientation: ControlOrientation, layout_size: Vec3) -> f32 {
    if orientation.is_horizontal() {
        layout_size.x
    } else {
        layout_size.y
    }
}

/// Converts a float bound to an id, saturating negatives (and NaN) to `0`.
pub(crate) fn to_item_id(value: f32) -> ItemId {
    if value > 0.0 { value as ItemId } else { 0 }
}

/// A layout selected at runtime.
pub enum Layout {
    Grid(GridLayout),
    Depth(DepthLayout),
    Spiral(SpiralLayout),
    Custom(Box<dyn ItemLayout + Send + Sync>),
}

impl Layout {
    pub fn custom(layout: impl ItemLayout + Send + Sync + 'static) -> Self {
        Self::Custom(Box::new(layout))
    }

    fn inner(&self) -> &dyn ItemLayout {
        match self {
            Self::Grid(layout) => layout,
            Self::Depth(layout) => layout,
            Self::Spiral(layout) => layout,
            Self::Custom(layout) => layout.as_ref(),
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ItemLayout {
        match self {
            Self::Grid(layout) => layout,
            Self::Depth(layout) => layout,
            Self::Spiral(layout) => layout,
            Self::Custom(layout) => layout.as_mut(),
        }
    }
}

impl From<GridLayout> for Layout {
    fn from(layout: GridLayout) -> Self {
        Self::Grid(layout)
    }
}

impl From<DepthLayout> for Layout {
    fn from(layout: DepthLayout) -> Self {
        Self::Depth(layout)
    }
}

impl From<SpiralLayout> for Layout {
    fn from(layout: SpiralLayout) -> Self {
        Self::Spiral(layout)
    }
}

impl core::fmt::Debug for Layout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Grid(layout) => f.debug_tuple("Grid").field(layout).finish(),
            Self::Depth(layout) => f.debug_tuple("Depth").field(layout).finish(),
            Self::Spiral(layout) => f.debug_tuple("Spiral").field(layout).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl ItemLayout for Layout {
    fn orientation(&self) -> ControlOrientation {
        self.inner().orientation()
    }

    fn set_orientation(&mut self, orientation: ControlOrientation) {
        self.inner_mut().set_orientation(orientation);
    }

    fn custom_item_size(&self) -> Option<Vec3> {
        self.inner().custom_item_size()
    }

    fn set_item_size(&mut self, size: Option<Vec3>) {
        self.inner_mut().set_item_size(size);
    }

    fn default_item_size(&self, id: ItemId, layout_size: Vec3) -> Vec3 {
        self.inner().default_item_size(id, layout_size)
    }

    fn item_size(&self, id: ItemId, layout_size: Vec3) -> Vec3 {
        self.inner().item_size(id, layout_size)
    }

    fn minimum_layout_position(&self, count: u32, layout_size: Vec3) -> f32 {
        self.inner().minimum_layout_position(count, layout_size)
    }

    fn closest_anchor_position(&self, layout_position: f32) -> f32 {
        self.inner().closest_anchor_position(layout_position)
    }

    fn item_scroll_to_position(&self, id: ItemId) -> f32 {
        self.inner().item_scroll_to_position(id)
    }

    fn items_within_area(&self, layout_position: f32, layout_size: Vec3) -> ItemRange {
        self.inner().items_within_area(layout_position, layout_size)
    }

    fn closest_on_screen_layout_position(&self, id: ItemId, current: f32, layout_size: Vec3) -> f32 {
        self.inner()
            .closest_on_screen_layout_position(id, current, layout_size)
    }

    fn reserve_item_count(&self, layout_size: Vec3) -> u32 {
        self.inner().reserve_item_count(layout_size)
    }

    fn scroll_direction(&self) -> f32 {
        self.inner().scroll_direction()
    }

    fn scroll_speed_factor(&self) -> f32 {
        self.inner().scroll_speed_factor()
    }

    fn flick_speed_factor(&self) -> f32 {
        self.inner().flick_speed_factor()
    }

    fn maximum_swipe_speed(&self) -> f32 {
        self.inner().maximum_swipe_speed()
    }

    fn item_flick_animation_duration(&self) -> f32 {
        self.inner().item_flick_animation_duration()
    }

    fn next_focus_item_id(
        &self,
        id: ItemId,
        count: u32,
        direction: FocusDirection,
        loop_enabled: bool,
    ) -> ItemId {
        self.inner()
            .next_focus_item_id(id, count, direction, loop_enabled)
    }

    fn item_position(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> Vec3 {
        self.inner().item_position(id, layout_position, layout_size)
    }

    fn item_transform(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> ItemTransform {
        self.inner().item_transform(id, layout_position, layout_size)
    }
}
