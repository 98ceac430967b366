use core::f32::consts::{FRAC_PI_4, PI};

use crate::float;
use crate::layout::{step_focus, to_item_id};
use crate::{
    ControlOrientation, FocusDirection, ItemId, ItemLayout, ItemRange, ItemTransform, Rotation,
    Vec3,
};

const BOTTOM_MARGIN_FACTOR: f32 = 0.2;

/// Rows of items receding into the distance on a tilted plane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthLayout {
    orientation: ControlOrientation,
    item_size: Option<Vec3>,
    columns: u32,
    rows: u32,
    row_spacing: f32,
    tilt_angle: f32,
    item_tilt_angle: f32,
    scroll_speed_factor: f32,
    maximum_swipe_speed: f32,
    item_flick_animation_duration: f32,
}

impl Default for DepthLayout {
    fn default() -> Self {
        Self {
            orientation: ControlOrientation::Up,
            item_size: None,
            columns: 3,
            rows: 26,
            row_spacing: 55.0,
            tilt_angle: PI * 0.15,
            item_tilt_angle: -PI * 0.025,
            scroll_speed_factor: 0.02,
            maximum_swipe_speed: 50.0,
            item_flick_animation_duration: 0.03,
        }
    }
}

impl DepthLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn set_columns(&mut self, columns: u32) {
        debug_assert!(columns > 0, "a depth layout needs at least one column");
        self.columns = columns.max(1);
    }

    pub fn with_columns(mut self, columns: u32) -> Self {
        self.set_columns(columns);
        self
    }

    /// Number of rows the layout is designed to show; half of them are visible.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn set_rows(&mut self, rows: u32) {
        self.rows = rows;
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    pub fn set_row_spacing(&mut self, spacing: f32) {
        self.row_spacing = spacing;
    }

    /// Tilt of the item plane in radians.
    pub fn tilt_angle(&self) -> f32 {
        self.tilt_angle
    }

    /// Sets the tilt of the item plane, clamped to ±45°.
    pub fn set_tilt_angle(&mut self, radians: f32) {
        self.tilt_angle = radians.clamp(-FRAC_PI_4, FRAC_PI_4);
    }

    pub fn item_tilt_angle(&self) -> f32 {
        self.item_tilt_angle
    }

    /// Pitch applied to every item, in radians.
    pub fn set_item_tilt_angle(&mut self, radians: f32) {
        self.item_tilt_angle = radians;
    }

    pub fn set_scroll_speed_factor(&mut self, factor: f32) {
        self.scroll_speed_factor = factor;
    }

    pub fn set_maximum_swipe_speed(&mut self, speed: f32) {
        self.maximum_swipe_speed = speed;
    }

    pub fn set_item_flick_animation_duration(&mut self, seconds: f32) {
        self.item_flick_animation_duration = seconds;
    }

    pub fn with_orientation(mut self, orientation: ControlOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_item_size(mut self, size: Vec3) -> Self {
        self.item_size = Some(size);
        self
    }

    fn cols(&self) -> u32 {
        self.columns.max(1)
    }

    fn visible_rows(&self) -> f32 {
        self.rows as f32 * 0.5
    }

    fn row_of(&self, id: ItemId, item_layout_position: f32) -> f32 {
        let column = (id % self.cols()) as f32;
        (item_layout_position - column) / self.cols() as f32
    }

    fn column_position(&self, column: u32, item_width: f32, extent: f32) -> f32 {
        let columns = self.cols() as f32;
        let available = (extent - item_width * columns).max(0.0);
        let margin = available / columns * 0.5;
        margin + item_width * 0.5 + column as f32 * (item_width + available / columns)
            - extent * 0.5
    }

    fn position_at(&self, id: ItemId, item_layout_position: f32, layout_size: Vec3) -> Vec3 {
        let item_size = self.item_size(id, layout_size);
        let column = id % self.cols();
        let height_scale = -float::sin(self.tilt_angle) * self.row_spacing;
        let depth_scale = float::cos(self.tilt_angle) * self.row_spacing;

        let row_position = item_layout_position - column as f32;
        let along = |row_position: f32, extent: f32| {
            row_position * height_scale + extent * 0.5
                - BOTTOM_MARGIN_FACTOR * extent
                - item_size.y * 0.5
        };
        match self.orientation {
            ControlOrientation::Up => Vec3::new(
                self.column_position(column, item_size.x, layout_size.x),
                along(row_position, layout_size.y),
                -row_position * depth_scale,
            ),
            ControlOrientation::Down => Vec3::new(
                -self.column_position(column, item_size.x, layout_size.x),
                -along(row_position, layout_size.y),
                -row_position * depth_scale,
            ),
            ControlOrientation::Left => {
                let row_position = row_position + self.cols() as f32 * 0.5;
                Vec3::new(
                    along(row_position, layout_size.x),
                    -self.column_position(column, item_size.x, layout_size.y),
                    -row_position * depth_scale,
                )
            }
            ControlOrientation::Right => {
                let row_position = row_position + self.cols() as f32 * 0.5;
                Vec3::new(
                    -along(row_position, layout_size.x),
                    self.column_position(column, item_size.x, layout_size.y),
                    -row_position * depth_scale,
                )
            }
        }
    }

    /// Returns `(brightness, opacity)` for an item on `row`.
    fn shading(&self, row: f32) -> (f32, f32) {
        let rows = self.visible_rows();
        if row < 0.0 {
            let fade = (1.0 + row).max(0.0);
            return (fade, fade);
        }
        let brightness = if row > rows { 0.0 } else { 1.0 - row / rows };
        let opacity = if row > rows - 1.0 {
            (1.0 - (row - (rows - 1.0))).max(0.0)
        } else {
            1.0
        };
        (brightness, opacity)
    }
}

impl ItemLayout for DepthLayout {
    fn orientation(&self) -> ControlOrientation {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: ControlOrientation) {
        self.orientation = orientation;
    }

    fn custom_item_size(&self) -> Option<Vec3> {
        self.item_size
    }

    fn set_item_size(&mut self, size: Option<Vec3>) {
        self.item_size = size;
    }

    fn default_item_size(&self, _id: ItemId, layout_size: Vec3) -> Vec3 {
        let extent = if self.orientation.is_vertical() {
            layout_size.x
        } else {
            layout_size.y
        };
        // square items
        let side = extent / (self.cols() + 1) as f32;
        Vec3::new(side, side, side)
    }

    fn minimum_layout_position(&self, count: u32, _layout_size: Vec3) -> f32 {
        self.cols() as f32 - count as f32
    }

    fn closest_anchor_position(&self, layout_position: f32) -> f32 {
        let columns = self.cols() as f32;
        float::round(layout_position / columns) * columns
    }

    fn item_scroll_to_position(&self, id: ItemId) -> f32 {
        let row = id / self.cols();
        -((row * self.cols()) as f32)
    }

    fn items_within_area(&self, layout_position: f32, _layout_size: Vec3) -> ItemRange {
        let columns = self.cols() as f32;
        let first_row = -(layout_position / columns);
        let last_row = first_row + self.visible_rows();
        let first = to_item_id(first_row * columns);
        let last = to_item_id(last_row * columns);
        ItemRange::new(first, last.saturating_add(1))
    }

    fn closest_on_screen_layout_position(&self, id: ItemId, current: f32, _layout_size: Vec3) -> f32 {
        let column = (id % self.cols()) as f32;
        let row = (current + id as f32 - column) / self.cols() as f32;
        if row <= -1.0 {
            self.item_scroll_to_position(id)
        } else if row > self.visible_rows() - 1.0 {
            self.item_scroll_to_position(id)
                + (self.rows as f32 - 1.0) * 0.5 * self.cols() as f32
        } else {
            current
        }
    }

    fn reserve_item_count(&self, layout_size: Vec3) -> u32 {
        let items = (layout_size.z * self.cols() as f32)
            / (float::cos(self.tilt_angle) * self.row_spacing);
        to_item_id(items)
    }

    fn scroll_direction(&self) -> f32 {
        match self.orientation {
            ControlOrientation::Up => 180.0,
            ControlOrientation::Left => 270.0,
            ControlOrientation::Down => 0.0,
            ControlOrientation::Right => 90.0,
        }
    }

    fn scroll_speed_factor(&self) -> f32 {
        self.scroll_speed_factor
    }

    fn maximum_swipe_speed(&self) -> f32 {
        self.maximum_swipe_speed
    }

    fn item_flick_animation_duration(&self) -> f32 {
        self.item_flick_animation_duration
    }

    fn next_focus_item_id(
        &self,
        id: ItemId,
        count: u32,
        direction: FocusDirection,
        loop_enabled: bool,
    ) -> ItemId {
        // Rows recede upwards: "up" moves to a later row.
        let direction = match direction {
            FocusDirection::Up => FocusDirection::Down,
            FocusDirection::Down => FocusDirection::Up,
            other => other,
        };
        step_focus(id, count, self.cols(), direction, loop_enabled)
    }

    fn item_position(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> Vec3 {
        self.position_at(id, layout_position + id as f32, layout_size)
    }

    fn item_transform(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> ItemTransform {
        let item_layout_position = layout_position + id as f32;
        let row = self.row_of(id, item_layout_position);
        let multiplier = match self.orientation {
            ControlOrientation::Up => 0.0,
            ControlOrientation::Left => 1.5,
            ControlOrientation::Down => -1.0,
            ControlOrientation::Right => 0.5,
        };
        let (brightness, opacity) = self.shading(row);
        ItemTransform {
            position: self.position_at(id, item_layout_position, layout_size),
            size: self.item_size(id, layout_size),
            rotation: Rotation {
                roll: multiplier * PI,
                pitch: self.item_tilt_angle,
                yaw: 0.0,
            },
            brightness,
            opacity,
            visible: row > -1.0 && row < self.visible_rows(),
        }
    }
}
