use core::f32::consts::PI;

use crate::float;
use crate::layout::{scroll_extent, step_focus};
use crate::{
    ControlOrientation, FocusDirection, ItemId, ItemLayout, ItemRange, ItemTransform, Rotation,
    Vec3,
};

/// A grid of rows scrolling along the orientation axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    orientation: ControlOrientation,
    item_size: Option<Vec3>,
    columns: u32,
    row_spacing: f32,
    column_spacing: f32,
    top_margin: f32,
    bottom_margin: f32,
    side_margin: f32,
    z_gap: f32,
    scroll_speed_factor: f32,
    maximum_swipe_speed: f32,
    item_flick_animation_duration: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            orientation: ControlOrientation::Up,
            item_size: None,
            columns: 4,
            row_spacing: 20.0,
            column_spacing: 20.0,
            top_margin: 95.0,
            bottom_margin: 20.0,
            side_margin: 20.0,
            z_gap: 0.0,
            scroll_speed_factor: 0.03,
            maximum_swipe_speed: 100.0,
            item_flick_animation_duration: 0.015,
        }
    }
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Sets the number of columns. Zero is treated as one.
    pub fn set_columns(&mut self, columns: u32) {
        debug_assert!(columns > 0, "a grid needs at least one column");
        self.columns = columns.max(1);
    }

    pub fn with_columns(mut self, columns: u32) -> Self {
        self.set_columns(columns);
        self
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    pub fn set_row_spacing(&mut self, spacing: f32) {
        self.row_spacing = spacing;
    }

    pub fn with_row_spacing(mut self, spacing: f32) -> Self {
        self.row_spacing = spacing;
        self
    }

    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    pub fn set_column_spacing(&mut self, spacing: f32) {
        self.column_spacing = spacing;
    }

    pub fn with_column_spacing(mut self, spacing: f32) -> Self {
        self.column_spacing = spacing;
        self
    }

    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    pub fn set_top_margin(&mut self, margin: f32) {
        self.top_margin = margin;
    }

    pub fn bottom_margin(&self) -> f32 {
        self.bottom_margin
    }

    pub fn set_bottom_margin(&mut self, margin: f32) {
        self.bottom_margin = margin;
    }

    pub fn side_margin(&self) -> f32 {
        self.side_margin
    }

    pub fn set_side_margin(&mut self, margin: f32) {
        self.side_margin = margin;
    }

    /// Sets top, bottom and side margins at once.
    pub fn with_margins(mut self, top: f32, bottom: f32, side: f32) -> Self {
        self.top_margin = top;
        self.bottom_margin = bottom;
        self.side_margin = side;
        self
    }

    pub fn z_gap(&self) -> f32 {
        self.z_gap
    }

    /// Depth offset applied per column.
    pub fn set_z_gap(&mut self, gap: f32) {
        self.z_gap = gap;
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

    /// Column count, guarding against a zero from deserialized data.
    fn cols(&self) -> u32 {
        self.columns.max(1)
    }

    fn column_of(&self, id: ItemId) -> u32 {
        id % self.cols()
    }

    fn row_height(&self, layout_size: Vec3) -> f32 {
        self.item_size(0, layout_size).y + self.row_spacing
    }

    fn items_per_page(&self, layout_size: Vec3) -> i64 {
        let extent = scroll_extent(self.orientation, layout_size);
        let row_height = self.row_height(layout_size);
        let rows = extent / row_height;
        // Flat rows (or a degenerate extent) count as a single row.
        let rows = if row_height > 0.0 && rows.is_finite() {
            float::ceil(rows).max(0.0)
        } else {
            1.0
        };
        i64::from(self.cols()).saturating_mul(rows as i64)
    }

    /// `item_layout_position` is the layout position plus the item id.
    fn position_at(&self, id: ItemId, item_layout_position: f32, layout_size: Vec3) -> Vec3 {
        let item_size = self.item_size(id, layout_size);
        let column = self.column_of(id) as f32;
        let columns = self.cols() as f32;
        let along = |extent: f32| {
            ((item_size.y + self.row_spacing) * (item_layout_position - column)) / columns
                - extent * 0.5
                + item_size.y * 0.5
                + self.top_margin
        };
        let across = |extent: f32| {
            self.side_margin + column * (item_size.x + self.column_spacing) + item_size.x * 0.5
                - extent * 0.5
        };
        let z = column * self.z_gap;
        match self.orientation {
            ControlOrientation::Up => Vec3::new(across(layout_size.x), along(layout_size.y), z),
            ControlOrientation::Left => Vec3::new(along(layout_size.x), -across(layout_size.y), z),
            ControlOrientation::Down => {
                Vec3::new(-across(layout_size.x), -along(layout_size.y), z)
            }
            ControlOrientation::Right => {
                Vec3::new(-along(layout_size.x), across(layout_size.y), z)
            }
        }
    }

    /// The component of an item position that grows with the row index.
    fn along(&self, position: Vec3) -> f32 {
        match self.orientation {
            ControlOrientation::Up => position.y,
            ControlOrientation::Left => position.x,
            ControlOrientation::Down => -position.y,
            ControlOrientation::Right => -position.x,
        }
    }

    fn is_visible(&self, id: ItemId, item_layout_position: f32, layout_size: Vec3) -> bool {
        let item_size = self.item_size(id, layout_size);
        let column = self.column_of(id) as f32;
        let row = (item_layout_position - column) / self.cols() as f32;
        let extent = scroll_extent(self.orientation, layout_size);
        let rows_per_page = float::ceil(extent / (item_size.y + self.row_spacing));
        row > -2.0 && row < rows_per_page
    }
}

impl ItemLayout for GridLayout {
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
        let width = if self.orientation.is_horizontal() {
            layout_size.y
        } else {
            layout_size.x
        };
        let columns = self.cols() as f32;
        let item_width =
            (width - self.side_margin * 2.0 - self.column_spacing * (columns - 1.0)) / columns;
        // 4:3 aspect ratio
        Vec3::new(item_width, item_width * 0.75, item_width * 0.75)
    }

    fn minimum_layout_position(&self, count: u32, layout_size: Vec3) -> f32 {
        let extent = scroll_extent(self.orientation, layout_size);
        let item_size = self.item_size(0, layout_size);

        let mut items_last_row = count % self.cols();
        if items_last_row == 0 {
            items_last_row = self.cols();
        }

        let rows_last_page = (extent - self.bottom_margin - self.top_margin + self.row_spacing)
            / (item_size.y + self.row_spacing);
        let items_last_page =
            (rows_last_page - 1.0) * self.cols() as f32 + items_last_row as f32;

        items_last_page - count as f32
    }

    fn closest_anchor_position(&self, layout_position: f32) -> f32 {
        let columns = self.cols() as f32;
        float::round(layout_position / columns) * columns
    }

    fn item_scroll_to_position(&self, id: ItemId) -> f32 {
        let row = id / self.cols();
        -((row * self.cols()) as f32)
    }

    fn items_within_area(&self, layout_position: f32, layout_size: Vec3) -> ItemRange {
        let columns = i64::from(self.cols());
        let first_visible = ((layout_position / self.cols() as f32) as i64)
            .saturating_neg()
            .saturating_mul(columns);

        let first = first_visible.saturating_sub(columns).max(0);
        let last = first_visible
            .saturating_add(self.items_per_page(layout_size))
            .max(0);
        ItemRange::new(clamp_id(first), clamp_id(last))
    }

    fn closest_on_screen_layout_position(&self, id: ItemId, current: f32, layout_size: Vec3) -> f32 {
        let position = self.item_position(id, current, layout_size);
        let item_size = self.item_size(id, layout_size);
        let footprint = if self.orientation.is_vertical() {
            item_size
        } else {
            item_size.swap_xy()
        };
        let half_x = (layout_size.x - footprint.x) * 0.5;
        let half_y = (layout_size.y - footprint.y) * 0.5;
        let on_screen = position.x >= -half_x
            && position.x <= half_x
            && position.y >= -half_y
            && position.y <= half_y;
        if on_screen {
            return current;
        }

        // Align the item's row with the near or far edge, measured along the scroll axis.
        let row_height = item_size.y + self.row_spacing;
        let extent = scroll_extent(self.orientation, layout_size);
        let scroll_to = self.item_scroll_to_position(id);
        let edge = (extent - row_height) * 0.5;
        let target = if self.along(position) > edge { edge } else { -edge };
        let aligned = self.along(self.item_position(id, scroll_to, layout_size));

        let rows = (target - aligned) / row_height;
        scroll_to + rows * self.cols() as f32
    }

    fn reserve_item_count(&self, layout_size: Vec3) -> u32 {
        clamp_id(self.items_per_page(layout_size))
    }

    fn scroll_direction(&self) -> f32 {
        match self.orientation {
            ControlOrientation::Up => 0.0,
            ControlOrientation::Left => 90.0,
            ControlOrientation::Down => 180.0,
            ControlOrientation::Right => 270.0,
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
        step_focus(id, count, self.cols(), direction, loop_enabled)
    }

    fn item_position(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> Vec3 {
        self.position_at(id, layout_position + id as f32, layout_size)
    }

    fn item_transform(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> ItemTransform {
        let item_layout_position = layout_position + id as f32;
        let roll = match self.orientation {
            ControlOrientation::Up => 0.0,
            ControlOrientation::Left => 1.5 * PI,
            ControlOrientation::Down => PI,
            ControlOrientation::Right => 0.5 * PI,
        };
        ItemTransform {
            position: self.position_at(id, item_layout_position, layout_size),
            size: self.item_size(id, layout_size),
            rotation: Rotation::roll(roll),
            brightness: 1.0,
            opacity: 1.0,
            visible: self.is_visible(id, item_layout_position, layout_size),
        }
    }
}

fn clamp_id(value: i64) -> ItemId {
    value.clamp(0, i64::from(ItemId::MAX)) as ItemId
}
