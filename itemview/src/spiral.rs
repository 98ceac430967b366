use core::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::float;
use crate::layout::{scroll_extent, to_item_id};
use crate::{ControlOrientation, ItemId, ItemLayout, ItemRange, ItemTransform, Rotation, Vec3};

const ITEMS_PER_TURN: f32 = 9.5;
const REVOLUTION_DISTANCE: f32 = 190.0;

/// Items wound around a vertical spiral; one item per anchor position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpiralLayout {
    orientation: ControlOrientation,
    item_size: Option<Vec3>,
    item_spacing: f32,
    revolution_distance: f32,
    item_descent: f32,
    top_item_alignment: f32,
    scroll_speed_factor: f32,
    maximum_swipe_speed: f32,
    item_flick_animation_duration: f32,
}

impl Default for SpiralLayout {
    fn default() -> Self {
        Self {
            orientation: ControlOrientation::Up,
            item_size: None,
            item_spacing: TAU / ITEMS_PER_TURN,
            revolution_distance: REVOLUTION_DISTANCE,
            item_descent: REVOLUTION_DISTANCE / ITEMS_PER_TURN,
            top_item_alignment: -0.125,
            scroll_speed_factor: 0.01,
            maximum_swipe_speed: 30.0,
            item_flick_animation_duration: 0.1,
        }
    }
}

impl SpiralLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Angle between consecutive items, in radians.
    pub fn item_spacing(&self) -> f32 {
        self.item_spacing
    }

    pub fn set_item_spacing(&mut self, radians: f32) {
        self.item_spacing = radians;
        self.update_descent();
    }

    /// Distance travelled along the spiral axis per full turn.
    pub fn revolution_distance(&self) -> f32 {
        self.revolution_distance
    }

    pub fn set_revolution_distance(&mut self, distance: f32) {
        self.revolution_distance = distance;
        self.update_descent();
    }

    pub fn item_descent(&self) -> f32 {
        self.item_descent
    }

    pub fn top_item_alignment(&self) -> f32 {
        self.top_item_alignment
    }

    /// Where the first item sits, as a fraction of the layout extent from the center.
    pub fn set_top_item_alignment(&mut self, alignment: f32) {
        self.top_item_alignment = alignment;
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

    fn update_descent(&mut self) {
        let items_per_turn = (TAU / self.item_spacing).max(1.0);
        self.item_descent = self.revolution_distance / items_per_turn;
    }

    fn radius(layout_size: Vec3) -> f32 {
        layout_size.x * 0.4
    }

    /// Items laid out between the layout start and the top item.
    fn items_before_top(&self, extent: f32) -> f32 {
        extent * (self.top_item_alignment + 0.5) / self.item_descent
    }

    fn position_at(&self, item_layout_position: f32, layout_size: Vec3) -> Vec3 {
        let radius = Self::radius(layout_size);
        let descent = self.item_descent * item_layout_position;
        let turn = self.item_spacing * item_layout_position;
        match self.orientation {
            ControlOrientation::Up => {
                let angle = -FRAC_PI_2 + turn;
                Vec3::new(
                    -radius * float::cos(angle),
                    descent + layout_size.y * self.top_item_alignment,
                    -radius * float::sin(angle),
                )
            }
            ControlOrientation::Left => {
                let angle = FRAC_PI_2 + turn;
                Vec3::new(
                    descent + layout_size.x * self.top_item_alignment,
                    -radius * float::cos(angle),
                    radius * float::sin(angle),
                )
            }
            ControlOrientation::Down => {
                let angle = FRAC_PI_2 + turn;
                Vec3::new(
                    -radius * float::cos(angle),
                    -descent - layout_size.y * self.top_item_alignment,
                    radius * float::sin(angle),
                )
            }
            ControlOrientation::Right => {
                let angle = -FRAC_PI_2 + turn;
                Vec3::new(
                    -descent - layout_size.x * self.top_item_alignment,
                    -radius * float::cos(angle),
                    -radius * float::sin(angle),
                )
            }
        }
    }

    /// Items on the far side of the spiral are darkened.
    fn brightness(&self, item_layout_position: f32) -> f32 {
        const START: f32 = 0.10;
        const END: f32 = 0.35;
        const MIN_BRIGHTNESS: f32 = 0.15;

        let turns = self.item_spacing * float::abs(item_layout_position) / TAU;
        let mut progress = turns - float::floor(turns);
        progress = if progress > 0.5 {
            2.0 * (1.0 - progress)
        } else {
            progress * 2.0
        };

        if progress > END {
            MIN_BRIGHTNESS
        } else if progress > START {
            1.0 - (1.0 - MIN_BRIGHTNESS) * ((progress - START) / (END - START))
        } else {
            1.0
        }
    }
}

impl ItemLayout for SpiralLayout {
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
        let width = layout_size.x * 0.25;
        // 4:3 aspect ratio
        let height = width / 4.0 * 3.0;
        Vec3::new(width, height, height)
    }

    fn minimum_layout_position(&self, count: u32, _layout_size: Vec3) -> f32 {
        1.0 - count as f32
    }

    fn closest_anchor_position(&self, layout_position: f32) -> f32 {
        float::round(layout_position)
    }

    fn item_scroll_to_position(&self, id: ItemId) -> f32 {
        -(id as f32)
    }

    fn items_within_area(&self, layout_position: f32, layout_size: Vec3) -> ItemRange {
        let extent = scroll_extent(self.orientation, layout_size);
        let items_per_spiral = extent / self.item_descent;
        let cached = self.items_before_top(extent);
        let viewable =
            items_per_spiral.min(items_per_spiral - cached - layout_position + 1.0);

        let first = to_item_id(-layout_position - cached - 1.0);
        let last = to_item_id(first as f32 + viewable);
        ItemRange::new(first, last.saturating_add(1))
    }

    fn closest_on_screen_layout_position(&self, id: ItemId, _current: f32, _layout_size: Vec3) -> f32 {
        self.item_scroll_to_position(id)
    }

    fn reserve_item_count(&self, layout_size: Vec3) -> u32 {
        to_item_id(scroll_extent(self.orientation, layout_size) / self.item_descent)
    }

    fn scroll_direction(&self) -> f32 {
        // Diagonal, so both horizontal and vertical swipes scroll.
        match self.orientation {
            ControlOrientation::Up => -45.0,
            ControlOrientation::Left => 45.0,
            ControlOrientation::Down => 180.0 - 45.0,
            ControlOrientation::Right => 270.0 - 45.0,
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

    fn item_position(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> Vec3 {
        self.position_at(layout_position + id as f32, layout_size)
    }

    fn item_transform(&self, id: ItemId, layout_position: f32, layout_size: Vec3) -> ItemTransform {
        let item_layout_position = layout_position + id as f32;
        let roll = match self.orientation {
            ControlOrientation::Up => 0.0,
            ControlOrientation::Left => -0.5 * PI,
            ControlOrientation::Down => -PI,
            ControlOrientation::Right => -1.5 * PI,
        };
        let extent = scroll_extent(self.orientation, layout_size);
        let cached = self.items_before_top(extent);
        ItemTransform {
            position: self.position_at(item_layout_position, layout_size),
            size: self.item_size(id, layout_size),
            rotation: Rotation {
                roll,
                pitch: 0.0,
                yaw: -self.item_spacing * item_layout_position,
            },
            brightness: self.brightness(item_layout_position),
            opacity: 1.0,
            visible: item_layout_position >= -cached - 1.0
                && item_layout_position <= extent / self.item_descent + 1.0,
        }
    }
}
