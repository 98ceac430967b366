use alloc::sync::Arc;

use crate::{ItemViewEvent, Vec2};

/// A callback fired for every [`ItemViewEvent`].
pub type EventCallback = Arc<dyn Fn(ItemViewEvent) + Send + Sync>;

/// Configuration for [`crate::ItemView`] and the controllers driving it.
///
/// Durations are in milliseconds. Cloning is cheap: the event callback is stored in an `Arc`.
pub struct ItemViewOptions {
    /// Minimum pan speed (after layout scaling) for a release to count as a swipe.
    pub minimum_swipe_speed: f32,
    /// Minimum projected pan distance for a release to count as a swipe.
    pub minimum_swipe_distance: f32,

    /// Pixels scrolled per wheel notch. `None` uses 10% of the layout height.
    pub wheel_scroll_distance_step: Option<f32>,
    /// Idle time after the last wheel event before anchoring is evaluated.
    pub wheel_finished_timeout_ms: u64,

    /// Snap to the layout's anchor positions when scrolling ends.
    pub anchoring: bool,
    pub anchoring_duration_ms: u64,

    /// Layout positions travelled between two refresh passes.
    ///
    /// A non-positive interval refreshes on any position change.
    pub refresh_interval: f32,

    /// Bounds for the duration of a flick animation.
    pub minimum_swipe_duration_ms: u64,
    pub maximum_swipe_duration_ms: u64,

    /// Duration of the scroll that brings a newly focused item on screen.
    pub keyboard_focus_scroll_duration_ms: u64,

    pub overshoot_enabled: bool,
    /// Speed of the overshoot indicator animation, in pixels per second.
    pub overshoot_animation_speed: f32,
    /// Size of the overshoot indicator; its height scales the animation duration.
    pub overshoot_size: Vec2,

    pub on_event: Option<EventCallback>,
}

impl Default for ItemViewOptions {
    fn default() -> Self {
        Self {
            minimum_swipe_speed: 1.0,
            minimum_swipe_distance: 3.0,
            wheel_scroll_distance_step: None,
            wheel_finished_timeout_ms: 500,
            anchoring: false,
            anchoring_duration_ms: 1000,
            refresh_interval: 20.0,
            minimum_swipe_duration_ms: 450,
            maximum_swipe_duration_ms: 2600,
            keyboard_focus_scroll_duration_ms: 200,
            overshoot_enabled: true,
            overshoot_animation_speed: 120.0,
            overshoot_size: Vec2::new(720.0, 42.0),
            on_event: None,
        }
    }
}

impl Clone for ItemViewOptions {
    fn clone(&self) -> Self {
        Self {
            minimum_swipe_speed: self.minimum_swipe_speed,
            minimum_swipe_distance: self.minimum_swipe_distance,
            wheel_scroll_distance_step: self.wheel_scroll_distance_step,
            wheel_finished_timeout_ms: self.wheel_finished_timeout_ms,
            anchoring: self.anchoring,
            anchoring_duration_ms: self.anchoring_duration_ms,
            refresh_interval: self.refresh_interval,
            minimum_swipe_duration_ms: self.minimum_swipe_duration_ms,
            maximum_swipe_duration_ms: self.maximum_swipe_duration_ms,
            keyboard_focus_scroll_duration_ms: self.keyboard_focus_scroll_duration_ms,
            overshoot_enabled: self.overshoot_enabled,
            overshoot_animation_speed: self.overshoot_animation_speed,
            overshoot_size: self.overshoot_size,
            on_event: self.on_event.clone(),
        }
    }
}

impl ItemViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_swipe_speed(mut self, speed: f32) -> Self {
        self.minimum_swipe_speed = speed;
        self
    }

    pub fn with_minimum_swipe_distance(mut self, distance: f32) -> Self {
        self.minimum_swipe_distance = distance;
        self
    }

    pub fn with_wheel_scroll_distance_step(mut self, step: Option<f32>) -> Self {
        self.wheel_scroll_distance_step = step;
        self
    }

    pub fn with_wheel_finished_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.wheel_finished_timeout_ms = timeout_ms;
        self
    }

    pub fn with_anchoring(mut self, anchoring: bool) -> Self {
        self.anchoring = anchoring;
        self
    }

    pub fn with_anchoring_duration_ms(mut self, duration_ms: u64) -> Self {
        self.anchoring_duration_ms = duration_ms;
        self
    }

    pub fn with_refresh_interval(mut self, interval: f32) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_swipe_duration_ms(mut self, minimum_ms: u64, maximum_ms: u64) -> Self {
        debug_assert!(minimum_ms <= maximum_ms);
        self.minimum_swipe_duration_ms = minimum_ms.min(maximum_ms);
        self.maximum_swipe_duration_ms = maximum_ms.max(minimum_ms);
        self
    }

    pub fn with_keyboard_focus_scroll_duration_ms(mut self, duration_ms: u64) -> Self {
        self.keyboard_focus_scroll_duration_ms = duration_ms;
        self
    }

    pub fn with_overshoot_enabled(mut self, enabled: bool) -> Self {
        self.overshoot_enabled = enabled;
        self
    }

    pub fn with_overshoot_animation_speed(mut self, speed: f32) -> Self {
        self.overshoot_animation_speed = speed;
        self
    }

    pub fn with_overshoot_size(mut self, size: Vec2) -> Self {
        self.overshoot_size = size;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(ItemViewEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for ItemViewOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemViewOptions")
            .field("minimum_swipe_speed", &self.minimum_swipe_speed)
            .field("minimum_swipe_distance", &self.minimum_swipe_distance)
            .field("wheel_scroll_distance_step", &self.wheel_scroll_distance_step)
            .field("wheel_finished_timeout_ms", &self.wheel_finished_timeout_ms)
            .field("anchoring", &self.anchoring)
            .field("anchoring_duration_ms", &self.anchoring_duration_ms)
            .field("refresh_interval", &self.refresh_interval)
            .field("minimum_swipe_duration_ms", &self.minimum_swipe_duration_ms)
            .field("maximum_swipe_duration_ms", &self.maximum_swipe_duration_ms)
            .field(
                "keyboard_focus_scroll_duration_ms",
                &self.keyboard_focus_scroll_duration_ms,
            )
            .field("overshoot_enabled", &self.overshoot_enabled)
            .field("overshoot_animation_speed", &self.overshoot_animation_speed)
            .field("overshoot_size", &self.overshoot_size)
            .finish_non_exhaustive()
    }
}
