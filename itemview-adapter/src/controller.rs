use itemview::{
    EPSILON, ItemFactory, ItemId, ItemLayout, ItemView, ItemViewEvent, ItemViewOptions,
    LayoutActivation, PoolDiff, ScrollDirection, Vec2, Vec3, clamp_layout_position,
    scroll_distance,
};

use crate::{
    Easing, GesturePhase, OvershootAnimator, OvershootConfig, PanGesture, Tween, WheelEvent, abs,
    plan_anchor, plan_flick, swipe_speed,
};

/// What a running scroll animation was started for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAnimationKind {
    Flick,
    Anchoring,
    ScrollTo,
    LayoutActivation,
}

/// A layout-position animation, optionally decaying the scroll speed alongside.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnimation {
    pub kind: ScrollAnimationKind,
    pub position: Tween,
    pub speed: Option<Tween>,
}

/// The state after one [`Controller::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameUpdate {
    pub layout_position: f32,
    pub overshoot: f32,
    /// A scroll animation is still running.
    pub animating: bool,
    pub refresh: Option<PoolDiff>,
}

/// A framework-neutral controller that wraps an [`ItemView`] and turns input into scrolling:
/// pan gestures, flicks, wheel notches, anchoring and the overshoot indicator.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_touch_down` / `on_pan` / `on_wheel` when input arrives
/// - `tick(now_ms)` once per frame, which samples animations and refreshes the item pool
///
/// All times are milliseconds on the adapter's clock.
pub struct Controller<F: ItemFactory> {
    view: ItemView<F>,
    scroll: Option<ScrollAnimation>,
    overshoot: OvershootAnimator,

    gesture_phase: GesturePhase,
    scroll_distance: f32,
    total_pan: Vec2,
    scroll_overshoot: f32,
    is_flicking: bool,

    wheel_deadline_ms: Option<u64>,
}

impl<F: ItemFactory> Controller<F> {
    pub fn new(factory: F, options: ItemViewOptions) -> Self {
        Self::from_view(ItemView::new(factory, options))
    }

    pub fn from_view(view: ItemView<F>) -> Self {
        Self {
            view,
            scroll: None,
            overshoot: OvershootAnimator::new(),
            gesture_phase: GesturePhase::Clear,
            scroll_distance: 0.0,
            total_pan: Vec2::ZERO,
            scroll_overshoot: 0.0,
            is_flicking: false,
            wheel_deadline_ms: None,
        }
    }

    pub fn view(&self) -> &ItemView<F> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ItemView<F> {
        &mut self.view
    }

    pub fn into_view(self) -> ItemView<F> {
        self.view
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_some()
    }

    pub fn scroll_animation(&self) -> Option<&ScrollAnimation> {
        self.scroll.as_ref()
    }

    pub fn overshoot_animator(&self) -> &OvershootAnimator {
        &self.overshoot
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture_phase
    }

    pub fn is_flicking(&self) -> bool {
        self.is_flicking
    }

    /// How far the last clamp or pan pushed past the domain.
    pub fn scroll_overshoot(&self) -> f32 {
        self.scroll_overshoot
    }

    pub fn wheel_deadline_ms(&self) -> Option<u64> {
        self.wheel_deadline_ms
    }

    /// Stops the scroll animation where it is. Returns `true` if one was running.
    ///
    /// A cancelled layout activation completes at the current position.
    pub fn cancel_animation(&mut self) -> bool {
        let Some(animation) = self.scroll.take() else {
            return false;
        };
        idebug!(kind = ?animation.kind, "cancel_animation");
        self.is_flicking = false;
        if animation.kind == ScrollAnimationKind::LayoutActivation {
            self.view.complete_layout_activation();
        }
        true
    }

    /// Activates a layout, animating the position into the new domain when needed.
    ///
    /// With `duration_ms == 0` the correction is applied immediately.
    pub fn activate_layout(
        &mut self,
        index: usize,
        size: Vec3,
        duration_ms: u64,
        now_ms: u64,
    ) -> Option<LayoutActivation> {
        self.cancel_animation();
        let activation = self.view.activate_layout(index, size)?;
        if let LayoutActivation::ScrollTo(target) = activation {
            if duration_ms == 0 {
                self.view.set_layout_position(target);
                self.view.complete_layout_activation();
            } else {
                self.start_scroll(
                    ScrollAnimationKind::LayoutActivation,
                    target,
                    false,
                    duration_ms,
                    now_ms,
                );
            }
        }
        self.animate_overshoot(0.0, false, now_ms);
        self.scroll_overshoot = 0.0;
        Some(activation)
    }

    /// A touch-down stops any scrolling in progress.
    pub fn on_touch_down(&mut self, now_ms: u64) {
        self.gesture_phase = GesturePhase::Clear;
        self.scroll_distance = 0.0;
        self.view.set_scroll_speed(0.0);
        self.scroll_overshoot = 0.0;
        self.animate_overshoot(0.0, false, now_ms);

        if self.scroll.is_some() {
            self.emit_scroll_completed();
        }
        self.cancel_animation();
    }

    pub fn on_pan(&mut self, gesture: PanGesture, now_ms: u64) {
        self.cancel_animation();
        if self.view.active_layout().is_none() {
            self.gesture_phase = GesturePhase::Clear;
            return;
        }

        if gesture.phase != self.gesture_phase {
            itrace!(from = ?self.gesture_phase, to = ?gesture.phase, "on_pan: phase");
        }
        self.gesture_phase = gesture.phase;

        match gesture.phase {
            GesturePhase::Finished => self.pan_finished(now_ms),
            GesturePhase::Started => {
                self.total_pan = Vec2::ZERO;
                self.emit(ItemViewEvent::ScrollStarted(self.view.current_scroll_position()));
                self.view.set_refresh_enabled(true);
                self.pan_moved(&gesture, now_ms);
            }
            GesturePhase::Continuing => self.pan_moved(&gesture, now_ms),
            GesturePhase::Cancelled => {
                self.start_anchoring(now_ms);
            }
            GesturePhase::Clear => {}
        }
    }

    fn pan_moved(&mut self, gesture: &PanGesture, now_ms: u64) {
        let Some(layout) = self.view.active_layout() else {
            return;
        };
        let direction = layout.scroll_direction();
        let scroll_factor = layout.scroll_speed_factor();
        let speed = swipe_speed(
            gesture.velocity,
            layout.flick_speed_factor(),
            layout.maximum_swipe_speed(),
        );

        self.scroll_distance = scroll_distance(gesture.displacement, direction);
        self.view.set_scroll_speed(speed);
        // Negative distances travel towards the last item.
        self.view.set_refresh_order(if self.scroll_distance < 0.0 {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        });

        let current_overshoot = self.view.overshoot();
        let position = self
            .clamp_first_item_position(self.view.layout_position() + self.scroll_distance * scroll_factor);
        self.view.set_layout_position(position);

        // Pan only accumulates while pushing against a boundary.
        let floor = self.view.min_layout_position();
        if (position >= 0.0 && current_overshoot < 1.0)
            || (position <= floor && current_overshoot > -1.0)
        {
            self.total_pan.x += gesture.displacement.x;
            self.total_pan.y += gesture.displacement.y;
        }

        let pan = scroll_distance(self.total_pan, direction) * scroll_factor;
        self.scroll_overshoot = clamp_layout_position(position + pan, floor).overshoot;

        // An off-animation in flight keeps ownership of the indicator.
        if self.overshoot.in_animation() {
            return;
        }
        let overshoot = self.scroll_overshoot;
        let reversing = (overshoot > EPSILON && self.scroll_distance < -EPSILON)
            || (overshoot < -EPSILON && self.scroll_distance > EPSILON);
        if reversing {
            itrace!(overshoot, distance = self.scroll_distance, "pan reversed against overshoot");
            self.total_pan = Vec2::ZERO;
            self.animate_overshoot(0.0, false, now_ms);
        } else {
            self.view.set_overshoot(overshoot);
        }
    }

    fn pan_finished(&mut self, now_ms: u64) {
        if let Some(plan) = plan_flick(&self.view, self.scroll_distance, self.view.scroll_speed()) {
            let current = self.view.layout_position();
            self.scroll_overshoot = plan.excess;
            self.view.set_refresh_order(ScrollDirection::Forward);
            self.start_scroll(
                ScrollAnimationKind::Flick,
                plan.target,
                true,
                plan.duration_ms,
                now_ms,
            );
            self.is_flicking = true;
            if abs(current - plan.target) > EPSILON {
                self.animate_overshoot(0.0, false, now_ms);
            }
        }

        if self.scroll.is_none() {
            self.start_anchoring(now_ms);
        }
        if self.scroll.is_none() {
            self.emit_scroll_completed();
            self.animate_overshoot(0.0, false, now_ms);
        }
    }

    /// Scrolls by `z` wheel notches and (re)arms the wheel-finished deadline.
    pub fn on_wheel(&mut self, event: WheelEvent, now_ms: u64) {
        if let Some(layout) = self.view.active_layout() {
            let scroll_factor = layout.scroll_speed_factor();
            self.cancel_animation();

            let step = self.view.wheel_scroll_distance_step();
            let raw = self.view.layout_position() - event.z as f32 * step * scroll_factor;
            let position = self.clamp_first_item_position(raw);
            self.view.set_layout_position(position);

            self.emit(ItemViewEvent::ScrollStarted(self.view.current_scroll_position()));
            self.view.set_refresh_enabled(true);
        }
        let timeout = self.view.options().wheel_finished_timeout_ms;
        self.wheel_deadline_ms = Some(now_ms.saturating_add(timeout));
    }

    fn wheel_finished(&mut self, now_ms: u64) {
        if self.view.active_layout().is_none() {
            return;
        }
        self.cancel_animation();
        if !self.start_anchoring(now_ms) {
            self.scroll_overshoot = 0.0;
            self.animate_overshoot(0.0, false, now_ms);
            self.emit_scroll_completed();
        }
    }

    /// Scrolls to a layout position, clamped into the domain.
    ///
    /// Returns the clamped target, or `None` without an active layout.
    pub fn scroll_to(&mut self, layout_position: f32, duration_ms: u64, now_ms: u64) -> Option<f32> {
        self.view.active_layout()?;
        self.cancel_animation();

        let target = self.clamp_first_item_position(layout_position);
        if duration_ms > 0 {
            self.start_scroll(ScrollAnimationKind::ScrollTo, target, false, duration_ms, now_ms);
        } else {
            self.view.set_layout_position(target);
            self.animate_overshoot(0.0, false, now_ms);
        }

        self.emit(ItemViewEvent::ScrollStarted(self.view.current_scroll_position()));
        self.view.set_refresh_enabled(true);
        Some(target)
    }

    /// Scrolls so that `id` sits at the start of the layout.
    pub fn scroll_to_item(&mut self, id: ItemId, duration_ms: u64, now_ms: u64) -> Option<f32> {
        let target = self.view.active_layout()?.item_scroll_to_position(id);
        self.scroll_to(target, duration_ms, now_ms)
    }

    /// Brings a newly focused item on screen with the least movement.
    pub fn focus_changed(&mut self, id: ItemId, now_ms: u64) -> Option<f32> {
        let target = self.view.closest_on_screen_position(id)?;
        let duration_ms = self.view.options().keyboard_focus_scroll_duration_ms;
        self.scroll_to(target, duration_ms, now_ms)
    }

    /// Advances the controller by one frame.
    ///
    /// In order: the wheel-finished deadline, the scroll animation, the overshoot animation and
    /// finally a threshold-gated pool refresh.
    pub fn tick(&mut self, now_ms: u64) -> FrameUpdate {
        if self.wheel_deadline_ms.is_some_and(|deadline| now_ms >= deadline) {
            self.wheel_deadline_ms = None;
            self.wheel_finished(now_ms);
        }

        if let Some(animation) = self.scroll {
            self.view.set_layout_position(animation.position.sample(now_ms));
            if let Some(speed) = animation.speed {
                self.view.set_scroll_speed(speed.sample(now_ms));
            }
            if animation.position.is_done(now_ms) {
                self.scroll = None;
                self.animation_finished(animation.kind, now_ms);
            }
        }

        let config = self.overshoot_config();
        if let Some(overshoot) = self.overshoot.tick(config, now_ms) {
            self.view.set_overshoot(overshoot);
        }

        let mut refresh = None;
        if self.view.is_refresh_due() {
            // A disabled refresh means another driver owns the position; stop fighting it.
            let fighting = !self.view.refresh_enabled()
                && self
                    .scroll
                    .is_some_and(|animation| animation.kind != ScrollAnimationKind::LayoutActivation);
            if fighting {
                self.cancel_animation();
            }
            refresh = self.view.refresh_if_due(self.scroll.is_some());
        }

        FrameUpdate {
            layout_position: self.view.layout_position(),
            overshoot: self.view.overshoot(),
            animating: self.scroll.is_some(),
            refresh,
        }
    }

    fn animation_finished(&mut self, kind: ScrollAnimationKind, now_ms: u64) {
        itrace!(?kind, "animation finished");
        if kind == ScrollAnimationKind::LayoutActivation {
            self.view.complete_layout_activation();
            return;
        }

        self.emit_scroll_completed();
        if self.is_flicking && abs(self.scroll_overshoot) > EPSILON {
            let bounce = if self.scroll_overshoot > 0.0 { 1.0 } else { -1.0 };
            self.animate_overshoot(bounce, true, now_ms);
        } else {
            self.animate_overshoot(0.0, false, now_ms);
        }
        self.is_flicking = false;
        self.scroll_overshoot = 0.0;
    }

    /// Starts settling onto the closest anchor. Returns `false` when anchoring is off.
    fn start_anchoring(&mut self, now_ms: u64) -> bool {
        let Some(plan) = plan_anchor(&self.view) else {
            return false;
        };
        itrace!(anchor = plan.target, "anchoring");
        self.start_scroll(
            ScrollAnimationKind::Anchoring,
            plan.target,
            true,
            plan.duration_ms,
            now_ms,
        );
        if !self.is_flicking {
            self.animate_overshoot(0.0, false, now_ms);
        }
        true
    }

    fn start_scroll(
        &mut self,
        kind: ScrollAnimationKind,
        target: f32,
        decay_speed: bool,
        duration_ms: u64,
        now_ms: u64,
    ) {
        let position = Tween::new(
            self.view.layout_position(),
            target,
            now_ms,
            duration_ms,
            Easing::EaseOut,
        );
        let speed = decay_speed.then(|| {
            Tween::new(self.view.scroll_speed(), 0.0, now_ms, duration_ms, Easing::EaseOut)
        });
        idebug!(?kind, from = position.from, to = target, duration_ms, "start_scroll");
        self.scroll = Some(ScrollAnimation {
            kind,
            position,
            speed,
        });
    }

    /// Clamps `raw` into the domain, remembering how far it pushed past.
    fn clamp_first_item_position(&mut self, raw: f32) -> f32 {
        let clamped = self.view.clamp_position(raw);
        self.scroll_overshoot = clamped.excess;
        clamped.position
    }

    fn overshoot_config(&self) -> OvershootConfig {
        OvershootConfig {
            indicator_height: self.view.overshoot_indicator_height(),
            speed: self.view.options().overshoot_animation_speed,
        }
    }

    fn animate_overshoot(&mut self, amount: f32, animate_back: bool, now_ms: u64) {
        let config = self.overshoot_config();
        let current = self.view.overshoot();
        if let Some(direct) = self
            .overshoot
            .animate_to(current, amount, animate_back, config, now_ms)
        {
            self.view.set_overshoot(direct);
        }
    }

    fn emit(&self, event: ItemViewEvent) {
        self.view.emit(event);
    }

    fn emit_scroll_completed(&self) {
        self.emit(ItemViewEvent::ScrollCompleted(
            self.view.current_scroll_position(),
        ));
    }
}

impl<F: ItemFactory> core::fmt::Debug for Controller<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("view", &self.view)
            .field("scroll", &self.scroll)
            .field("overshoot", &self.overshoot)
            .field("gesture_phase", &self.gesture_phase)
            .field("scroll_distance", &self.scroll_distance)
            .field("total_pan", &self.total_pan)
            .field("scroll_overshoot", &self.scroll_overshoot)
            .field("is_flicking", &self.is_flicking)
            .field("wheel_deadline_ms", &self.wheel_deadline_ms)
            .finish()
    }
}
