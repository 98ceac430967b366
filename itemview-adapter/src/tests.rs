use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use itemview::{
    GridLayout, ItemFactory, ItemId, ItemLayout, ItemView, ItemViewEvent, ItemViewOptions,
    LayoutActivation, Vec2, Vec3,
};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_f32(&mut self, start: f32, end: f32) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        start + (end - start) * unit
    }
}

#[derive(Debug, Default)]
struct Factory {
    count: u32,
}

impl ItemFactory for Factory {
    type Content = ItemId;

    fn number_of_items(&self) -> u32 {
        self.count
    }

    fn new_item(&mut self, id: ItemId) -> Option<ItemId> {
        Some(id)
    }
}

type Events = Arc<Mutex<Vec<ItemViewEvent>>>;

const SIZE: Vec3 = Vec3::new(300.0, 300.0, 300.0);

/// Three 100x100 columns; the domain floor for 100 items is -93.
fn grid() -> GridLayout {
    GridLayout::new()
        .with_columns(3)
        .with_item_size(Vec3::new(100.0, 100.0, 100.0))
        .with_row_spacing(0.0)
        .with_column_spacing(0.0)
        .with_margins(0.0, 0.0, 0.0)
}

fn controller_with(count: u32, options: ItemViewOptions) -> (Controller<Factory>, Events) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let options = options.with_on_event(Some(move |event| {
        sink.lock().unwrap().push(event);
    }));

    let mut c = Controller::new(Factory { count }, options);
    let index = c.view_mut().add_layout(grid());
    assert!(c.activate_layout(index, SIZE, 0, 0).is_some());
    events.lock().unwrap().clear();
    (c, events)
}

fn controller(count: u32) -> (Controller<Factory>, Events) {
    controller_with(count, ItemViewOptions::default())
}

fn completed(events: &Events) -> usize {
    events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, ItemViewEvent::ScrollCompleted(_)))
        .count()
}

fn started(events: &Events) -> usize {
    events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, ItemViewEvent::ScrollStarted(_)))
        .count()
}

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-3, "{a} != {b}");
}

/// Drags towards later items at one pixel per millisecond, then releases.
fn swipe(c: &mut Controller<Factory>, now_ms: u64) {
    let velocity = Vec2::new(0.0, -1.0);
    c.on_pan(PanGesture::started(Vec2::new(0.0, -50.0), velocity), now_ms);
    c.on_pan(PanGesture::finished(), now_ms + 16);
}

#[test]
fn easing_endpoints() {
    for easing in [Easing::Linear, Easing::EaseOut] {
        assert_close(easing.sample(0.0), 0.0);
        assert_close(easing.sample(1.0), 1.0);
    }
    // Decelerating: more than half the distance in the first half.
    assert!(Easing::EaseOut.sample(0.5) > 0.5);

    let tween = Tween::new(10.0, 20.0, 100, 0, Easing::Linear);
    assert_eq!(tween.duration_ms, 1);
    assert_eq!(tween.sample(100), 10.0);
    assert!(tween.is_done(101));
    assert_eq!(tween.sample(500), 20.0);

    let tween = Tween::new(0.0, 100.0, 0, 100, Easing::Linear);
    assert_close(tween.sample(25), 25.0);
    assert_close(tween.progress(50), 0.5);
}

#[test]
fn swipe_speed_saturates() {
    assert_close(swipe_speed(Vec2::new(0.0, -1.0), 0.03, 100.0), 30.0);
    assert_close(swipe_speed(Vec2::new(3.0, 4.0), 0.03, 100.0), 100.0);
    assert_eq!(swipe_speed(Vec2::ZERO, 0.03, 100.0), 0.0);

    let options = ItemViewOptions::default();
    assert!(is_swipe(-50.0, 30.0, &options));
    assert!(!is_swipe(-2.0, 30.0, &options));
    assert!(!is_swipe(-50.0, 0.5, &options));
}

#[test]
fn pan_moves_layout_position() {
    let (mut c, events) = controller(100);

    c.on_pan(PanGesture::started(Vec2::new(0.0, -100.0), Vec2::ZERO), 0);
    assert_close(c.view().layout_position(), -3.0);
    assert_eq!(c.gesture_phase(), GesturePhase::Started);
    assert!(c.view().refresh_enabled());
    assert_eq!(started(&events), 1);

    c.on_pan(PanGesture::continuing(Vec2::new(0.0, -100.0), Vec2::ZERO), 16);
    assert_close(c.view().layout_position(), -6.0);
    assert_eq!(c.view().refresh_order(), itemview::ScrollDirection::Forward);

    c.on_pan(PanGesture::continuing(Vec2::new(0.0, 50.0), Vec2::ZERO), 32);
    assert_close(c.view().layout_position(), -4.5);
    assert_eq!(c.view().refresh_order(), itemview::ScrollDirection::Backward);
}

#[test]
fn pan_without_layout_is_ignored() {
    let mut c = Controller::new(Factory { count: 10 }, ItemViewOptions::default());
    c.on_pan(PanGesture::started(Vec2::new(0.0, -100.0), Vec2::ZERO), 0);
    assert_eq!(c.gesture_phase(), GesturePhase::Clear);
    assert_eq!(c.view().layout_position(), 0.0);
    assert_eq!(c.scroll_to(-3.0, 0, 0), None);
}

#[test]
fn swipe_flicks_and_completes() {
    let (mut c, events) = controller(100);

    swipe(&mut c, 0);
    assert!(c.is_flicking());
    let animation = *c.scroll_animation().unwrap();
    assert_eq!(animation.kind, ScrollAnimationKind::Flick);
    assert_close(animation.position.to, -31.5);
    assert_eq!(animation.position.duration_ms, 450);
    assert_eq!(c.view().refresh_order(), itemview::ScrollDirection::Forward);

    let mid = c.tick(200);
    assert!(mid.animating);
    assert!(mid.layout_position < -1.5 && mid.layout_position > -31.5);
    assert_eq!(completed(&events), 0);

    let end = c.tick(466);
    assert!(!end.animating);
    assert_close(end.layout_position, -31.5);
    assert_close(c.view().scroll_speed(), 0.0);
    assert!(!c.is_flicking());
    assert_eq!(completed(&events), 1);
}

#[test]
fn flick_is_limited_by_duration_bounds() {
    let options = ItemViewOptions {
        maximum_swipe_duration_ms: 300,
        minimum_swipe_duration_ms: 100,
        ..ItemViewOptions::default()
    };
    let (mut c, _) = controller_with(100, options);
    swipe(&mut c, 0);
    // 0.015 s per layout position over 30 positions.
    assert_eq!(c.scroll_animation().unwrap().position.duration_ms, 300);
}

#[test]
fn slow_release_completes_without_flick() {
    let (mut c, events) = controller(100);

    c.on_pan(
        PanGesture::started(Vec2::new(0.0, -50.0), Vec2::new(0.0, -0.01)),
        0,
    );
    c.on_pan(PanGesture::finished(), 16);

    assert!(!c.is_animating());
    assert!(!c.is_flicking());
    assert_close(c.view().layout_position(), -1.5);
    assert_eq!(completed(&events), 1);
}

#[test]
fn released_swipe_settles_on_anchor() {
    let options = ItemViewOptions {
        anchoring: true,
        ..ItemViewOptions::default()
    };
    let (mut c, _) = controller_with(100, options);

    swipe(&mut c, 0);
    // -31.5 snaps to a row start.
    let target = c.scroll_animation().unwrap().position.to;
    assert!(target == -30.0 || target == -33.0, "{target}");
}

#[test]
fn cancelled_pan_settles_on_anchor() {
    let options = ItemViewOptions {
        anchoring: true,
        ..ItemViewOptions::default()
    };
    let (mut c, events) = controller_with(100, options);

    c.on_pan(PanGesture::started(Vec2::new(0.0, -70.0), Vec2::ZERO), 0);
    assert_close(c.view().layout_position(), -2.1);
    c.on_pan(PanGesture::cancelled(), 16);
    assert_eq!(c.gesture_phase(), GesturePhase::Cancelled);
    assert_eq!(
        c.scroll_animation().unwrap().kind,
        ScrollAnimationKind::Anchoring
    );

    c.tick(1016);
    assert_close(c.view().layout_position(), -3.0);
    assert_eq!(completed(&events), 1);
}

#[test]
fn new_gesture_cancels_running_flick() {
    let (mut c, events) = controller(100);

    swipe(&mut c, 0);
    let position = c.tick(116).layout_position;
    assert!(position < -1.5);

    c.on_pan(PanGesture::started(Vec2::new(0.0, -10.0), Vec2::ZERO), 120);
    assert!(!c.is_animating());
    assert!(!c.is_flicking());
    assert_close(c.view().layout_position(), position - 0.3);

    // The stale flick never resumes.
    c.tick(2000);
    assert_close(c.view().layout_position(), position - 0.3);
    assert_eq!(completed(&events), 0);
}

#[test]
fn touch_down_stops_flick() {
    let (mut c, events) = controller(100);

    swipe(&mut c, 0);
    c.tick(100);
    c.on_touch_down(120);

    assert!(!c.is_animating());
    assert_eq!(c.view().scroll_speed(), 0.0);
    assert_eq!(completed(&events), 1);

    c.on_touch_down(140);
    assert_eq!(completed(&events), 1);
}

#[test]
fn dragging_past_start_shows_overshoot() {
    let (mut c, _) = controller(100);

    c.on_pan(PanGesture::started(Vec2::new(0.0, 10.0), Vec2::ZERO), 0);
    assert_eq!(c.view().layout_position(), 0.0);
    assert_close(c.view().overshoot(), 0.3);

    c.on_pan(PanGesture::continuing(Vec2::new(0.0, 10.0), Vec2::ZERO), 16);
    assert_close(c.view().overshoot(), 0.6);

    c.on_pan(PanGesture::continuing(Vec2::new(0.0, 100.0), Vec2::ZERO), 32);
    assert_eq!(c.view().overshoot(), 1.0);
}

#[test]
fn reversal_animates_overshoot_off() {
    let (mut c, _) = controller(100);

    c.on_pan(PanGesture::started(Vec2::new(0.0, 10.0), Vec2::ZERO), 0);
    c.on_pan(PanGesture::continuing(Vec2::new(0.0, 10.0), Vec2::ZERO), 16);
    assert_close(c.view().overshoot(), 0.6);

    // Pulling back while overshot starts an off-animation instead of writing directly.
    c.on_pan(PanGesture::continuing(Vec2::new(0.0, -5.0), Vec2::ZERO), 32);
    assert!(c.overshoot_animator().in_animation());
    assert_close(c.view().overshoot(), 0.6);

    let mid = c.tick(132);
    assert!(mid.overshoot > 0.0 && mid.overshoot < 0.6);

    // Pushing again mid-animation does not fight the animation.
    c.on_pan(PanGesture::continuing(Vec2::new(0.0, 5.0), Vec2::ZERO), 140);
    assert_close(c.view().overshoot(), mid.overshoot);

    c.tick(600);
    assert!(!c.overshoot_animator().in_animation());
    assert_eq!(c.view().overshoot(), 0.0);

    c.on_pan(PanGesture::continuing(Vec2::new(0.0, 5.0), Vec2::ZERO), 616);
    assert_close(c.view().overshoot(), 0.3);
}

#[test]
fn random_drags_keep_overshoot_at_start() {
    let mut rng = Lcg::new(0x0b5e_55ed);
    for _ in 0..8 {
        let (mut c, _) = controller(100);
        let mut now = 0;
        c.on_pan(PanGesture::started(Vec2::new(0.0, 5.0), Vec2::ZERO), now);
        for _ in 0..200 {
            now += 16;
            let dy = rng.gen_f32(-20.0, 20.0);
            c.on_pan(PanGesture::continuing(Vec2::new(0.0, dy), Vec2::ZERO), now);
            let frame = c.tick(now);

            let overshoot = c.view().overshoot();
            assert!((0.0..=1.0).contains(&overshoot), "overshoot {overshoot}");
            assert!(frame.layout_position <= 0.0);
            assert!(frame.layout_position >= c.view().min_layout_position());
        }
    }
}

#[test]
fn flick_into_end_bounces_overshoot() {
    let (mut c, _) = controller(100);
    assert_eq!(c.scroll_to(-90.0, 0, 0), Some(-90.0));
    c.tick(16);

    swipe(&mut c, 100);
    let flick = *c.scroll_animation().unwrap();
    assert_close(flick.position.to, -93.0);
    assert_close(c.scroll_overshoot(), -28.5);

    // Flick lands at 566; the bounce runs 42px at 120px/s.
    c.tick(566);
    assert!(!c.is_animating());
    assert!(c.overshoot_animator().is_animating_on());
    assert!(c.overshoot_animator().animate_off_pending());

    let rising = c.tick(700).overshoot;
    assert!(rising < 0.0 && rising > -1.0);

    assert_eq!(c.tick(916).overshoot, -1.0);
    assert!(!c.overshoot_animator().is_animating_on());

    assert_eq!(c.tick(1300).overshoot, 0.0);
    assert!(!c.overshoot_animator().is_animating());
}

#[test]
fn overshoot_off_request_waits_for_on_animation() {
    let config = OvershootConfig {
        indicator_height: 42.0,
        speed: 120.0,
    };
    let mut animator = OvershootAnimator::new();

    assert_eq!(animator.animate_to(0.0, 1.0, false, config, 0), None);
    assert!(animator.is_animating_on());
    assert_eq!(animator.animate_to(0.5, 0.0, false, config, 100), None);
    assert!(animator.animate_off_pending());
    assert_eq!(animator.tween().unwrap().to, 1.0);

    assert_eq!(animator.tick(config, 400), Some(1.0));
    assert!(animator.in_animation());
    assert_eq!(animator.tween().unwrap().to, 0.0);
    assert_eq!(animator.tick(config, 800), Some(0.0));
    assert!(!animator.is_animating());

    let instant = OvershootConfig { speed: 0.0, ..config };
    assert_eq!(animator.animate_to(0.0, 0.7, false, instant, 900), Some(0.7));
    assert!(!animator.in_animation());
}

#[test]
fn wheel_finished_settles_on_anchor() {
    let options = ItemViewOptions {
        anchoring: true,
        ..ItemViewOptions::default()
    };
    let (mut c, events) = controller_with(100, options);

    c.on_wheel(WheelEvent { z: 1 }, 0);
    // 10% of the 300px view, scaled by the layout's scroll factor.
    assert_close(c.view().layout_position(), -0.9);
    assert_eq!(c.wheel_deadline_ms(), Some(500));
    assert_eq!(started(&events), 1);

    c.tick(499);
    assert!(!c.is_animating());

    c.tick(500);
    assert_eq!(c.wheel_deadline_ms(), None);
    assert_eq!(
        c.scroll_animation().unwrap().kind,
        ScrollAnimationKind::Anchoring
    );

    c.tick(1500);
    assert_close(c.view().layout_position(), 0.0);
    assert_eq!(completed(&events), 1);
}

#[test]
fn wheel_rearms_timeout() {
    let (mut c, events) = controller(100);

    c.on_wheel(WheelEvent { z: 4 }, 0);
    c.on_wheel(WheelEvent { z: 4 }, 300);
    assert_close(c.view().layout_position(), -7.2);

    c.tick(500);
    assert_eq!(completed(&events), 0);
    c.tick(800);
    assert_eq!(completed(&events), 1);
    assert_close(c.view().layout_position(), -7.2);
}

#[test]
fn wheel_clamps_at_start() {
    let (mut c, _) = controller(100);
    c.on_wheel(WheelEvent { z: -3 }, 0);
    assert_eq!(c.view().layout_position(), 0.0);
    assert!(c.scroll_overshoot() > 0.0);
}

#[test]
fn scroll_to_animates_into_domain() {
    let (mut c, events) = controller(100);

    assert_eq!(c.scroll_to(-200.0, 300, 0), Some(-93.0));
    assert_eq!(
        c.scroll_animation().unwrap().kind,
        ScrollAnimationKind::ScrollTo
    );
    assert_eq!(started(&events), 1);

    c.tick(150);
    c.tick(300);
    assert_close(c.view().layout_position(), -93.0);
    assert_eq!(completed(&events), 1);

    assert_eq!(c.scroll_to_item(20, 0, 400), Some(-18.0));
    assert!(!c.is_animating());
    assert_close(c.view().layout_position(), -18.0);
}

#[test]
fn focus_change_scrolls_minimally() {
    let (mut c, _) = controller(100);

    // Item 20 sits on row 6; bringing it on screen at the bottom needs four rows.
    assert_eq!(c.focus_changed(20, 0), Some(-12.0));
    assert_eq!(c.scroll_animation().unwrap().position.duration_ms, 200);
    c.tick(200);
    assert_close(c.view().layout_position(), -12.0);

    // Already visible: stays put.
    assert_eq!(c.focus_changed(16, 300), Some(-12.0));
}

#[test]
fn activation_animates_after_count_shrink() {
    let (mut c, events) = controller(100);
    c.scroll_to(-93.0, 0, 0);
    c.tick(16);

    c.view_mut().factory_mut().count = 5;
    let activation = c.activate_layout(0, SIZE, 300, 100);
    assert_eq!(activation, Some(LayoutActivation::ScrollTo(0.0)));
    assert!(!c.view().refresh_enabled());
    assert_eq!(
        c.scroll_animation().unwrap().kind,
        ScrollAnimationKind::LayoutActivation
    );

    let mid = c.tick(250);
    assert!(mid.animating);
    assert!(mid.layout_position < 0.0 && mid.layout_position > -93.0);
    assert!(
        !events
            .lock()
            .unwrap()
            .contains(&ItemViewEvent::LayoutActivated)
    );

    c.tick(400);
    assert_eq!(c.view().layout_position(), 0.0);
    assert!(c.view().refresh_enabled());
    assert!(
        events
            .lock()
            .unwrap()
            .contains(&ItemViewEvent::LayoutActivated)
    );
    assert!(c.view().pool().ids().all(|id| id < 5));
    assert_eq!(c.view().pool().len(), 5);
    assert_eq!(completed(&events), 0);
}

#[test]
fn cancelled_activation_completes_in_place() {
    let (mut c, events) = controller(100);
    c.scroll_to(-93.0, 0, 0);
    c.view_mut().factory_mut().count = 5;
    c.activate_layout(0, SIZE, 300, 100);

    c.on_touch_down(200);
    assert!(!c.is_animating());
    assert!(c.view().refresh_enabled());
    assert!(
        events
            .lock()
            .unwrap()
            .contains(&ItemViewEvent::LayoutActivated)
    );
}

#[test]
fn disabled_refresh_stops_scroll_animation() {
    let (mut c, _) = controller(100);

    c.scroll_to(-60.0, 1000, 0);
    c.view_mut().set_refresh_enabled(false);

    // The first due refresh finds refresh disabled and drops the animation.
    let frame = c.tick(500);
    assert!(!frame.animating);
    assert!(frame.refresh.is_some());
    let position = frame.layout_position;
    c.tick(1500);
    assert_eq!(c.view().layout_position(), position);
}

#[test]
fn tick_refreshes_after_travel() {
    let (mut c, _) = controller(100);
    c.view_mut().set_refresh_enabled(true);
    assert!(c.tick(0).refresh.is_some());

    c.on_pan(PanGesture::started(Vec2::new(0.0, -300.0), Vec2::ZERO), 10);
    assert!(c.tick(16).refresh.is_none());

    c.on_pan(PanGesture::continuing(Vec2::new(0.0, -400.0), Vec2::ZERO), 20);
    // 21 positions travelled against an interval of 20.
    let frame = c.tick(32);
    assert!(frame.refresh.is_some());
    assert!(c.view().pool().ids().any(|id| id >= 21));
}

#[test]
fn zero_sized_view_does_not_flick() {
    let (mut c, events) = controller(100);
    c.view_mut().set_layout_size(Vec3::ZERO);
    assert!(!c.view().is_scrollable());

    swipe(&mut c, 0);
    assert!(!c.is_flicking());
    assert!(!c.is_animating());
    assert_eq!(c.view().layout_position(), 0.0);
    assert_eq!(completed(&events), 1);
}

#[test]
fn anchors_stay_within_a_fractional_floor() {
    let mut view = ItemView::new(
        Factory { count: 100 },
        ItemViewOptions::default().with_anchoring(true),
    );
    let index = view.add_layout(grid());
    // Three and a half rows per page.
    view.activate_layout(index, Vec3::new(300.0, 350.0, 300.0));
    view.complete_layout_activation();
    assert_close(view.min_layout_position(), -91.5);
    assert_eq!(view.set_layout_position(-200.0).position, -91.5);

    let layout = view.active_layout().unwrap();
    assert_close(layout.closest_anchor_position(-91.5), -93.0);
    assert_close(plan_anchor(&view).unwrap().target, -91.5);

    view.set_layout_position(-80.0);
    let plan = plan_flick(&view, -50.0, 30.0).unwrap();
    assert_close(plan.target, -91.5);
    assert_close(plan.excess, -18.5);
}
