use itemview::{GridLayout, ItemFactory, ItemId, ItemViewEvent, ItemViewOptions, Vec2, Vec3};
use itemview_adapter::{Controller, PanGesture, WheelEvent};

struct Rows(u32);

impl ItemFactory for Rows {
    type Content = ItemId;

    fn number_of_items(&self) -> u32 {
        self.0
    }

    fn new_item(&mut self, id: ItemId) -> Option<ItemId> {
        Some(id)
    }
}

fn main() {
    // Example: an adapter feeding input into the controller and ticking it once per frame.
    //
    // An adapter would:
    // - forward touch, pan and wheel events from its toolkit
    // - call tick(now_ms) from its frame callback
    // - position its widgets from the view's item transforms
    let options = ItemViewOptions {
        anchoring: true,
        ..ItemViewOptions::default()
    }
    .with_on_event(Some(|event: ItemViewEvent| {
        if !matches!(event, ItemViewEvent::ScrollUpdated(_)) {
            println!("event: {event:?}");
        }
    }));

    let mut c = Controller::new(Rows(500), options);
    let grid = c.view_mut().add_layout(GridLayout::new().with_columns(4));
    c.activate_layout(grid, Vec3::new(480.0, 800.0, 800.0), 0, 0);

    let mut now_ms = 0u64;
    c.on_touch_down(now_ms);
    let (displacement, velocity) = (Vec2::new(0.0, -40.0), Vec2::new(0.0, -1.5));
    c.on_pan(PanGesture::started(displacement, velocity), now_ms);
    for _ in 0..3 {
        now_ms += 16;
        c.on_pan(PanGesture::continuing(displacement, velocity), now_ms);
    }
    c.on_pan(PanGesture::finished(), now_ms);
    println!(
        "flicking={} towards {:?}",
        c.is_flicking(),
        c.scroll_animation().map(|animation| animation.position.to)
    );

    while c.is_animating() {
        now_ms += 16;
        let frame = c.tick(now_ms);
        if now_ms.is_multiple_of(160) {
            println!(
                "t={now_ms} pos={:.2} overshoot={:.2} resident={}",
                frame.layout_position,
                frame.overshoot,
                c.view().pool().len()
            );
        }
    }

    c.on_wheel(WheelEvent { z: 3 }, now_ms);
    let deadline = c.wheel_deadline_ms().unwrap_or(now_ms);
    while now_ms <= deadline || c.is_animating() {
        now_ms += 16;
        c.tick(now_ms);
    }
    println!("settled at {}", c.view().layout_position());
}
