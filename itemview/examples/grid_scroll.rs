// Example: a grid view over a million items, moved by hand and refreshed.
use itemview::{GridLayout, ItemFactory, ItemId, ItemView, ItemViewOptions, Vec3};

struct Labels {
    count: u32,
}

impl ItemFactory for Labels {
    type Content = String;

    fn number_of_items(&self) -> u32 {
        self.count
    }

    fn new_item(&mut self, id: ItemId) -> Option<String> {
        Some(format!("item #{id}"))
    }
}

fn main() {
    let mut view = ItemView::new(Labels { count: 1_000_000 }, ItemViewOptions::default());
    let grid = view.add_layout(GridLayout::new().with_columns(4));
    let activation = view.activate_layout(grid, Vec3::new(480.0, 800.0, 800.0));
    println!("activation={activation:?} domain={:?}", view.domain());
    println!("resident after activation={}", view.pool().len());

    view.set_refresh_enabled(true);
    for step in 1..=5 {
        view.set_layout_position(-1_000.0 * step as f32);
        if let Some(diff) = view.refresh_if_due(false) {
            println!(
                "pos={} created={} released={} first={:?} last={:?}",
                view.layout_position(),
                diff.created,
                diff.released,
                view.pool().ids().next(),
                view.pool().ids().next_back()
            );
        }
    }

    let far = view.set_layout_position(-2_000_000.0);
    println!("clamped={} excess={}", far.position, far.excess);
    view.refresh();

    let mut shown = 0;
    view.for_each_item_transform(|id, label, transform| {
        if transform.visible && shown < 3 {
            println!("{id}: {label} at {:?}", transform.position);
            shown += 1;
        }
    });
}
