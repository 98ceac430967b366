use alloc::vec::Vec;

use crate::clamp::{self, Clamped, Domain};
use crate::float::{self, EPSILON};
use crate::layout::scroll_extent;
use crate::{
    FocusDirection, FrameState, ItemFactory, ItemId, ItemLayout, ItemPool, ItemRange,
    ItemTransform, ItemViewEvent, ItemViewOptions, Layout, PoolDiff, RefreshScheduler,
    ScrollDirection, ScrollState, Vec2, Vec3,
};

/// The outcome of [`ItemView::activate_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutActivation {
    /// The layout is active and [`ItemViewEvent::LayoutActivated`] has been emitted.
    Activated,
    /// The layout position must move to the given target first.
    ///
    /// Once there, call [`ItemView::complete_layout_activation`].
    ScrollTo(f32),
}

/// A headless item view.
///
/// Owns the item factory, the resident item pool, the registered layouts and the scroll state
/// (layout position, scroll speed and overshoot). It does not animate: a driver (for example the
/// `itemview-adapter` controller) writes positions and calls [`ItemView::refresh_if_due`] once
/// per frame, after input has been applied.
pub struct ItemView<F: ItemFactory> {
    options: ItemViewOptions,
    factory: F,
    pool: ItemPool<F::Content>,

    layouts: Vec<Layout>,
    active_layout: Option<usize>,
    layout_size: Vec3,

    layout_position: f32,
    scroll_speed: f32,
    overshoot: f32,

    refresh: RefreshScheduler,
    refresh_enabled: bool,
    refresh_order: ScrollDirection,
    domain: Domain,
}

impl<F: ItemFactory> ItemView<F> {
    pub fn new(factory: F, options: ItemViewOptions) -> Self {
        idebug!(
            items = factory.number_of_items(),
            refresh_interval = options.refresh_interval,
            anchoring = options.anchoring,
            "ItemView::new"
        );
        Self {
            refresh: RefreshScheduler::new(options.refresh_interval),
            options,
            factory,
            pool: ItemPool::new(),
            layouts: Vec::new(),
            active_layout: None,
            layout_size: Vec3::ZERO,
            layout_position: 0.0,
            scroll_speed: 0.0,
            overshoot: 0.0,
            refresh_enabled: true,
            refresh_order: ScrollDirection::Forward,
            domain: Domain::EMPTY,
        }
    }

    pub fn options(&self) -> &ItemViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ItemViewOptions) {
        self.refresh.set_interval(options.refresh_interval);
        self.options = options;
        itrace!(
            refresh_interval = self.options.refresh_interval,
            anchoring = self.options.anchoring,
            "ItemView::set_options"
        );
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ItemViewOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Mutable access to the factory.
    ///
    /// After changing the number of items, call [`ItemView::item_count_changed`].
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn item_count(&self) -> u32 {
        self.factory.number_of_items()
    }

    pub fn pool(&self) -> &ItemPool<F::Content> {
        &self.pool
    }

    /// Fires the `on_event` callback, if any.
    pub fn emit(&self, event: ItemViewEvent) {
        itrace!(?event, "ItemView::emit");
        if let Some(on_event) = &self.options.on_event {
            on_event(event);
        }
    }

    // Layouts

    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    /// Registers a layout and returns its index.
    pub fn add_layout(&mut self, layout: impl Into<Layout>) -> usize {
        self.layouts.push(layout.into());
        idebug!(index = self.layouts.len() - 1, "ItemView::add_layout");
        self.layouts.len() - 1
    }

    /// Removes a layout. Removing the active layout deactivates it.
    pub fn remove_layout(&mut self, index: usize) -> Option<Layout> {
        debug_assert!(index < self.layouts.len(), "layout index out of range");
        if index >= self.layouts.len() {
            iwarn!(index, count = self.layouts.len(), "remove_layout: index out of range");
            return None;
        }
        self.active_layout = match self.active_layout {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        idebug!(index, active = ?self.active_layout, "ItemView::remove_layout");
        let removed = self.layouts.remove(index);
        if self.active_layout.is_none() {
            self.domain = Domain::EMPTY;
        }
        Some(removed)
    }

    pub fn layout(&self, index: usize) -> Option<&Layout> {
        self.layouts.get(index)
    }

    /// Mutable access to a registered layout.
    ///
    /// Changes to the active layout take effect on the next [`ItemView::refresh`].
    pub fn layout_mut(&mut self, index: usize) -> Option<&mut Layout> {
        self.layouts.get_mut(index)
    }

    pub fn active_layout(&self) -> Option<&Layout> {
        self.active_layout.and_then(|index| self.layouts.get(index))
    }

    pub fn active_layout_index(&self) -> Option<usize> {
        self.active_layout
    }

    /// Makes `index` the active layout for a view of `size`.
    ///
    /// Refresh is disabled until the activation completes. Items visible at the current position
    /// are created straight away (without reserve). If the position lies outside the new domain,
    /// or anchoring is enabled, the caller must move it to the returned target and then call
    /// [`ItemView::complete_layout_activation`].
    ///
    /// Returns `None` when `index` is out of range.
    pub fn activate_layout(&mut self, index: usize, size: Vec3) -> Option<LayoutActivation> {
        debug_assert!(index < self.layouts.len(), "layout index out of range");
        if index >= self.layouts.len() {
            iwarn!(index, count = self.layouts.len(), "activate_layout: index out of range");
            return None;
        }

        self.refresh_enabled = false;
        self.layout_size = size;
        self.active_layout = Some(index);

        if let Some(range) = self.item_range_at(self.layout_position, false) {
            let (created, skipped) =
                self.pool
                    .add_within(range, &mut self.factory, self.refresh_order);
            itrace!(?range, created, skipped, "activate_layout: populated");
        }

        let current = self.layout_position;
        let clamped = self.clamp_position(current);
        let activation = if current < clamped.position {
            LayoutActivation::ScrollTo(clamped.position)
        } else if self.options.anchoring {
            let anchor = self
                .active_layout()
                .map_or(current, |layout| layout.closest_anchor_position(current));
            LayoutActivation::ScrollTo(self.clamp_position(anchor).position)
        } else {
            LayoutActivation::Activated
        };

        self.recalculate_domain();
        idebug!(index, ?size, ?activation, "ItemView::activate_layout");

        if activation == LayoutActivation::Activated {
            self.emit(ItemViewEvent::LayoutActivated);
        }
        Some(activation)
    }

    /// Finishes an activation that required a scroll: re-enables refresh, refreshes with extra
    /// caching and emits [`ItemViewEvent::LayoutActivated`].
    pub fn complete_layout_activation(&mut self) {
        self.refresh_enabled = true;
        self.do_refresh(self.layout_position, true);
        self.emit(ItemViewEvent::LayoutActivated);
    }

    /// Leaves the view without an active layout. Resident items are kept.
    pub fn deactivate_current_layout(&mut self) {
        if self.active_layout.take().is_some() {
            idebug!("ItemView::deactivate_current_layout");
            self.domain = Domain::EMPTY;
        }
    }

    pub fn layout_size(&self) -> Vec3 {
        self.layout_size
    }

    /// Resizes the layout area, re-deriving the domain and clamping the position.
    pub fn set_layout_size(&mut self, size: Vec3) {
        self.layout_size = size;
        self.recalculate_domain();
        self.set_layout_position(self.layout_position);
        self.refresh.reset();
    }

    // Position and domain

    pub fn layout_position(&self) -> f32 {
        self.layout_position
    }

    /// The layout position of item `id`: the layout position plus `id`.
    pub fn current_layout_position(&self, id: ItemId) -> f32 {
        self.layout_position + id as f32
    }

    /// Clamps `raw` into the domain and stores the result. No refresh happens here.
    pub fn set_layout_position(&mut self, raw: f32) -> Clamped {
        let clamped = self.clamp_position(raw);
        self.layout_position = clamped.position;
        clamped
    }

    /// The domain floor for the current item count, layout and size.
    ///
    /// A layout area with no extent along the scroll axis, or a layout reporting a non-finite
    /// floor, has a floor of `0` and is not scrollable.
    pub fn min_layout_position(&self) -> f32 {
        self.active_layout().map_or(0.0, |layout| {
            if scroll_extent(layout.orientation(), self.layout_size) <= 0.0 {
                return 0.0;
            }
            let floor =
                layout.minimum_layout_position(self.factory.number_of_items(), self.layout_size);
            if floor.is_finite() { floor.min(0.0) } else { 0.0 }
        })
    }

    /// Clamps `raw` against the live domain floor.
    pub fn clamp_position(&self, raw: f32) -> Clamped {
        clamp::clamp_layout_position(raw, self.min_layout_position())
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Size of the scrollable domain in pixels along the scroll axis, as `(0, extent)`.
    pub fn domain_size(&self) -> Vec2 {
        if self.active_layout().is_none() {
            return Vec2::ZERO;
        }
        let start = self.scroll_position(0.0);
        let end = self.scroll_position(-self.domain.scroll_position_max);
        Vec2::new(0.0, float::abs(start - end))
    }

    pub fn is_scrollable(&self) -> bool {
        self.domain.scrollable
    }

    /// Re-derives the [`Domain`] from the active layout, item count and layout size.
    pub fn recalculate_domain(&mut self) {
        let Some(layout) = self.active_layout() else {
            self.domain = Domain::EMPTY;
            return;
        };
        let size = self.layout_size;
        let min = self.min_layout_position();
        let first = layout.item_position(0, 0.0, size);
        let span = float::abs(min);
        let last = layout.item_position(span as ItemId, span, size);
        let content_size = if layout.orientation().is_horizontal() {
            float::abs(first.x - last.x)
        } else {
            float::abs(first.y - last.y)
        };

        let current = self.clamp_position(self.layout_position).position;
        let forward = self.clamp_position(current + 1.0).position;
        let backward = self.clamp_position(current - 1.0).position;

        self.domain = Domain {
            min_layout_position: min,
            scroll_position_max: -min,
            content_size,
            scrollable: float::abs(forward - backward) > EPSILON,
        };
        itrace!(domain = ?self.domain, "recalculate_domain");
    }

    /// The pixel offset of item 0 along the scroll axis at `layout_position`.
    pub fn scroll_position(&self, layout_position: f32) -> f32 {
        let Some(layout) = self.active_layout() else {
            return 0.0;
        };
        let first = layout.item_position(0, layout_position, self.layout_size);
        if layout.orientation().is_horizontal() {
            first.x
        } else {
            first.y
        }
    }

    /// The current scroll position as reported with scroll events: `(0, pixels)`.
    pub fn current_scroll_position(&self) -> Vec2 {
        Vec2::new(0.0, self.scroll_position(self.layout_position))
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn set_scroll_speed(&mut self, speed: f32) {
        self.scroll_speed = speed;
    }

    /// The overshoot indicator amount, in `[-1, 1]`.
    pub fn overshoot(&self) -> f32 {
        self.overshoot
    }

    pub fn set_overshoot(&mut self, overshoot: f32) {
        self.overshoot = if overshoot.is_nan() {
            0.0
        } else {
            overshoot.clamp(-1.0, 1.0)
        };
    }

    /// Height of the overshoot indicator, or `0` when overshoot is disabled.
    pub fn overshoot_indicator_height(&self) -> f32 {
        if !self.options.overshoot_enabled {
            return 0.0;
        }
        let vertical = self
            .active_layout()
            .is_none_or(|layout| layout.orientation().is_vertical());
        let cross = if vertical {
            self.layout_size.x
        } else {
            self.layout_size.y
        };
        clamp::overshoot_indicator_height(cross, self.options.overshoot_size)
    }

    /// Pixels scrolled per wheel notch.
    pub fn wheel_scroll_distance_step(&self) -> f32 {
        self.options
            .wheel_scroll_distance_step
            .unwrap_or(self.layout_size.y * 0.1)
    }

    // Refresh

    pub fn refresh_enabled(&self) -> bool {
        self.refresh_enabled
    }

    /// Enables extra caching on threshold refreshes.
    pub fn set_refresh_enabled(&mut self, enabled: bool) {
        self.refresh_enabled = enabled;
    }

    pub fn refresh_order(&self) -> ScrollDirection {
        self.refresh_order
    }

    pub fn set_refresh_order(&mut self, order: ScrollDirection) {
        self.refresh_order = order;
    }

    pub fn refresh_interval(&self) -> f32 {
        self.refresh.interval()
    }

    pub fn set_refresh_interval(&mut self, interval: f32) {
        self.options.refresh_interval = interval;
        self.refresh.set_interval(interval);
    }

    pub fn refresh_scheduler(&self) -> &RefreshScheduler {
        &self.refresh
    }

    /// Whether the position has moved far enough since the last refresh pass.
    pub fn is_refresh_due(&self) -> bool {
        self.active_layout.is_some() && self.refresh.is_due(self.layout_position)
    }

    /// Runs a refresh pass if one is due.
    ///
    /// Extra items are cached when refresh is enabled or `animating` is set; fast jumps skip
    /// them.
    pub fn refresh_if_due(&mut self, animating: bool) -> Option<PoolDiff> {
        if !self.is_refresh_due() {
            return None;
        }
        let cache_extra = self.refresh_enabled || animating;
        Some(self.do_refresh(self.layout_position, cache_extra))
    }

    /// Makes the resident items match the layout at `layout_position`.
    ///
    /// With `cache_extra`, the layout's reserve count is added on both sides of the visible
    /// range. Emits [`ItemViewEvent::ScrollUpdated`] carrying the layout position.
    pub fn do_refresh(&mut self, layout_position: f32, cache_extra: bool) -> PoolDiff {
        let Some(range) = self.item_range_at(layout_position, cache_extra) else {
            return PoolDiff::default();
        };
        let diff = self
            .pool
            .set_active_range(range, &mut self.factory, self.refresh_order);
        self.refresh.mark(layout_position);
        self.recalculate_domain();
        itrace!(
            layout_position,
            cache_extra,
            ?range,
            released = diff.released,
            created = diff.created,
            skipped = diff.skipped,
            "do_refresh"
        );
        self.emit(ItemViewEvent::ScrollUpdated(Vec2::new(0.0, layout_position)));
        diff
    }

    /// Releases every item and rebuilds the pool with extra caching.
    pub fn refresh(&mut self) -> PoolDiff {
        self.pool.clear(&mut self.factory);
        self.refresh.reset();
        self.do_refresh(self.layout_position, true)
    }

    /// Re-derives the domain after the factory's item count changed, snaps the position into the
    /// new domain and refreshes.
    pub fn item_count_changed(&mut self) -> PoolDiff {
        self.recalculate_domain();
        let clamped = self.set_layout_position(self.layout_position);
        idebug!(
            items = self.factory.number_of_items(),
            layout_position = clamped.position,
            "item_count_changed"
        );
        self.do_refresh(clamped.position, true)
    }

    /// The range that should be resident at `layout_position`, intersected with `[0, count)`.
    pub fn item_range_at(&self, layout_position: f32, cache_extra: bool) -> Option<ItemRange> {
        let layout = self.active_layout()?;
        let mut range = layout.items_within_area(layout_position, self.layout_size);
        if cache_extra {
            range = range.expand(layout.reserve_item_count(self.layout_size));
        }
        Some(range.intersection(&ItemRange::up_to(self.factory.number_of_items())))
    }

    // Items

    pub fn item(&self, id: ItemId) -> Option<&F::Content> {
        self.pool.get(id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut F::Content> {
        self.pool.get_mut(id)
    }

    /// The id of the first resident item matching `predicate`.
    pub fn item_id(&self, predicate: impl FnMut(&F::Content) -> bool) -> Option<ItemId> {
        self.pool.find_id(predicate)
    }

    /// `[first, last + 1)` over the resident ids.
    pub fn items_range(&self) -> ItemRange {
        self.pool.range()
    }

    /// The transform of `id` under the active layout at the current position.
    pub fn item_transform(&self, id: ItemId) -> Option<ItemTransform> {
        let layout = self.active_layout()?;
        Some(layout.item_transform(id, self.layout_position, self.layout_size))
    }

    /// Calls `f` with every resident item and its transform, in ascending id order.
    pub fn for_each_item_transform(&self, mut f: impl FnMut(ItemId, &F::Content, ItemTransform)) {
        let Some(layout) = self.active_layout() else {
            return;
        };
        for (id, content) in self.pool.iter() {
            f(
                id,
                content,
                layout.item_transform(id, self.layout_position, self.layout_size),
            );
        }
    }

    /// Inserts an item, renumbering every later resident item.
    ///
    /// The factory's item count is expected to already include the new item.
    pub fn insert_item(&mut self, id: ItemId, content: F::Content) {
        itrace!(id, "insert_item");
        self.pool.insert(id, content, &mut self.factory);
        self.recalculate_domain();
    }

    /// Inserts several items, lowest id first.
    pub fn insert_items(&mut self, items: impl IntoIterator<Item = (ItemId, F::Content)>) {
        self.pool.insert_many(items, &mut self.factory);
        self.recalculate_domain();
    }

    /// Removes an item, renumbering every later resident item.
    ///
    /// The factory's item count is expected to already exclude the removed item.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let changed = self.pool.remove(id, &mut self.factory);
        itrace!(id, changed, "remove_item");
        if changed {
            self.items_removed();
        }
        changed
    }

    /// Removes several items, highest id first.
    pub fn remove_items(&mut self, ids: impl IntoIterator<Item = ItemId>) -> bool {
        let changed = self.pool.remove_many(ids, &mut self.factory);
        if changed {
            self.items_removed();
        }
        changed
    }

    pub fn replace_item(&mut self, id: ItemId, content: F::Content) {
        self.pool.replace(id, content, &mut self.factory);
        self.recalculate_domain();
    }

    pub fn replace_items(&mut self, items: impl IntoIterator<Item = (ItemId, F::Content)>) {
        for (id, content) in items {
            self.pool.replace(id, content, &mut self.factory);
        }
        self.recalculate_domain();
    }

    fn items_removed(&mut self) {
        self.recalculate_domain();
        self.set_layout_position(self.layout_position);
    }

    // Keyboard focus

    /// The resident item keyboard focus should move to from `current`.
    ///
    /// Without a current item, item 0 is chosen. If the candidate is not resident, the first item
    /// visible at the closest anchor is used instead. Returns `None` when focus cannot move.
    pub fn next_focus_item(
        &self,
        current: Option<ItemId>,
        direction: FocusDirection,
        loop_enabled: bool,
    ) -> Option<ItemId> {
        let layout = self.active_layout()?;
        let candidate = match current {
            None => 0,
            Some(id) => {
                let next = layout.next_focus_item_id(
                    id,
                    self.factory.number_of_items(),
                    direction,
                    loop_enabled,
                );
                if next == id {
                    return None;
                }
                next
            }
        };
        if self.pool.contains(candidate) {
            return Some(candidate);
        }

        let anchor = layout.closest_anchor_position(self.layout_position);
        let first = layout.items_within_area(anchor, self.layout_size).begin;
        self.pool.contains(first).then_some(first)
    }

    /// The layout position that brings `id` on screen with the least movement.
    pub fn closest_on_screen_position(&self, id: ItemId) -> Option<f32> {
        let layout = self.active_layout()?;
        Some(layout.closest_on_screen_layout_position(id, self.layout_position, self.layout_size))
    }

    // State

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            layout_position: self.layout_position,
            scroll_speed: self.scroll_speed,
            overshoot: self.overshoot,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            active_layout: self.active_layout,
            layout_size: self.layout_size,
            scroll: self.scroll_state(),
        }
    }

    /// Restores a snapshot taken with [`ItemView::frame_state`] and refreshes.
    ///
    /// An out-of-range layout index leaves the view without an active layout.
    pub fn restore_frame_state(&mut self, state: FrameState) {
        self.active_layout = state
            .active_layout
            .filter(|index| *index < self.layouts.len());
        if self.active_layout != state.active_layout {
            iwarn!(
                index = ?state.active_layout,
                "restore_frame_state: layout index out of range"
            );
        }
        self.layout_size = state.layout_size;
        self.scroll_speed = state.scroll.scroll_speed;
        self.set_overshoot(state.scroll.overshoot);
        self.recalculate_domain();
        self.set_layout_position(state.scroll.layout_position);
        self.refresh.reset();
        self.do_refresh(self.layout_position, true);
    }
}

impl<F: ItemFactory> core::fmt::Debug for ItemView<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemView")
            .field("options", &self.options)
            .field("resident", &self.pool.len())
            .field("layouts", &self.layouts)
            .field("active_layout", &self.active_layout)
            .field("layout_size", &self.layout_size)
            .field("layout_position", &self.layout_position)
            .field("scroll_speed", &self.scroll_speed)
            .field("overshoot", &self.overshoot)
            .field("refresh", &self.refresh)
            .field("refresh_enabled", &self.refresh_enabled)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
