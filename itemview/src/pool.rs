use alloc::collections::BTreeMap;

use crate::{ItemId, ItemRange, PoolDiff, ScrollDirection};

/// Supplies item content on demand and takes it back when an item leaves the resident window.
pub trait ItemFactory {
    type Content;

    /// Total number of items in the sequence. May change between calls.
    fn number_of_items(&self) -> u32;

    /// Creates content for `id`.
    ///
    /// Returning `None` is not an error: the slot is simply left empty.
    fn new_item(&mut self, id: ItemId) -> Option<Self::Content>;

    /// Receives content that is no longer resident.
    fn item_released(&mut self, id: ItemId, content: Self::Content) {
        let _ = (id, content);
    }
}

/// The resident items, ordered by id.
///
/// Holds at most one content value per id. Content leaves the pool only through the factory's
/// [`ItemFactory::item_released`] (or [`ItemPool::take`]).
#[derive(Clone, Debug)]
pub struct ItemPool<C> {
    items: BTreeMap<ItemId, C>,
}

impl<C> Default for ItemPool<C> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<C> ItemPool<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&C> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut C> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Returns the id of the first resident item matching `predicate`.
    pub fn find_id(&self, mut predicate: impl FnMut(&C) -> bool) -> Option<ItemId> {
        self.items
            .iter()
            .find_map(|(id, content)| predicate(content).then_some(*id))
    }

    pub fn first_id(&self) -> Option<ItemId> {
        self.items.keys().next().copied()
    }

    pub fn last_id(&self) -> Option<ItemId> {
        self.items.keys().next_back().copied()
    }

    /// `[first, last + 1)` over resident ids, or an empty range when nothing is resident.
    pub fn range(&self) -> ItemRange {
        match (self.first_id(), self.last_id()) {
            (Some(first), Some(last)) => ItemRange::new(first, last.saturating_add(1)),
            _ => ItemRange::EMPTY,
        }
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ItemId, &C)> + '_ {
        self.items.iter().map(|(id, content)| (*id, content))
    }

    /// Removes `id` without notifying a factory.
    pub fn take(&mut self, id: ItemId) -> Option<C> {
        self.items.remove(&id)
    }

    /// Makes the resident set equal `range ∩ [0, count)`.
    ///
    /// Ids outside are released first, then missing ids are requested in the order given by
    /// `order` (`Forward` is ascending).
    pub fn set_active_range<F>(
        &mut self,
        range: ItemRange,
        factory: &mut F,
        order: ScrollDirection,
    ) -> PoolDiff
    where
        F: ItemFactory<Content = C>,
    {
        let range = range.intersection(&ItemRange::up_to(factory.number_of_items()));
        let released = self.remove_outside(range, factory);
        let (created, skipped) = self.add_within(range, factory, order);
        PoolDiff {
            released,
            created,
            skipped,
        }
    }

    /// Releases every resident id not within `range`. Returns the number released.
    pub fn remove_outside<F>(&mut self, range: ItemRange, factory: &mut F) -> u32
    where
        F: ItemFactory<Content = C>,
    {
        let mut kept = BTreeMap::new();
        let mut released = 0;
        for (id, content) in core::mem::take(&mut self.items) {
            if range.within(id) {
                kept.insert(id, content);
            } else {
                factory.item_released(id, content);
                released += 1;
            }
        }
        self.items = kept;
        released
    }

    /// Requests content for every missing id in `range ∩ [0, count)`.
    ///
    /// Returns `(created, skipped)`, where `skipped` counts ids the factory had no content for.
    pub fn add_within<F>(
        &mut self,
        range: ItemRange,
        factory: &mut F,
        order: ScrollDirection,
    ) -> (u32, u32)
    where
        F: ItemFactory<Content = C>,
    {
        let range = range.intersection(&ItemRange::up_to(factory.number_of_items()));
        let mut created = 0;
        let mut skipped = 0;
        let mut add = |items: &mut BTreeMap<ItemId, C>, id: ItemId| {
            if items.contains_key(&id) {
                return;
            }
            match factory.new_item(id) {
                Some(content) => {
                    items.insert(id, content);
                    created += 1;
                }
                None => skipped += 1,
            }
        };
        match order {
            ScrollDirection::Forward => range.ids().for_each(|id| add(&mut self.items, id)),
            ScrollDirection::Backward => range.ids().rev().for_each(|id| add(&mut self.items, id)),
        }
        (created, skipped)
    }

    /// Releases every resident item.
    pub fn clear<F>(&mut self, factory: &mut F)
    where
        F: ItemFactory<Content = C>,
    {
        for (id, content) in core::mem::take(&mut self.items) {
            factory.item_released(id, content);
        }
    }

    /// Inserts an item at `id`, shifting every resident id `>= id` up by one.
    ///
    /// The content is kept when `id` falls inside the resident window; otherwise it is handed
    /// straight back to the factory, as the item is not visible.
    pub fn insert<F>(&mut self, id: ItemId, content: C, factory: &mut F)
    where
        F: ItemFactory<Content = C>,
    {
        let keep = matches!(
            (self.first_id(), self.last_id()),
            (Some(first), Some(last)) if id >= first && id <= last
        );

        let tail = self.items.split_off(&id);
        for (old, moved) in tail {
            match old.checked_add(1) {
                Some(new) => {
                    self.items.insert(new, moved);
                }
                None => factory.item_released(old, moved),
            }
        }

        if keep {
            self.items.insert(id, content);
        } else {
            idebug!(id, "inserted item outside the resident window, releasing");
            factory.item_released(id, content);
        }
    }

    /// Applies [`ItemPool::insert`] in ascending id order.
    pub fn insert_many<F>(&mut self, items: impl IntoIterator<Item = (ItemId, C)>, factory: &mut F)
    where
        F: ItemFactory<Content = C>,
    {
        let mut sorted: alloc::vec::Vec<(ItemId, C)> = items.into_iter().collect();
        sorted.sort_by_key(|(id, _)| *id);
        for (id, content) in sorted {
            self.insert(id, content, factory);
        }
    }

    /// Removes the item at `id`, shifting every resident id `> id` down by one.
    ///
    /// Returns `true` when the pool changed.
    pub fn remove<F>(&mut self, id: ItemId, factory: &mut F) -> bool
    where
        F: ItemFactory<Content = C>,
    {
        let mut changed = false;
        if let Some(content) = self.items.remove(&id) {
            factory.item_released(id, content);
            changed = true;
        }

        let Some(next) = id.checked_add(1) else {
            return changed;
        };
        let tail = self.items.split_off(&next);
        changed |= !tail.is_empty();
        for (old, moved) in tail {
            self.items.insert(old - 1, moved);
        }
        changed
    }

    /// Applies [`ItemPool::remove`] in descending id order. Returns `true` when the pool changed.
    pub fn remove_many<F>(&mut self, ids: impl IntoIterator<Item = ItemId>, factory: &mut F) -> bool
    where
        F: ItemFactory<Content = C>,
    {
        let mut sorted: alloc::vec::Vec<ItemId> = ids.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        let mut changed = false;
        for id in sorted.into_iter().rev() {
            changed |= self.remove(id, factory);
        }
        changed
    }

    /// Replaces the content at `id`, releasing the previous content if any.
    pub fn replace<F>(&mut self, id: ItemId, content: C, factory: &mut F)
    where
        F: ItemFactory<Content = C>,
    {
        if let Some(previous) = self.items.insert(id, content) {
            factory.item_released(id, previous);
        }
    }
}
