//! Placed-item storage and identifier allocation.

use std::collections::BTreeMap;

use havenisle_core::{Footprint, ItemId, ItemKind};

/// An item committed onto the lattice.
#[derive(Clone, Debug)]
pub(crate) struct PlacedItem {
    /// Identifier allocated by the world for the item.
    pub(crate) id: ItemId,
    /// Kind the item was placed as.
    pub(crate) kind: ItemKind,
    /// Footprint the item occupies (its origin while lifted).
    pub(crate) footprint: Footprint,
    /// Horizontal mirror applied to the item's presentation only.
    pub(crate) flipped: bool,
}

/// Registry that stores placed items and manages identifier allocation.
#[derive(Clone, Debug)]
pub(crate) struct ItemRegistry {
    entries: BTreeMap<ItemId, PlacedItem>,
    next_id: ItemId,
}

impl ItemRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: ItemId::new(0),
        }
    }

    /// Stores a new item and returns its allocated identifier.
    pub(crate) fn allocate(&mut self, kind: ItemKind, footprint: Footprint) -> ItemId {
        let id = self.next_id;
        self.next_id = ItemId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(
            id,
            PlacedItem {
                id,
                kind,
                footprint,
                flipped: false,
            },
        );
        id
    }

    pub(crate) fn get(&self, item: ItemId) -> Option<&PlacedItem> {
        self.entries.get(&item)
    }

    pub(crate) fn get_mut(&mut self, item: ItemId) -> Option<&mut PlacedItem> {
        self.entries.get_mut(&item)
    }

    pub(crate) fn remove(&mut self, item: ItemId) -> Option<PlacedItem> {
        self.entries.remove(&item)
    }

    /// Iterates the stored items in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &PlacedItem> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use havenisle_core::TileCoord;

    #[test]
    fn allocation_hands_out_sequential_identifiers() {
        let mut registry = ItemRegistry::new();
        let first = registry.allocate(ItemKind::new("hut"), Footprint::single(TileCoord::new(0, 0)));
        let second =
            registry.allocate(ItemKind::new("hut"), Footprint::single(TileCoord::new(1, 0)));

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn removed_identifiers_are_not_reused() {
        let mut registry = ItemRegistry::new();
        let first = registry.allocate(ItemKind::new("hut"), Footprint::single(TileCoord::new(0, 0)));
        let removed = registry.remove(first).expect("present");
        assert_eq!(removed.id, first);

        let next = registry.allocate(ItemKind::new("hut"), Footprint::single(TileCoord::new(0, 0)));
        assert_eq!(next.get(), 1);
        assert!(registry.get(first).is_none());
    }

    #[test]
    fn items_start_unflipped() {
        let mut registry = ItemRegistry::new();
        let id = registry.allocate(
            ItemKind::new("shrine"),
            Footprint::new(TileCoord::new(0, 0), 2),
        );
        assert!(!registry.get(id).expect("present").flipped);
    }
}
