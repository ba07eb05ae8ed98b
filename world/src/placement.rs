//! Two-phase placement, relocation, and removal against the owned context.

use havenisle_core::{Footprint, ItemId, ItemKind, PlacementError, RemovalError, TileCoord};

use crate::{
    inventory::Inventory, items::ItemRegistry, lattice::TileLattice, occupancy::OccupancyMap,
    restricted::RestrictedSet,
};

/// Result of a committed placement.
#[derive(Clone, Debug)]
pub(crate) struct PlacedOutcome {
    /// Identifier allocated to the new item.
    pub(crate) item: ItemId,
    /// Footprint the new item occupies.
    pub(crate) footprint: Footprint,
    /// Single-tile occupant destroyed and refunded by the placement, if any.
    pub(crate) replaced: Option<RemovedItem>,
}

/// Description of an item that was removed from the world.
#[derive(Clone, Debug)]
pub(crate) struct RemovedItem {
    /// Identifier of the removed item.
    pub(crate) item: ItemId,
    /// Kind of the removed item.
    pub(crate) kind: ItemKind,
    /// Footprint the item occupied.
    pub(crate) footprint: Footprint,
}

/// Validates and commits placement operations against the explicit context.
///
/// Every operation is two-phase: validation touches nothing, and commit runs
/// only after validation fully passes, so a rejected request leaves the world
/// exactly as it found it.
pub(crate) struct PlacementEngine<'w> {
    pub(crate) lattice: &'w TileLattice,
    pub(crate) restricted: &'w RestrictedSet,
    pub(crate) occupancy: &'w mut OccupancyMap,
    pub(crate) inventory: &'w mut Inventory,
    pub(crate) items: &'w mut ItemRegistry,
}

impl PlacementEngine<'_> {
    /// Validates and commits a new placement of `kind` anchored at `anchor`.
    ///
    /// A single-tile placement may replace an existing single-tile occupant
    /// on its sole key; the replaced item is destroyed and refunded. Any
    /// overlap with a multi-tile occupant blocks the placement
    /// unconditionally: large pieces must be deliberately deleted, never
    /// silently swapped away.
    pub(crate) fn place(
        &mut self,
        kind: &ItemKind,
        anchor: TileCoord,
        span: u32,
    ) -> Result<PlacedOutcome, PlacementError> {
        let footprint = Footprint::new(anchor, span);
        let keys = footprint.keys();

        self.validate_range(&keys)?;
        self.validate_unrestricted(&keys)?;

        let replaced_owner = if footprint.is_single() {
            match self.occupancy.owner_of(anchor) {
                Some(owner) if self.is_single_tile(owner) => Some(owner),
                Some(_) => return Err(PlacementError::Occupied),
                None => None,
            }
        } else {
            if keys.iter().any(|key| self.occupancy.owner_of(*key).is_some()) {
                return Err(PlacementError::Occupied);
            }
            None
        };

        if self.inventory.remaining(kind) == 0 {
            return Err(PlacementError::InventoryExhausted);
        }

        // Commit phase; nothing below may fail partway.
        if !self.inventory.reserve(kind) {
            return Err(PlacementError::InventoryExhausted);
        }
        let replaced = replaced_owner.and_then(|owner| self.destroy(owner, false));
        let item = self.items.allocate(kind.clone(), footprint);
        self.occupancy.occupy(&keys, item);

        Ok(PlacedOutcome {
            item,
            footprint,
            replaced,
        })
    }

    /// Validates a relocation target for a lifted item.
    ///
    /// The item's origin keys were vacated at lift time, so settling back
    /// onto the origin footprint validates clean as a no-op move. Moves never
    /// replace occupants and never touch the inventory.
    pub(crate) fn validate_target(&self, target: Footprint) -> Result<(), PlacementError> {
        let keys = target.keys();
        self.validate_range(&keys)?;
        self.validate_unrestricted(&keys)?;
        if keys.iter().any(|key| self.occupancy.owner_of(*key).is_some()) {
            return Err(PlacementError::Occupied);
        }
        Ok(())
    }

    /// Commits a lifted item onto a validated target footprint.
    pub(crate) fn commit_move(
        &mut self,
        item: ItemId,
        target: Footprint,
    ) -> Option<(Footprint, Footprint)> {
        let placed = self.items.get_mut(item)?;
        let from = placed.footprint;
        placed.footprint = target;
        self.occupancy.occupy(&target.keys(), item);
        Some((from, target))
    }

    /// Re-occupies a lifted item's origin footprint.
    ///
    /// The registry keeps the origin while the item is lifted, so rollback is
    /// always possible and the item is never left unplaced.
    pub(crate) fn restore(&mut self, item: ItemId) -> Option<Footprint> {
        let footprint = self.items.get(item)?.footprint;
        self.occupancy.occupy(&footprint.keys(), item);
        Some(footprint)
    }

    /// Removes an item, vacating its keys and refunding one inventory unit.
    ///
    /// `lifted` items have already vacated their keys, so only the registry
    /// entry and the refund remain.
    pub(crate) fn remove(
        &mut self,
        item: ItemId,
        lifted: bool,
    ) -> Result<RemovedItem, RemovalError> {
        if self.items.get(item).is_none() {
            return Err(RemovalError::MissingItem);
        }
        self.destroy(item, lifted).ok_or(RemovalError::MissingItem)
    }

    fn destroy(&mut self, item: ItemId, lifted: bool) -> Option<RemovedItem> {
        let placed = self.items.remove(item)?;
        if !lifted {
            self.occupancy.vacate(&placed.footprint.keys());
        }
        self.inventory.release(&placed.kind);
        Some(RemovedItem {
            item: placed.id,
            kind: placed.kind,
            footprint: placed.footprint,
        })
    }

    fn validate_range(&self, keys: &[TileCoord]) -> Result<(), PlacementError> {
        let range = self.lattice.range();
        if keys.iter().any(|key| !range.contains(*key)) {
            return Err(PlacementError::OutOfBounds);
        }
        Ok(())
    }

    fn validate_unrestricted(&self, keys: &[TileCoord]) -> Result<(), PlacementError> {
        if keys.iter().any(|key| self.restricted.contains(*key)) {
            return Err(PlacementError::Restricted);
        }
        Ok(())
    }

    fn is_single_tile(&self, item: ItemId) -> bool {
        self.items
            .get(item)
            .map_or(false, |placed| placed.footprint.is_single())
    }
}
