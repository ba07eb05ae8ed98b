//! Dense tile-ownership ledger.

use havenisle_core::{ItemId, LatticeRange, TileCoord};

/// Mapping from tile key to the item occupying it.
///
/// The single source of truth for "is this tile free". The map is a plain
/// ledger: `occupy` does not validate; the placement engine is responsible
/// for only committing footprints whose keys are all free.
#[derive(Clone, Debug)]
pub(crate) struct OccupancyMap {
    range: LatticeRange,
    cells: Vec<Option<ItemId>>,
}

impl OccupancyMap {
    pub(crate) fn new(range: LatticeRange) -> Self {
        Self {
            range,
            cells: vec![None; range.tile_count()],
        }
    }

    /// Reports whether no item occupies the provided tile.
    pub(crate) fn is_free(&self, tile: TileCoord) -> bool {
        self.index(tile).map_or(true, |index| {
            self.cells.get(index).copied().unwrap_or(None).is_none()
        })
    }

    /// Returns the item occupying the provided tile, if any.
    pub(crate) fn owner_of(&self, tile: TileCoord) -> Option<ItemId> {
        self.index(tile)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Records the provided item as the owner of every key.
    pub(crate) fn occupy(&mut self, keys: &[TileCoord], item: ItemId) {
        for key in keys {
            if let Some(index) = self.index(*key) {
                if let Some(slot) = self.cells.get_mut(index) {
                    *slot = Some(item);
                }
            }
        }
    }

    /// Clears every provided key; a no-op for keys that are not occupied.
    pub(crate) fn vacate(&mut self, keys: &[TileCoord]) {
        for key in keys {
            if let Some(index) = self.index(*key) {
                if let Some(slot) = self.cells.get_mut(index) {
                    *slot = None;
                }
            }
        }
    }

    /// Iterates the occupied cells in row-major order.
    pub(crate) fn iter_owners(&self) -> impl Iterator<Item = (TileCoord, ItemId)> + '_ {
        self.range
            .iter()
            .zip(self.cells.iter().copied())
            .filter_map(|(tile, owner)| owner.map(|item| (tile, item)))
    }

    pub(crate) const fn range(&self) -> LatticeRange {
        self.range
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        if !self.range.contains(tile) {
            return None;
        }
        let bound = i64::from(self.range.half_extent());
        let side = bound * 2;
        let row = i64::from(tile.row()) + bound;
        let column = i64::from(tile.column()) + bound;
        usize::try_from(row * side + column).ok()
    }
}
