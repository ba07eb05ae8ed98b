//! Dense per-tile flag storage for the enumerated lattice.

use havenisle_core::{Footprint, LatticeRange, TileCoord};

use crate::restricted::RestrictedSet;

/// Mutable presentation flags carried by a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileFlags {
    /// Whether the tile lies under the hovered footprint.
    pub hovered: bool,
    /// Whether the tile is selected.
    pub selected: bool,
    /// Whether building on the tile is permanently forbidden.
    pub restricted: bool,
}

/// The fixed enumerable set of tiles with their per-tile state.
///
/// Built once per lattice configuration; a tile's coordinates never change
/// after creation. The restricted flag mirrors the [`RestrictedSet`] and is
/// the only state that persists across sessions.
#[derive(Clone, Debug)]
pub struct TileLattice {
    range: LatticeRange,
    tile_width: f32,
    flags: Vec<TileFlags>,
    hovered: Vec<TileCoord>,
}

impl TileLattice {
    /// Builds a lattice over the provided range, resolving restricted flags
    /// from the persisted set.
    pub(crate) fn new(range: LatticeRange, tile_width: f32, restricted: &RestrictedSet) -> Self {
        let mut lattice = Self {
            range,
            tile_width,
            flags: vec![TileFlags::default(); range.tile_count()],
            hovered: Vec::new(),
        };
        lattice.apply_restrictions(restricted);
        lattice
    }

    /// Enumerated range covered by the lattice.
    #[must_use]
    pub const fn range(&self) -> LatticeRange {
        self.range
    }

    /// Width of a single diamond tile measured in world units.
    #[must_use]
    pub const fn tile_width(&self) -> f32 {
        self.tile_width
    }

    /// Retrieves the flags of the provided tile, or `None` when the tile lies
    /// outside the enumerated range.
    #[must_use]
    pub fn flags(&self, tile: TileCoord) -> Option<TileFlags> {
        self.index(tile).and_then(|index| self.flags.get(index).copied())
    }

    /// Tiles currently covered by the hovered footprint.
    #[must_use]
    pub fn hovered(&self) -> &[TileCoord] {
        &self.hovered
    }

    /// Re-resolves every restricted flag from the provided set.
    pub(crate) fn apply_restrictions(&mut self, restricted: &RestrictedSet) {
        for (index, tile) in self.range.iter().enumerate() {
            if let Some(flags) = self.flags.get_mut(index) {
                flags.restricted = restricted.contains(tile);
            }
        }
    }

    /// Sets the restricted flag of a single tile.
    pub(crate) fn set_restricted(&mut self, tile: TileCoord, restricted: bool) {
        if let Some(index) = self.index(tile) {
            if let Some(flags) = self.flags.get_mut(index) {
                flags.restricted = restricted;
            }
        }
    }

    /// Replaces the hovered footprint, returning whether anything changed.
    ///
    /// Restricted tiles only report hover while restriction editing is
    /// active; outside edit mode the pointer passes over them without
    /// feedback.
    pub(crate) fn set_hovered(&mut self, footprint: Option<Footprint>, edit_mode: bool) -> bool {
        let next: Vec<TileCoord> = footprint
            .map(|footprint| {
                footprint
                    .keys()
                    .into_iter()
                    .filter(|tile| match self.flags(*tile) {
                        Some(flags) => edit_mode || !flags.restricted,
                        None => false,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if next == self.hovered {
            return false;
        }

        let previous = std::mem::replace(&mut self.hovered, next);
        for tile in previous {
            self.set_flag(tile, |flags| flags.hovered = false);
        }
        let current = self.hovered.clone();
        for tile in current {
            self.set_flag(tile, |flags| flags.hovered = true);
        }
        true
    }

    /// Toggles the selected flag of a tile, returning the new state.
    ///
    /// Selection is permitted only on non-restricted tiles outside
    /// restriction edit mode; disallowed toggles return `None` and leave the
    /// lattice untouched.
    pub(crate) fn toggle_selected(&mut self, tile: TileCoord, edit_mode: bool) -> Option<bool> {
        if edit_mode {
            return None;
        }
        let index = self.index(tile)?;
        let flags = self.flags.get_mut(index)?;
        if flags.restricted {
            return None;
        }
        flags.selected = !flags.selected;
        Some(flags.selected)
    }

    fn set_flag<F>(&mut self, tile: TileCoord, mutate: F)
    where
        F: FnOnce(&mut TileFlags),
    {
        if let Some(index) = self.index(tile) {
            if let Some(flags) = self.flags.get_mut(index) {
                mutate(flags);
            }
        }
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
