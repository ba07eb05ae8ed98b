//! Persisted set of tiles excluded from placement.

use std::collections::BTreeSet;

use havenisle_core::{ParseTileKeyError, TileCoord};

/// The set of tile keys on which building is permanently forbidden.
///
/// Mutated only through restriction edit mode; persisted as a flat list of
/// `"<row>,<col>"` keys. The set owns only its in-memory contents and the
/// (de)serialization contract. Reading and writing the external store is an
/// adapter concern, as is the fail-open fallback to an empty set when that
/// store is missing or malformed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestrictedSet {
    keys: BTreeSet<TileCoord>,
}

impl RestrictedSet {
    /// Builds a set from the provided tiles, discarding duplicates.
    #[must_use]
    pub fn from_tiles<I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = TileCoord>,
    {
        Self {
            keys: tiles.into_iter().collect(),
        }
    }

    /// Reports whether the provided tile is restricted.
    #[must_use]
    pub fn contains(&self, tile: TileCoord) -> bool {
        self.keys.contains(&tile)
    }

    /// Adds a tile to the set, returning whether it was newly inserted.
    pub(crate) fn insert(&mut self, tile: TileCoord) -> bool {
        self.keys.insert(tile)
    }

    /// Removes a tile from the set, returning whether it was present.
    pub(crate) fn remove(&mut self, tile: TileCoord) -> bool {
        self.keys.remove(&tile)
    }

    /// Number of restricted tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Reports whether no tiles are restricted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates the restricted tiles in key order.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.keys.iter().copied()
    }

    /// Serializes the set into the persisted key format.
    ///
    /// Keys are emitted in sorted order for deterministic output; only
    /// membership is significant on the way back in.
    #[must_use]
    pub fn serialize(&self) -> Vec<String> {
        self.keys.iter().map(TileCoord::to_string).collect()
    }

    /// Rebuilds a set from persisted keys.
    ///
    /// Any malformed key fails the whole load so the caller can apply its
    /// fail-open policy; partial loads would silently un-restrict tiles.
    pub fn deserialize<I, S>(keys: I) -> Result<Self, ParseTileKeyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = BTreeSet::new();
        for key in keys {
            let _ = parsed.insert(key.as_ref().parse::<TileCoord>()?);
        }
        Ok(Self { keys: parsed })
    }
}
