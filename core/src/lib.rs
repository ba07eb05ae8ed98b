#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Havenisle engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use std::{collections::BTreeMap, error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Havenisle.";

/// Location of a single lattice tile expressed as signed row and column
/// indices.
///
/// The lattice is enumerated over a symmetric range centred on the origin, so
/// both axes are signed. The textual form `"<row>,<col>"` is the persisted
/// tile-key format shared with the restricted-tile store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    row: i32,
    column: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Row index of the tile.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Column index of the tile.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Returns the tile offset from this one by the provided row and column
    /// deltas, saturating at the numeric bounds.
    #[must_use]
    pub const fn offset(self, row_delta: i32, column_delta: i32) -> Self {
        Self {
            row: self.row.saturating_add(row_delta),
            column: self.column.saturating_add(column_delta),
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

impl FromStr for TileCoord {
    type Err = ParseTileKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (row, column) = value
            .split_once(',')
            .ok_or_else(|| ParseTileKeyError::new(value))?;
        let row = row
            .parse::<i32>()
            .map_err(|_| ParseTileKeyError::new(value))?;
        let column = column
            .parse::<i32>()
            .map_err(|_| ParseTileKeyError::new(value))?;
        Ok(Self { row, column })
    }
}

/// Error produced when a persisted tile key cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTileKeyError {
    key: String,
}

impl ParseTileKeyError {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_owned(),
        }
    }

    /// The offending key text.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ParseTileKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse tile key '{}'", self.key)
    }
}

impl Error for ParseTileKeyError {}

/// The symmetric enumerated range covered by the tile lattice.
///
/// A half-extent of `N` spans `row, column ∈ [-N, N)`, matching the fixed
/// grid area allocated at startup. Enumeration order is row-major over that
/// range; nearest-tile tie-breaking relies on this order being stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticeRange {
    half_extent: u32,
}

impl LatticeRange {
    /// Creates a range with the provided half-extent.
    #[must_use]
    pub const fn new(half_extent: u32) -> Self {
        Self { half_extent }
    }

    /// Half-extent of the range along each axis.
    #[must_use]
    pub const fn half_extent(&self) -> u32 {
        self.half_extent
    }

    /// Reports whether the provided tile lies inside the enumerated range.
    #[must_use]
    pub const fn contains(&self, tile: TileCoord) -> bool {
        let bound = self.half_extent as i32;
        tile.row() >= -bound && tile.row() < bound && tile.column() >= -bound && tile.column() < bound
    }

    /// Number of tiles enumerated by the range.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        let side = u64::from(self.half_extent) * 2;
        usize::try_from(side * side).unwrap_or(usize::MAX)
    }

    /// Iterates every tile in the range in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> {
        let bound = self.half_extent as i32;
        (-bound..bound).flat_map(move |row| (-bound..bound).map(move |column| TileCoord::new(row, column)))
    }
}

/// Square block of tiles occupied by a placed item.
///
/// The anchor is the top-left cell; `keys` enumerates the covered tiles in
/// row-major order, which is the canonical ordering of an item's occupied
/// keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    anchor: TileCoord,
    span: u32,
}

impl Footprint {
    /// Constructs a footprint from an anchor tile and a span.
    ///
    /// A span of zero is treated as one so a footprint always covers at least
    /// its anchor.
    #[must_use]
    pub const fn new(anchor: TileCoord, span: u32) -> Self {
        let span = if span == 0 { 1 } else { span };
        Self { anchor, span }
    }

    /// Constructs a single-tile footprint.
    #[must_use]
    pub const fn single(anchor: TileCoord) -> Self {
        Self { anchor, span: 1 }
    }

    /// Top-left cell that anchors the footprint.
    #[must_use]
    pub const fn anchor(&self) -> TileCoord {
        self.anchor
    }

    /// Side length of the footprint measured in tiles.
    #[must_use]
    pub const fn span(&self) -> u32 {
        self.span
    }

    /// Number of tiles covered by the footprint.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.span as usize) * (self.span as usize)
    }

    /// Reports whether the footprint covers a single tile.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.span == 1
    }

    /// Reports whether the provided tile lies inside the footprint.
    #[must_use]
    pub fn contains(&self, tile: TileCoord) -> bool {
        let span = i64::from(self.span);
        let row = i64::from(tile.row()) - i64::from(self.anchor.row());
        let column = i64::from(tile.column()) - i64::from(self.anchor.column());
        (0..span).contains(&row) && (0..span).contains(&column)
    }

    /// Enumerates the covered tile keys in row-major order.
    #[must_use]
    pub fn keys(&self) -> Vec<TileCoord> {
        let mut keys = Vec::with_capacity(self.cell_count());
        for row_delta in 0..self.span {
            for column_delta in 0..self.span {
                keys.push(self.anchor.offset(row_delta as i32, column_delta as i32));
            }
        }
        keys
    }
}

/// Unique identifier assigned to a placed item by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Item-type key naming a buildable piece (`"hut"`, `"shrine"`, ...).
///
/// Kinds are opaque to the engine; their footprint span, presentation
/// offsets, and economy values come from the [`ItemCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKind(String);

impl ItemKind {
    /// Creates an item kind from the provided name.
    #[must_use]
    pub fn new<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        Self(name.into())
    }

    /// Name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-kind configuration consumed by placement, inventory, and presentation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Side length of the item's square footprint measured in tiles.
    pub tile_span: u32,
    /// Vertical offset applied to the item's render anchor in world units.
    pub vertical_offset: f32,
    /// Scale factor applied when presenting the item's sprite.
    pub render_scale: f32,
    /// Number of units seeded into the inventory at startup.
    pub initial_count: u32,
    /// Purchase price of one unit expressed in coins.
    pub price: u32,
    /// Population contributed by each placed instance.
    pub population: u32,
}

impl ItemSpec {
    /// Fallback used for kinds absent from the catalog: a single-tile item
    /// with neutral presentation and no economy values.
    pub const FALLBACK: Self = Self {
        tile_span: 1,
        vertical_offset: 0.0,
        render_scale: 1.0,
        initial_count: 0,
        price: 0,
        population: 0,
    };
}

/// Validated mapping from item kind to its configuration.
///
/// Lookups through [`spec_for`](Self::spec_for) never fail: unknown kinds
/// resolve to [`ItemSpec::FALLBACK`] as an explicit branch rather than an
/// implicit absent-entry access. Spans are clamped to at least one tile when
/// the catalog is built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemCatalog {
    entries: BTreeMap<ItemKind, ItemSpec>,
}

impl ItemCatalog {
    /// Builds a catalog from the provided entries, clamping each span to a
    /// minimum of one tile.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ItemKind, ItemSpec)>,
    {
        let entries = entries
            .into_iter()
            .map(|(kind, mut spec)| {
                spec.tile_span = spec.tile_span.max(1);
                (kind, spec)
            })
            .collect();
        Self { entries }
    }

    /// Resolves the configuration for the provided kind, falling back to
    /// [`ItemSpec::FALLBACK`] when the kind is not catalogued.
    #[must_use]
    pub fn spec_for(&self, kind: &ItemKind) -> &ItemSpec {
        self.entries.get(kind).unwrap_or(&ItemSpec::FALLBACK)
    }

    /// Retrieves the configuration for a catalogued kind, if present.
    ///
    /// Economy operations use this accessor so that uncatalogued kinds are
    /// rejected instead of silently priced by the fallback.
    #[must_use]
    pub fn entry(&self, kind: &ItemKind) -> Option<&ItemSpec> {
        self.entries.get(kind)
    }

    /// Iterates the catalogued kinds and their configurations in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemKind, &ItemSpec)> {
        self.entries.iter()
    }

    /// Number of catalogued kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the world's tile lattice using the provided dimensions.
    ConfigureLattice {
        /// Half-extent of the enumerated range along each axis.
        half_extent: u32,
        /// Width of a single diamond tile measured in world units.
        tile_width: f32,
    },
    /// Enables or disables the restriction edit mode.
    SetRestrictionMode {
        /// Whether restriction editing should be active.
        enabled: bool,
    },
    /// Toggles the restricted flag of a tile while in restriction edit mode.
    ToggleRestriction {
        /// Tile whose restriction should be toggled.
        tile: TileCoord,
    },
    /// Replaces the restricted set with the provided tiles.
    LoadRestrictions {
        /// Tiles that should be restricted after loading.
        tiles: Vec<TileCoord>,
    },
    /// Updates the hovered footprint, clearing it when `None`.
    HoverFootprint {
        /// Footprint currently under the pointer, if any.
        footprint: Option<Footprint>,
    },
    /// Toggles the selected flag of a non-restricted tile.
    ToggleSelection {
        /// Tile whose selection should be toggled.
        tile: TileCoord,
    },
    /// Requests placement of a new item anchored at the provided tile.
    PlaceItem {
        /// Kind of item to place.
        kind: ItemKind,
        /// Top-left tile of the requested footprint.
        anchor: TileCoord,
    },
    /// Lifts an existing item off the lattice at the start of a move drag.
    LiftItem {
        /// Identifier of the item being lifted.
        item: ItemId,
    },
    /// Settles a lifted item onto a new anchor, rolling back on failure.
    SettleItem {
        /// Identifier of the lifted item.
        item: ItemId,
        /// Top-left tile of the requested destination footprint.
        anchor: TileCoord,
    },
    /// Returns a lifted item to its origin footprint without a target.
    ReturnItem {
        /// Identifier of the lifted item.
        item: ItemId,
    },
    /// Requests removal of an existing item from the world.
    RemoveItem {
        /// Identifier of the item targeted for removal.
        item: ItemId,
    },
    /// Toggles the horizontal mirror of an item's presentation.
    FlipItem {
        /// Identifier of the item to flip.
        item: ItemId,
    },
    /// Purchases one unit of a catalogued kind into the inventory.
    PurchaseItem {
        /// Kind of item to purchase.
        kind: ItemKind,
    },
    /// Credits the coin balance.
    GrantCoins {
        /// Number of coins to add.
        amount: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the tile lattice was rebuilt.
    LatticeConfigured {
        /// Half-extent of the enumerated range along each axis.
        half_extent: u32,
        /// Width of a single diamond tile measured in world units.
        tile_width: f32,
    },
    /// Announces that restriction edit mode was toggled.
    RestrictionModeChanged {
        /// Whether restriction editing is now active.
        enabled: bool,
    },
    /// Confirms that a tile was added to the restricted set.
    TileRestricted {
        /// Tile that became restricted.
        tile: TileCoord,
    },
    /// Confirms that a tile was removed from the restricted set.
    TileUnrestricted {
        /// Tile that is no longer restricted.
        tile: TileCoord,
    },
    /// Reports that a restriction toggle was rejected.
    RestrictionRejected {
        /// Tile provided in the toggle request.
        tile: TileCoord,
        /// Specific reason the toggle failed.
        reason: RestrictionError,
    },
    /// Confirms that the restricted set was replaced from persisted data.
    RestrictionsLoaded {
        /// Number of restricted tiles after loading.
        count: usize,
    },
    /// Announces that the hovered footprint changed.
    HoverChanged {
        /// Footprint currently hovered, if any.
        footprint: Option<Footprint>,
    },
    /// Confirms that a tile's selected flag was toggled.
    SelectionChanged {
        /// Tile whose selection changed.
        tile: TileCoord,
        /// Whether the tile is now selected.
        selected: bool,
    },
    /// Confirms that an item was placed into the world.
    ItemPlaced {
        /// Identifier assigned to the item by the world.
        item: ItemId,
        /// Kind of item that was placed.
        kind: ItemKind,
        /// Footprint occupied by the item.
        footprint: Footprint,
        /// Single-tile occupant that was replaced by this placement, if any.
        replaced: Option<ItemId>,
    },
    /// Confirms that an item was lifted off the lattice for a move.
    ItemLifted {
        /// Identifier of the lifted item.
        item: ItemId,
        /// Origin footprint vacated by the lift.
        footprint: Footprint,
    },
    /// Confirms that a lifted item settled onto a new footprint.
    ItemMoved {
        /// Identifier of the moved item.
        item: ItemId,
        /// Footprint occupied before the move.
        from: Footprint,
        /// Footprint occupied after the move.
        to: Footprint,
    },
    /// Confirms that a lifted item was returned to its origin footprint.
    ItemReturned {
        /// Identifier of the returned item.
        item: ItemId,
        /// Footprint the item re-occupies.
        footprint: Footprint,
    },
    /// Confirms that an item was removed from the world.
    ItemRemoved {
        /// Identifier of the removed item.
        item: ItemId,
        /// Kind of the removed item.
        kind: ItemKind,
        /// Footprint previously occupied by the item.
        footprint: Footprint,
    },
    /// Confirms that an item's horizontal mirror was toggled.
    ItemFlipped {
        /// Identifier of the flipped item.
        item: ItemId,
        /// Whether the item is now mirrored.
        flipped: bool,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Kind of item requested for placement.
        kind: ItemKind,
        /// Anchor tile provided in the placement request.
        anchor: TileCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a settle request was rejected and the item rolled back.
    MoveRejected {
        /// Identifier of the item that failed to move.
        item: ItemId,
        /// Anchor tile provided in the settle request.
        anchor: TileCoord,
        /// Specific reason the move failed.
        reason: PlacementError,
    },
    /// Reports that a removal request was rejected.
    RemovalRejected {
        /// Identifier of the item targeted for removal.
        item: ItemId,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Reports that a lift/settle/return/flip request was malformed.
    ItemRequestRejected {
        /// Identifier provided in the request.
        item: ItemId,
        /// Specific reason the request was rejected.
        reason: ItemRequestError,
    },
    /// Confirms that one unit of a kind was purchased into the inventory.
    ItemPurchased {
        /// Kind that was purchased.
        kind: ItemKind,
        /// Price paid in coins.
        price: u32,
        /// Coin balance after the purchase.
        coins: u32,
    },
    /// Reports that a purchase request was rejected.
    PurchaseRejected {
        /// Kind requested for purchase.
        kind: ItemKind,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Confirms that the coin balance was credited.
    CoinsGranted {
        /// Number of coins added.
        amount: u32,
        /// Coin balance after the credit.
        coins: u32,
    },
}

/// Reasons a placement or settle request may be rejected by the world.
///
/// All four conditions are expected, recoverable outcomes reported through
/// events; none of them aborts the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested footprint extends beyond the enumerated lattice range.
    OutOfBounds,
    /// The requested footprint covers a restricted tile.
    Restricted,
    /// The requested footprint overlaps an incompatible occupant.
    Occupied,
    /// No inventory units remain for the requested kind.
    InventoryExhausted,
}

/// Reasons a removal request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalError {
    /// No item with the provided identifier exists.
    MissingItem,
}

/// Reasons a lift/settle/return/flip request may be rejected.
///
/// These indicate protocol misuse by the caller rather than a gameplay
/// rejection; a correctly driven drag session never produces them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemRequestError {
    /// No item with the provided identifier exists.
    MissingItem,
    /// Another item is already lifted; one drag session at a time.
    AlreadyLifted,
    /// The item is not currently lifted.
    NotLifted,
}

/// Reasons a restriction toggle may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestrictionError {
    /// Restriction edit mode is not active.
    EditModeDisabled,
    /// The provided tile lies outside the enumerated lattice range.
    OutOfBounds,
}

/// Reasons a purchase request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseError {
    /// The requested kind is not present in the catalog.
    UnknownKind,
    /// The coin balance does not cover the kind's price.
    InsufficientCoins,
}

#[cfg(test)]
mod tests {
    use super::{
        Footprint, ItemCatalog, ItemId, ItemKind, ItemSpec, LatticeRange, PlacementError,
        PurchaseError, RemovalError, TileCoord,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tile_key_text_round_trips() {
        let tile = TileCoord::new(-18, 6);
        let key = tile.to_string();
        assert_eq!(key, "-18,6");
        assert_eq!(key.parse::<TileCoord>().expect("parse"), tile);
    }

    #[test]
    fn tile_key_rejects_malformed_text() {
        assert!("".parse::<TileCoord>().is_err());
        assert!("3".parse::<TileCoord>().is_err());
        assert!("a,b".parse::<TileCoord>().is_err());
        assert!("1, 2".parse::<TileCoord>().is_err());
    }

    #[test]
    fn lattice_range_bounds_are_half_open() {
        let range = LatticeRange::new(2);
        assert!(range.contains(TileCoord::new(-2, -2)));
        assert!(range.contains(TileCoord::new(1, 1)));
        assert!(!range.contains(TileCoord::new(2, 0)));
        assert!(!range.contains(TileCoord::new(0, 2)));
        assert!(!range.contains(TileCoord::new(-3, 0)));
    }

    #[test]
    fn lattice_range_iterates_row_major() {
        let range = LatticeRange::new(1);
        let tiles: Vec<TileCoord> = range.iter().collect();
        assert_eq!(
            tiles,
            vec![
                TileCoord::new(-1, -1),
                TileCoord::new(-1, 0),
                TileCoord::new(0, -1),
                TileCoord::new(0, 0),
            ]
        );
        assert_eq!(range.tile_count(), tiles.len());
    }

    #[test]
    fn footprint_keys_enumerate_row_major() {
        let footprint = Footprint::new(TileCoord::new(0, 0), 2);
        assert_eq!(
            footprint.keys(),
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(0, 1),
                TileCoord::new(1, 0),
                TileCoord::new(1, 1),
            ]
        );
        assert_eq!(footprint.cell_count(), 4);
    }

    #[test]
    fn footprint_contains_matches_keys() {
        let footprint = Footprint::new(TileCoord::new(-1, -1), 3);
        for key in footprint.keys() {
            assert!(footprint.contains(key));
        }
        assert!(!footprint.contains(TileCoord::new(2, 0)));
        assert!(!footprint.contains(TileCoord::new(-2, -1)));
    }

    #[test]
    fn zero_span_footprint_covers_its_anchor() {
        let footprint = Footprint::new(TileCoord::new(3, 3), 0);
        assert_eq!(footprint.span(), 1);
        assert_eq!(footprint.keys(), vec![TileCoord::new(3, 3)]);
    }

    #[test]
    fn catalog_falls_back_for_unknown_kinds() {
        let catalog = ItemCatalog::default();
        let spec = catalog.spec_for(&ItemKind::new("obelisk"));
        assert_eq!(spec.tile_span, 1);
        assert_eq!(spec.vertical_offset, 0.0);
        assert_eq!(spec.render_scale, 1.0);
        assert!(catalog.entry(&ItemKind::new("obelisk")).is_none());
    }

    #[test]
    fn catalog_clamps_zero_spans() {
        let catalog = ItemCatalog::from_entries([(
            ItemKind::new("pebble"),
            ItemSpec {
                tile_span: 0,
                ..ItemSpec::FALLBACK
            },
        )]);
        assert_eq!(catalog.spec_for(&ItemKind::new("pebble")).tile_span, 1);
    }

    #[test]
    fn item_id_round_trips_through_bincode() {
        assert_round_trip(&ItemId::new(42));
    }

    #[test]
    fn item_kind_round_trips_through_bincode() {
        assert_round_trip(&ItemKind::new("shrine"));
    }

    #[test]
    fn footprint_round_trips_through_bincode() {
        assert_round_trip(&Footprint::new(TileCoord::new(-5, 7), 2));
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::Restricted);
    }

    #[test]
    fn removal_error_round_trips_through_bincode() {
        assert_round_trip(&RemovalError::MissingItem);
    }

    #[test]
    fn purchase_error_round_trips_through_bincode() {
        assert_round_trip(&PurchaseError::InsufficientCoins);
    }
}
