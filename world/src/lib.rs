#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Havenisle.
//!
//! The world owns the placement context (tile lattice, restricted set,
//! occupancy ledger, and inventory) plus the placed-item registry, the item
//! catalog, and the coin balance. All mutation flows through [`apply`], which
//! executes one [`Command`] to completion and appends the resulting
//! [`Event`]s; there is no other mutation path and no suspension point, so
//! occupancy and inventory are never observed mid-update.

mod inventory;
mod items;
mod lattice;
mod occupancy;
mod placement;
mod restricted;

pub use lattice::{TileFlags, TileLattice};
pub use restricted::RestrictedSet;

use havenisle_core::{
    Command, Event, Footprint, ItemCatalog, ItemId, ItemRequestError, LatticeRange, PurchaseError,
    RestrictionError, WELCOME_BANNER,
};
use log::debug;

use crate::{
    inventory::Inventory, items::ItemRegistry, occupancy::OccupancyMap,
    placement::PlacementEngine,
};

const DEFAULT_HALF_EXTENT: u32 = 50;
const DEFAULT_TILE_WIDTH: f32 = 64.0;
const STARTING_COINS: u32 = 0;

/// Represents the authoritative Havenisle world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    lattice: TileLattice,
    restricted: RestrictedSet,
    occupancy: OccupancyMap,
    inventory: Inventory,
    items: ItemRegistry,
    catalog: ItemCatalog,
    coins: u32,
    restriction_mode: bool,
    lifted: Option<ItemId>,
}

impl World {
    /// Creates a new world with an empty item catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(ItemCatalog::default())
    }

    /// Creates a new world configured with the provided item catalog.
    ///
    /// The inventory is seeded from the catalog's initial counts.
    #[must_use]
    pub fn with_catalog(catalog: ItemCatalog) -> Self {
        let range = LatticeRange::new(DEFAULT_HALF_EXTENT);
        let restricted = RestrictedSet::default();
        Self {
            banner: WELCOME_BANNER,
            lattice: TileLattice::new(range, DEFAULT_TILE_WIDTH, &restricted),
            occupancy: OccupancyMap::new(range),
            inventory: Inventory::from_catalog(&catalog),
            items: ItemRegistry::new(),
            restricted,
            catalog,
            coins: STARTING_COINS,
            restriction_mode: false,
            lifted: None,
        }
    }

    fn engine(&mut self) -> PlacementEngine<'_> {
        PlacementEngine {
            lattice: &self.lattice,
            restricted: &self.restricted,
            occupancy: &mut self.occupancy,
            inventory: &mut self.inventory,
            items: &mut self.items,
        }
    }

    fn lift_protocol_error(&self, item: ItemId) -> ItemRequestError {
        if self.items.get(item).is_none() {
            ItemRequestError::MissingItem
        } else {
            ItemRequestError::NotLifted
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLattice {
            half_extent,
            tile_width,
        } => {
            let range = LatticeRange::new(half_extent);
            world.lattice = TileLattice::new(range, tile_width, &world.restricted);
            world.occupancy = OccupancyMap::new(range);
            world.items = ItemRegistry::new();
            world.inventory = Inventory::from_catalog(&world.catalog);
            world.coins = STARTING_COINS;
            world.lifted = None;
            out_events.push(Event::LatticeConfigured {
                half_extent,
                tile_width,
            });
        }
        Command::SetRestrictionMode { enabled } => {
            if world.restriction_mode != enabled {
                world.restriction_mode = enabled;
                out_events.push(Event::RestrictionModeChanged { enabled });
            }
        }
        Command::ToggleRestriction { tile } => {
            if !world.restriction_mode {
                out_events.push(Event::RestrictionRejected {
                    tile,
                    reason: RestrictionError::EditModeDisabled,
                });
            } else if !world.lattice.range().contains(tile) {
                out_events.push(Event::RestrictionRejected {
                    tile,
                    reason: RestrictionError::OutOfBounds,
                });
            } else if world.restricted.remove(tile) {
                world.lattice.set_restricted(tile, false);
                out_events.push(Event::TileUnrestricted { tile });
            } else {
                let _ = world.restricted.insert(tile);
                world.lattice.set_restricted(tile, true);
                out_events.push(Event::TileRestricted { tile });
            }
        }
        Command::LoadRestrictions { tiles } => {
            world.restricted = RestrictedSet::from_tiles(tiles);
            world.lattice.apply_restrictions(&world.restricted);
            debug!("loaded {} restricted tiles", world.restricted.len());
            out_events.push(Event::RestrictionsLoaded {
                count: world.restricted.len(),
            });
        }
        Command::HoverFootprint { footprint } => {
            if world.lattice.set_hovered(footprint, world.restriction_mode) {
                out_events.push(Event::HoverChanged { footprint });
            }
        }
        Command::ToggleSelection { tile } => {
            if let Some(selected) = world.lattice.toggle_selected(tile, world.restriction_mode) {
                out_events.push(Event::SelectionChanged { tile, selected });
            }
        }
        Command::PlaceItem { kind, anchor } => {
            let span = world.catalog.spec_for(&kind).tile_span;
            let outcome = world.engine().place(&kind, anchor, span);
            match outcome {
                Ok(placed) => {
                    let replaced_id = placed.replaced.as_ref().map(|removed| removed.item);
                    if let Some(removed) = placed.replaced {
                        out_events.push(Event::ItemRemoved {
                            item: removed.item,
                            kind: removed.kind,
                            footprint: removed.footprint,
                        });
                    }
                    debug!("placed {kind} at {anchor}");
                    out_events.push(Event::ItemPlaced {
                        item: placed.item,
                        kind,
                        footprint: placed.footprint,
                        replaced: replaced_id,
                    });
                }
                Err(reason) => {
                    debug!("rejected placement of {kind} at {anchor}: {reason:?}");
                    out_events.push(Event::PlacementRejected {
                        kind,
                        anchor,
                        reason,
                    });
                }
            }
        }
        Command::LiftItem { item } => {
            match (world.items.get(item).map(|placed| placed.footprint), world.lifted) {
                (None, _) => out_events.push(Event::ItemRequestRejected {
                    item,
                    reason: ItemRequestError::MissingItem,
                }),
                (Some(_), Some(_)) => out_events.push(Event::ItemRequestRejected {
                    item,
                    reason: ItemRequestError::AlreadyLifted,
                }),
                (Some(footprint), None) => {
                    world.occupancy.vacate(&footprint.keys());
                    world.lifted = Some(item);
                    out_events.push(Event::ItemLifted { item, footprint });
                }
            }
        }
        Command::SettleItem { item, anchor } => match world.lifted {
            Some(active) if active == item => {
                let span = world
                    .items
                    .get(item)
                    .map_or(1, |placed| placed.footprint.span());
                let target = Footprint::new(anchor, span);
                let verdict = world.engine().validate_target(target);
                match verdict {
                    Ok(()) => {
                        if let Some((from, to)) = world.engine().commit_move(item, target) {
                            world.lifted = None;
                            debug!("moved item {} to {anchor}", item.get());
                            out_events.push(Event::ItemMoved { item, from, to });
                        }
                    }
                    Err(reason) => {
                        if let Some(footprint) = world.engine().restore(item) {
                            world.lifted = None;
                            debug!("rejected move of item {} to {anchor}: {reason:?}", item.get());
                            out_events.push(Event::MoveRejected {
                                item,
                                anchor,
                                reason,
                            });
                            out_events.push(Event::ItemReturned { item, footprint });
                        }
                    }
                }
            }
            _ => out_events.push(Event::ItemRequestRejected {
                item,
                reason: world.lift_protocol_error(item),
            }),
        },
        Command::ReturnItem { item } => match world.lifted {
            Some(active) if active == item => {
                if let Some(footprint) = world.engine().restore(item) {
                    world.lifted = None;
                    out_events.push(Event::ItemReturned { item, footprint });
                }
            }
            _ => out_events.push(Event::ItemRequestRejected {
                item,
                reason: world.lift_protocol_error(item),
            }),
        },
        Command::RemoveItem { item } => {
            let was_lifted = world.lifted == Some(item);
            let removed = world.engine().remove(item, was_lifted);
            match removed {
                Ok(removed) => {
                    if was_lifted {
                        world.lifted = None;
                    }
                    debug!("removed {} item {}", removed.kind, removed.item.get());
                    out_events.push(Event::ItemRemoved {
                        item: removed.item,
                        kind: removed.kind,
                        footprint: removed.footprint,
                    });
                }
                Err(reason) => out_events.push(Event::RemovalRejected { item, reason }),
            }
        }
        Command::FlipItem { item } => match world.items.get_mut(item) {
            Some(placed) => {
                placed.flipped = !placed.flipped;
                let flipped = placed.flipped;
                out_events.push(Event::ItemFlipped { item, flipped });
            }
            None => out_events.push(Event::ItemRequestRejected {
                item,
                reason: ItemRequestError::MissingItem,
            }),
        },
        Command::PurchaseItem { kind } => {
            match world.catalog.entry(&kind).map(|spec| spec.price) {
                None => out_events.push(Event::PurchaseRejected {
                    kind,
                    reason: PurchaseError::UnknownKind,
                }),
                Some(price) if world.coins < price => out_events.push(Event::PurchaseRejected {
                    kind,
                    reason: PurchaseError::InsufficientCoins,
                }),
                Some(price) => {
                    world.coins -= price;
                    world.inventory.release(&kind);
                    debug!("purchased {kind} for {price} coins");
                    out_events.push(Event::ItemPurchased {
                        kind,
                        price,
                        coins: world.coins,
                    });
                }
            }
        }
        Command::GrantCoins { amount } => {
            world.coins = world.coins.saturating_add(amount);
            out_events.push(Event::CoinsGranted {
                amount,
                coins: world.coins,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use havenisle_core::{Footprint, ItemId, ItemKind, TileCoord};

    use super::{OccupancyMap, RestrictedSet, TileLattice, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the tile lattice.
    #[must_use]
    pub fn lattice(world: &World) -> &TileLattice {
        &world.lattice
    }

    /// Provides read-only access to the restricted tile set.
    #[must_use]
    pub fn restricted(world: &World) -> &RestrictedSet {
        &world.restricted
    }

    /// Reports whether restriction edit mode is active.
    #[must_use]
    pub fn restriction_mode(world: &World) -> bool {
        world.restriction_mode
    }

    /// Current coin balance.
    #[must_use]
    pub fn coins(world: &World) -> u32 {
        world.coins
    }

    /// Inventory units remaining for the provided kind.
    #[must_use]
    pub fn remaining(world: &World, kind: &ItemKind) -> u32 {
        world.inventory.remaining(kind)
    }

    /// Identifier of the item currently lifted for a move, if any.
    #[must_use]
    pub fn lifted_item(world: &World) -> Option<ItemId> {
        world.lifted
    }

    /// Returns the item occupying the provided tile, if any.
    ///
    /// A lifted item vacates its keys for the duration of the drag, so its
    /// origin tiles read as free here.
    #[must_use]
    pub fn item_at(world: &World, tile: TileCoord) -> Option<ItemId> {
        world.occupancy.owner_of(tile)
    }

    /// Exposes a read-only view of the dense occupancy ledger.
    #[must_use]
    pub fn occupancy_view(world: &World) -> OccupancyView<'_> {
        OccupancyView {
            grid: &world.occupancy,
        }
    }

    /// Captures a read-only view of the placed items.
    #[must_use]
    pub fn item_view(world: &World) -> ItemView {
        let mut snapshots = Vec::with_capacity(world.items.len());
        for placed in world.items.iter() {
            snapshots.push(ItemSnapshot {
                id: placed.id,
                kind: placed.kind.clone(),
                footprint: placed.footprint,
                flipped: placed.flipped,
                lifted: world.lifted == Some(placed.id),
            });
        }
        snapshots.sort_by_key(|snapshot| snapshot.id);
        ItemView { snapshots }
    }

    /// Total population contributed by the placed items.
    #[must_use]
    pub fn population(world: &World) -> u32 {
        world.items.iter().fold(0u32, |total, placed| {
            total.saturating_add(world.catalog.spec_for(&placed.kind).population)
        })
    }

    /// Audits the bidirectional occupancy invariant.
    ///
    /// Every occupied cell must map to a registered item whose footprint
    /// covers it, every settled item's keys must map back to that item, and a
    /// lifted item must own no cells. A `false` here signals a programming
    /// defect, never a normal gameplay condition; it is meant for tests and
    /// assertions, not user-facing error handling.
    #[must_use]
    pub fn occupancy_consistent(world: &World) -> bool {
        for (tile, owner) in world.occupancy.iter_owners() {
            let valid = world
                .items
                .get(owner)
                .map_or(false, |placed| placed.footprint.contains(tile))
                && world.lifted != Some(owner);
            if !valid {
                return false;
            }
        }

        for placed in world.items.iter() {
            let lifted = world.lifted == Some(placed.id);
            for key in placed.footprint.keys() {
                let owner = world.occupancy.owner_of(key);
                if lifted {
                    if owner == Some(placed.id) {
                        return false;
                    }
                } else if owner != Some(placed.id) {
                    return false;
                }
            }
        }

        true
    }

    /// Read-only view into the dense occupancy ledger.
    #[derive(Clone, Copy, Debug)]
    pub struct OccupancyView<'a> {
        grid: &'a OccupancyMap,
    }

    impl OccupancyView<'_> {
        /// Returns the item occupying the provided tile, if any.
        #[must_use]
        pub fn occupant(&self, tile: TileCoord) -> Option<ItemId> {
            self.grid.owner_of(tile)
        }

        /// Reports whether the tile is currently free for placement.
        #[must_use]
        pub fn is_free(&self, tile: TileCoord) -> bool {
            self.grid.is_free(tile)
        }

        /// Enumerated range covered by the ledger.
        #[must_use]
        pub fn range(&self) -> havenisle_core::LatticeRange {
            self.grid.range()
        }
    }

    /// Read-only snapshot describing all placed items.
    #[derive(Clone, Debug, Default)]
    pub struct ItemView {
        snapshots: Vec<ItemSnapshot>,
    }

    impl ItemView {
        /// Iterator over the captured item snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &ItemSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<ItemSnapshot> {
            self.snapshots
        }

        /// Number of captured snapshots.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no items are placed.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable representation of a single placed item's state.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ItemSnapshot {
        /// Identifier allocated to the item by the world.
        pub id: ItemId,
        /// Kind the item was placed as.
        pub kind: ItemKind,
        /// Footprint the item occupies (its origin while lifted).
        pub footprint: Footprint,
        /// Whether the item's presentation is horizontally mirrored.
        pub flipped: bool,
        /// Whether the item is currently lifted for a move.
        pub lifted: bool,
    }
}
