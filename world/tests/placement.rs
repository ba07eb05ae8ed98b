use havenisle_core::{
    Command, Event, Footprint, ItemCatalog, ItemId, ItemKind, ItemRequestError, ItemSpec,
    PlacementError, TileCoord,
};
use havenisle_world::{self as world, query, World};

fn kind(name: &str) -> ItemKind {
    ItemKind::new(name)
}

fn spec(tile_span: u32, initial_count: u32) -> ItemSpec {
    ItemSpec {
        tile_span,
        initial_count,
        ..ItemSpec::FALLBACK
    }
}

/// World over a 4x4 lattice (rows/cols -2..1) with a small catalog.
fn small_world() -> World {
    let catalog = ItemCatalog::from_entries([
        (kind("hut"), spec(1, 1)),
        (kind("cabin"), spec(1, 3)),
        (kind("shrine"), spec(2, 2)),
    ]);
    let mut world = World::with_catalog(catalog);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureLattice {
            half_extent: 2,
            tile_width: 64.0,
        },
        &mut events,
    );
    world
}

fn place(world: &mut World, name: &str, row: i32, column: i32) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceItem {
            kind: kind(name),
            anchor: TileCoord::new(row, column),
        },
        &mut events,
    );
    events
}

fn placed_id(events: &[Event]) -> ItemId {
    events
        .iter()
        .find_map(|event| match event {
            Event::ItemPlaced { item, .. } => Some(*item),
            _ => None,
        })
        .expect("expected an ItemPlaced event")
}

#[test]
fn single_tile_placement_consumes_inventory() {
    let mut world = small_world();

    let events = place(&mut world, "hut", 0, 0);
    let item = placed_id(&events);
    assert_eq!(
        events,
        vec![Event::ItemPlaced {
            item,
            kind: kind("hut"),
            footprint: Footprint::single(TileCoord::new(0, 0)),
            replaced: None,
        }]
    );
    assert_eq!(query::remaining(&world, &kind("hut")), 0);
    assert_eq!(query::item_at(&world, TileCoord::new(0, 0)), Some(item));

    let rejected = place(&mut world, "hut", 1, 1);
    assert_eq!(
        rejected,
        vec![Event::PlacementRejected {
            kind: kind("hut"),
            anchor: TileCoord::new(1, 1),
            reason: PlacementError::InventoryExhausted,
        }]
    );
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn multi_tile_footprint_occupies_every_key() {
    let mut world = small_world();

    let events = place(&mut world, "shrine", 0, 0);
    let item = placed_id(&events);

    for key in [
        TileCoord::new(0, 0),
        TileCoord::new(0, 1),
        TileCoord::new(1, 0),
        TileCoord::new(1, 1),
    ] {
        assert_eq!(query::item_at(&world, key), Some(item));
    }

    let rejected = place(&mut world, "cabin", 1, 1);
    assert_eq!(
        rejected,
        vec![Event::PlacementRejected {
            kind: kind("cabin"),
            anchor: TileCoord::new(1, 1),
            reason: PlacementError::Occupied,
        }]
    );
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn restricted_tile_rejects_placement_before_other_checks() {
    let mut world = small_world();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadRestrictions {
            tiles: vec![TileCoord::new(1, 1)],
        },
        &mut events,
    );

    let rejected = place(&mut world, "hut", 1, 1);
    assert_eq!(
        rejected,
        vec![Event::PlacementRejected {
            kind: kind("hut"),
            anchor: TileCoord::new(1, 1),
            reason: PlacementError::Restricted,
        }]
    );
    assert_eq!(query::remaining(&world, &kind("hut")), 1);
}

#[test]
fn partially_off_lattice_footprint_is_rejected_outright() {
    let mut world = small_world();

    // Anchor in range, but the 2x2 block extends past the upper bound.
    let rejected = place(&mut world, "shrine", 1, 1);
    assert_eq!(
        rejected,
        vec![Event::PlacementRejected {
            kind: kind("shrine"),
            anchor: TileCoord::new(1, 1),
            reason: PlacementError::OutOfBounds,
        }]
    );
    assert!(query::item_view(&world).is_empty());
    assert_eq!(query::remaining(&world, &kind("shrine")), 2);
}

#[test]
fn single_tile_replacement_refunds_the_old_item() {
    let mut world = small_world();

    let first = place(&mut world, "hut", 0, 0);
    let old = placed_id(&first);
    assert_eq!(query::remaining(&world, &kind("hut")), 0);

    let events = place(&mut world, "cabin", 0, 0);
    let new = placed_id(&events);
    assert_eq!(
        events,
        vec![
            Event::ItemRemoved {
                item: old,
                kind: kind("hut"),
                footprint: Footprint::single(TileCoord::new(0, 0)),
            },
            Event::ItemPlaced {
                item: new,
                kind: kind("cabin"),
                footprint: Footprint::single(TileCoord::new(0, 0)),
                replaced: Some(old),
            },
        ]
    );

    assert_eq!(query::remaining(&world, &kind("hut")), 1);
    assert_eq!(query::remaining(&world, &kind("cabin")), 2);
    assert_eq!(query::item_at(&world, TileCoord::new(0, 0)), Some(new));
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn multi_tile_occupants_are_never_replaced() {
    let mut world = small_world();

    let events = place(&mut world, "shrine", 0, 0);
    let shrine = placed_id(&events);

    let rejected = place(&mut world, "hut", 1, 1);
    assert_eq!(
        rejected,
        vec![Event::PlacementRejected {
            kind: kind("hut"),
            anchor: TileCoord::new(1, 1),
            reason: PlacementError::Occupied,
        }]
    );
    assert_eq!(query::item_at(&world, TileCoord::new(1, 1)), Some(shrine));
    assert_eq!(query::remaining(&world, &kind("hut")), 1);
}

#[test]
fn lift_vacates_and_settle_relocates() {
    let mut world = small_world();
    let events = place(&mut world, "hut", 0, 0);
    let item = placed_id(&events);

    let mut events = Vec::new();
    world::apply(&mut world, Command::LiftItem { item }, &mut events);
    assert_eq!(
        events,
        vec![Event::ItemLifted {
            item,
            footprint: Footprint::single(TileCoord::new(0, 0)),
        }]
    );
    assert!(query::item_at(&world, TileCoord::new(0, 0)).is_none());
    assert_eq!(query::lifted_item(&world), Some(item));

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SettleItem {
            item,
            anchor: TileCoord::new(-1, -1),
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::ItemMoved {
            item,
            from: Footprint::single(TileCoord::new(0, 0)),
            to: Footprint::single(TileCoord::new(-1, -1)),
        }]
    );
    assert_eq!(query::item_at(&world, TileCoord::new(-1, -1)), Some(item));
    assert_eq!(query::lifted_item(&world), None);
    // Relocation never touches the inventory.
    assert_eq!(query::remaining(&world, &kind("hut")), 0);
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn settling_onto_the_origin_is_a_no_op_move() {
    let mut world = small_world();
    let events = place(&mut world, "shrine", 0, 0);
    let item = placed_id(&events);

    let mut events = Vec::new();
    world::apply(&mut world, Command::LiftItem { item }, &mut events);
    world::apply(
        &mut world,
        Command::SettleItem {
            item,
            anchor: TileCoord::new(0, 0),
        },
        &mut events,
    );

    assert_eq!(
        events.last(),
        Some(&Event::ItemMoved {
            item,
            from: Footprint::new(TileCoord::new(0, 0), 2),
            to: Footprint::new(TileCoord::new(0, 0), 2),
        })
    );
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn rejected_settle_rolls_back_to_the_origin() {
    let mut world = small_world();
    let hut_events = place(&mut world, "hut", -1, -1);
    let hut = placed_id(&hut_events);
    let cabin_events = place(&mut world, "cabin", 0, 0);
    let cabin = placed_id(&cabin_events);

    let mut events = Vec::new();
    world::apply(&mut world, Command::LiftItem { item: cabin }, &mut events);
    events.clear();
    world::apply(
        &mut world,
        Command::SettleItem {
            item: cabin,
            anchor: TileCoord::new(-1, -1),
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![
            Event::MoveRejected {
                item: cabin,
                anchor: TileCoord::new(-1, -1),
                reason: PlacementError::Occupied,
            },
            Event::ItemReturned {
                item: cabin,
                footprint: Footprint::single(TileCoord::new(0, 0)),
            },
        ]
    );
    assert_eq!(query::item_at(&world, TileCoord::new(0, 0)), Some(cabin));
    assert_eq!(query::item_at(&world, TileCoord::new(-1, -1)), Some(hut));
    assert_eq!(query::lifted_item(&world), None);
    // Moves never replace single-tile occupants and never touch inventory.
    assert_eq!(query::remaining(&world, &kind("cabin")), 2);
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn returned_item_reoccupies_its_origin_unchanged() {
    let mut world = small_world();
    let events = place(&mut world, "hut", 0, 0);
    let item = placed_id(&events);
    let hut_remaining = query::remaining(&world, &kind("hut"));

    let mut events = Vec::new();
    world::apply(&mut world, Command::LiftItem { item }, &mut events);
    events.clear();
    world::apply(&mut world, Command::ReturnItem { item }, &mut events);

    assert_eq!(
        events,
        vec![Event::ItemReturned {
            item,
            footprint: Footprint::single(TileCoord::new(0, 0)),
        }]
    );
    assert_eq!(query::item_at(&world, TileCoord::new(0, 0)), Some(item));
    assert_eq!(query::remaining(&world, &kind("hut")), hut_remaining);
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn removal_refunds_inventory() {
    let mut world = small_world();
    let events = place(&mut world, "shrine", 0, 0);
    let item = placed_id(&events);
    assert_eq!(query::remaining(&world, &kind("shrine")), 1);

    let mut events = Vec::new();
    world::apply(&mut world, Command::RemoveItem { item }, &mut events);

    assert_eq!(
        events,
        vec![Event::ItemRemoved {
            item,
            kind: kind("shrine"),
            footprint: Footprint::new(TileCoord::new(0, 0), 2),
        }]
    );
    assert_eq!(query::remaining(&world, &kind("shrine")), 2);
    assert!(query::item_view(&world).is_empty());
    assert!(query::item_at(&world, TileCoord::new(1, 1)).is_none());
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn removing_a_lifted_item_clears_the_session() {
    let mut world = small_world();
    let events = place(&mut world, "hut", 0, 0);
    let item = placed_id(&events);

    let mut events = Vec::new();
    world::apply(&mut world, Command::LiftItem { item }, &mut events);
    events.clear();
    world::apply(&mut world, Command::RemoveItem { item }, &mut events);

    assert_eq!(
        events,
        vec![Event::ItemRemoved {
            item,
            kind: kind("hut"),
            footprint: Footprint::single(TileCoord::new(0, 0)),
        }]
    );
    assert_eq!(query::lifted_item(&world), None);
    assert_eq!(query::remaining(&world, &kind("hut")), 1);
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn lift_protocol_misuse_is_reported() {
    let mut world = small_world();
    let events = place(&mut world, "hut", 0, 0);
    let item = placed_id(&events);
    let missing = ItemId::new(99);

    let mut events = Vec::new();
    world::apply(&mut world, Command::LiftItem { item: missing }, &mut events);
    assert_eq!(
        events.last(),
        Some(&Event::ItemRequestRejected {
            item: missing,
            reason: ItemRequestError::MissingItem,
        })
    );

    world::apply(
        &mut world,
        Command::SettleItem {
            item,
            anchor: TileCoord::new(1, 1),
        },
        &mut events,
    );
    assert_eq!(
        events.last(),
        Some(&Event::ItemRequestRejected {
            item,
            reason: ItemRequestError::NotLifted,
        })
    );

    world::apply(&mut world, Command::LiftItem { item }, &mut events);
    world::apply(&mut world, Command::LiftItem { item }, &mut events);
    assert_eq!(
        events.last(),
        Some(&Event::ItemRequestRejected {
            item,
            reason: ItemRequestError::AlreadyLifted,
        })
    );
}

#[test]
fn flip_is_presentation_only() {
    let mut world = small_world();
    let events = place(&mut world, "hut", 0, 0);
    let item = placed_id(&events);

    let mut events = Vec::new();
    world::apply(&mut world, Command::FlipItem { item }, &mut events);
    assert_eq!(
        events,
        vec![Event::ItemFlipped {
            item,
            flipped: true,
        }]
    );

    let snapshot = query::item_view(&world)
        .into_vec()
        .into_iter()
        .find(|snapshot| snapshot.id == item)
        .expect("snapshot present");
    assert!(snapshot.flipped);
    assert_eq!(snapshot.footprint, Footprint::single(TileCoord::new(0, 0)));
    assert_eq!(query::item_at(&world, TileCoord::new(0, 0)), Some(item));
    assert!(query::occupancy_consistent(&world));
}

#[test]
fn population_tracks_placed_items() {
    let catalog = ItemCatalog::from_entries([
        (
            kind("hut"),
            ItemSpec {
                initial_count: 2,
                population: 10,
                ..ItemSpec::FALLBACK
            },
        ),
        (
            kind("shrine"),
            ItemSpec {
                tile_span: 2,
                initial_count: 1,
                population: 20,
                ..ItemSpec::FALLBACK
            },
        ),
    ]);
    let mut world = World::with_catalog(catalog);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureLattice {
            half_extent: 4,
            tile_width: 64.0,
        },
        &mut events,
    );

    let _ = place(&mut world, "hut", 0, 0);
    let shrine_events = place(&mut world, "shrine", 1, 1);
    let shrine = placed_id(&shrine_events);
    assert_eq!(query::population(&world), 30);

    let mut events = Vec::new();
    world::apply(&mut world, Command::RemoveItem { item: shrine }, &mut events);
    assert_eq!(query::population(&world), 10);
}

#[test]
fn occupancy_stays_consistent_across_a_session() {
    let mut world = small_world();

    let hut = placed_id(&place(&mut world, "hut", -2, -2));
    let shrine = placed_id(&place(&mut world, "shrine", -1, -1));
    assert!(query::occupancy_consistent(&world));

    let mut events = Vec::new();
    world::apply(&mut world, Command::LiftItem { item: hut }, &mut events);
    assert!(query::occupancy_consistent(&world));

    world::apply(
        &mut world,
        Command::SettleItem {
            item: hut,
            anchor: TileCoord::new(1, 1),
        },
        &mut events,
    );
    assert!(query::occupancy_consistent(&world));

    world::apply(&mut world, Command::RemoveItem { item: shrine }, &mut events);
    assert!(query::occupancy_consistent(&world));
    assert_eq!(query::item_view(&world).len(), 1);
}
