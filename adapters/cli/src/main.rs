#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Havenisle experience.

mod catalog_config;
mod layout_transfer;
mod persistence;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec2;
use havenisle_core::{Command, Event, ItemCatalog, ItemId, ItemKind, TileCoord};
use havenisle_rendering::{
    feedback_from_events, item_render_anchor, Color, DeleteZoneBounds, InteractionFeedback,
    IsoGridPresentation, IsoProjection, RenderingBackend, Scene, SceneItem, ScenePreview,
    ViewportTransform,
};
use havenisle_system_bootstrap::{Bootstrap, StartupConfig};
use havenisle_system_drag::{footprint_preview, ActiveDrag, DragInput, DragSession};
use havenisle_world::{self as world, query, World};

use crate::layout_transfer::{VillageLayoutItem, VillageLayoutSnapshot, SNAPSHOT_HEADER};

const GRID_LINE_COLOR: Color = Color::from_rgb_u8(0x7c, 0xba, 0x34);
const RESTRICTED_COLOR: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
const HOVER_COLOR: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);

const VIEWPORT_WIDTH: f32 = 1280.0;
const VIEWPORT_HEIGHT: f32 = 720.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 2.0;

#[derive(Parser)]
#[command(name = "havenisle", about = "Havenisle isometric build-grid tools")]
struct Cli {
    /// Item catalog TOML; the built-in catalog applies when omitted.
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,
    /// Restricted-tile store.
    #[arg(long, value_name = "FILE", default_value = "restricted_tiles.json")]
    restrictions: PathBuf,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Run a scripted placement session and print the event log.
    Demo,
    /// Inspect or edit the restricted-tile store.
    Restrictions {
        #[command(subcommand)]
        action: RestrictionsAction,
    },
    /// Decode a village layout transfer string.
    DecodeLayout {
        /// Encoded layout produced by a previous session.
        layout: String,
    },
}

#[derive(Subcommand)]
enum RestrictionsAction {
    /// Print the stored restricted tiles.
    Show,
    /// Restrict the provided tiles (as "row,col" keys).
    Add {
        /// Tile keys to restrict.
        tiles: Vec<String>,
    },
    /// Un-restrict the provided tiles (as "row,col" keys).
    Remove {
        /// Tile keys to un-restrict.
        tiles: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(CliCommand::Demo) {
        CliCommand::Demo => demo(cli.catalog.as_deref(), &cli.restrictions),
        CliCommand::Restrictions { action } => match action {
            RestrictionsAction::Show => {
                restrictions_show(&cli.restrictions);
                Ok(())
            }
            RestrictionsAction::Add { tiles } => restrictions_edit(&cli.restrictions, &tiles, true),
            RestrictionsAction::Remove { tiles } => {
                restrictions_edit(&cli.restrictions, &tiles, false)
            }
        },
        CliCommand::DecodeLayout { layout } => decode_layout(&layout),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<ItemCatalog> {
    match path {
        Some(path) => catalog_config::load(path)
            .with_context(|| format!("loading catalog from {}", path.display())),
        None => Ok(catalog_config::built_in()),
    }
}

/// Presents scenes as plain text.
struct TextBackend;

impl RenderingBackend for TextBackend {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let half_extent = scene.grid.range.half_extent();
        println!(
            "lattice: {half_extent} half-extent ({} tiles), tile width {}",
            scene.grid.range.tile_count(),
            scene.grid.tile_width,
        );
        if scene.items.is_empty() {
            println!("no items placed");
        }
        for item in &scene.items {
            let mut notes = String::new();
            if item.flipped {
                notes.push_str(" flipped");
            }
            if item.lifted {
                notes.push_str(" lifted");
            }
            println!(
                "  {} #{} anchored at ({:.1}, {:.1}) x{:.1}{notes}",
                item.kind,
                item.id.get(),
                item.anchor.x,
                item.anchor.y,
                item.scale,
            );
        }
        if let Some(preview) = scene.preview {
            println!(
                "preview at {} span {} ({})",
                preview.footprint.anchor(),
                preview.footprint.span(),
                if preview.placeable { "placeable" } else { "blocked" },
            );
        }
        Ok(())
    }
}

/// Screen position whose calibrated pick resolves to the provided tile.
///
/// Aims at the visual middle of the diamond, half a tile height below the
/// center, which the selection calibration shifts back onto the center.
fn pointer_over(
    projection: &IsoProjection,
    viewport: &ViewportTransform,
    tile: TileCoord,
) -> Vec2 {
    let target =
        projection.cell_to_world(tile) + Vec2::new(0.0, projection.tile_height() * 0.5);
    viewport.world_to_screen(target)
}

fn resolve_pointer(
    projection: &IsoProjection,
    viewport: &ViewportTransform,
    world: &World,
    screen: Vec2,
) -> Option<TileCoord> {
    let world_point = viewport.screen_to_world(screen);
    projection.pick_tile(
        projection.selection_point(world_point),
        query::lattice(world).range(),
    )
}

/// Runs one session frame: the session emits commands, the world applies
/// them, and the produced events are returned.
fn drive(
    session: &mut DragSession,
    world: &mut World,
    carried_events: &[Event],
    input: DragInput,
) -> Vec<Event> {
    let mut commands = Vec::new();
    session.handle(
        carried_events,
        input,
        |kind| query::remaining(world, kind),
        &mut commands,
    );
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn placed_item(events: &[Event]) -> Option<ItemId> {
    events.iter().find_map(|event| match event {
        Event::ItemPlaced { item, .. } => Some(*item),
        _ => None,
    })
}

fn report(events: &[Event]) {
    for event in events {
        println!("  {}", describe_event(event));
    }
    match feedback_from_events(events) {
        Some(InteractionFeedback::Placed { .. }) => println!("  >> pop!"),
        Some(InteractionFeedback::Removed { .. }) => println!("  >> item deleted"),
        Some(InteractionFeedback::Rejected { reason }) => {
            println!("  >> cannot place here ({reason:?})");
        }
        None => {}
    }
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::LatticeConfigured {
            half_extent,
            tile_width,
        } => format!("lattice configured: half-extent {half_extent}, tile width {tile_width}"),
        Event::RestrictionsLoaded { count } => format!("{count} restricted tiles loaded"),
        Event::ItemPlaced {
            item,
            kind,
            footprint,
            replaced,
        } => match replaced {
            Some(old) => format!(
                "{kind} #{} placed at {} replacing #{}",
                item.get(),
                footprint.anchor(),
                old.get(),
            ),
            None => format!("{kind} #{} placed at {}", item.get(), footprint.anchor()),
        },
        Event::ItemLifted { item, footprint } => {
            format!("item #{} lifted off {}", item.get(), footprint.anchor())
        }
        Event::ItemMoved { item, from, to } => format!(
            "item #{} moved {} -> {}",
            item.get(),
            from.anchor(),
            to.anchor(),
        ),
        Event::ItemReturned { item, footprint } => {
            format!("item #{} returned to {}", item.get(), footprint.anchor())
        }
        Event::ItemRemoved { item, kind, .. } => format!("{kind} #{} removed", item.get()),
        Event::PlacementRejected {
            kind,
            anchor,
            reason,
        } => format!("placement of {kind} at {anchor} rejected: {reason:?}"),
        Event::MoveRejected {
            item,
            anchor,
            reason,
        } => format!("move of #{} to {anchor} rejected: {reason:?}", item.get()),
        Event::ItemPurchased { kind, price, coins } => {
            format!("purchased {kind} for {price} coins ({coins} left)")
        }
        Event::CoinsGranted { amount, coins } => format!("{amount} coins granted ({coins} total)"),
        other => format!("{other:?}"),
    }
}

fn compose_scene(
    world: &World,
    projection: &IsoProjection,
    catalog: &ItemCatalog,
    preview: Option<ScenePreview>,
    feedback: Option<InteractionFeedback>,
) -> Result<Scene> {
    let lattice = query::lattice(world);
    let grid = IsoGridPresentation::new(
        lattice.range(),
        lattice.tile_width(),
        GRID_LINE_COLOR,
        RESTRICTED_COLOR,
        HOVER_COLOR,
    )?;
    let items = query::item_view(world)
        .into_vec()
        .into_iter()
        .map(|snapshot| {
            let spec = catalog.spec_for(&snapshot.kind);
            let anchor = item_render_anchor(projection, snapshot.footprint, spec.vertical_offset);
            SceneItem {
                id: snapshot.id,
                kind: snapshot.kind,
                footprint: snapshot.footprint,
                anchor,
                scale: spec.render_scale,
                flipped: snapshot.flipped,
                lifted: snapshot.lifted,
            }
        })
        .collect();
    Ok(Scene {
        grid,
        items,
        preview,
        feedback,
    })
}

fn snapshot_from_world(world: &World) -> VillageLayoutSnapshot {
    let lattice = query::lattice(world);
    VillageLayoutSnapshot {
        half_extent: lattice.range().half_extent(),
        tile_width: lattice.tile_width(),
        items: query::item_view(world)
            .into_vec()
            .into_iter()
            .map(|snapshot| VillageLayoutItem {
                kind: snapshot.kind,
                footprint: snapshot.footprint,
                flipped: snapshot.flipped,
            })
            .collect(),
    }
}

fn demo(catalog_path: Option<&Path>, restrictions_path: &Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let restricted = persistence::load_restricted_tiles(restrictions_path);

    let mut world = World::with_catalog(catalog.clone());
    let bootstrap = Bootstrap;
    println!("{}", bootstrap.welcome_banner(&world));

    let config = StartupConfig {
        restricted_tiles: restricted.iter().collect(),
        ..StartupConfig::default()
    };
    let mut events = Vec::new();
    for command in bootstrap.startup_commands(&config) {
        world::apply(&mut world, command, &mut events);
    }
    report(&events);

    let projection = IsoProjection::new(Vec2::ZERO, query::lattice(&world).tile_width())?;
    let mut viewport = ViewportTransform::new(ZOOM_MIN, ZOOM_MAX)?;
    viewport.pan_by(Vec2::new(VIEWPORT_WIDTH * 0.5, VIEWPORT_HEIGHT * 0.5));
    let delete_zone = DeleteZoneBounds::for_viewport(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let mut session = DragSession::new();

    println!("\n-- anchored zoom --");
    let anchor = Vec2::new(400.0, 300.0);
    let before = viewport.screen_to_world(anchor);
    let zoom = viewport.set_zoom_anchored(1.5, anchor);
    let after = viewport.screen_to_world(anchor);
    println!(
        "  zoom {zoom}: world under ({}, {}) stayed ({:.1}, {:.1}) -> ({:.1}, {:.1})",
        anchor.x, anchor.y, before.x, before.y, after.x, after.y,
    );

    println!("\n-- spawn a hut at (0,0) --");
    let input = DragInput {
        spawn_kind: Some(ItemKind::new("hut")),
        pointer_tile: resolve_pointer(
            &projection,
            &viewport,
            &world,
            pointer_over(&projection, &viewport, TileCoord::new(0, 0)),
        ),
        released: true,
        ..DragInput::default()
    };
    let events = drive(&mut session, &mut world, &[], input);
    report(&events);
    let hut = placed_item(&events);

    println!("\n-- drag a shrine to (2,2) with a hover preview --");
    let shrine_anchor = TileCoord::new(2, 2);
    let input = DragInput {
        spawn_kind: Some(ItemKind::new("shrine")),
        pointer_tile: resolve_pointer(
            &projection,
            &viewport,
            &world,
            pointer_over(&projection, &viewport, shrine_anchor),
        ),
        ..DragInput::default()
    };
    let start_events = drive(&mut session, &mut world, &[], input);
    report(&start_events);
    let preview = match session.active() {
        Some(ActiveDrag::Spawn { kind }) => {
            let span = catalog.spec_for(&kind).tile_span;
            let preview = footprint_preview(shrine_anchor, span, |tile| {
                query::restricted(&world).contains(tile)
                    || query::occupancy_view(&world).occupant(tile).is_some()
            });
            let mut hover_events = Vec::new();
            world::apply(
                &mut world,
                Command::HoverFootprint {
                    footprint: Some(preview.footprint),
                },
                &mut hover_events,
            );
            report(&hover_events);
            Some(ScenePreview {
                footprint: preview.footprint,
                placeable: preview.placeable,
            })
        }
        _ => None,
    };
    if let Some(preview) = preview {
        println!(
            "  previewing {} tiles at {} ({})",
            preview.footprint.cell_count(),
            preview.footprint.anchor(),
            if preview.placeable { "placeable" } else { "blocked" },
        );
    }
    let input = DragInput {
        pointer_tile: resolve_pointer(
            &projection,
            &viewport,
            &world,
            pointer_over(&projection, &viewport, shrine_anchor),
        ),
        released: true,
        ..DragInput::default()
    };
    let events = drive(&mut session, &mut world, &start_events, input);
    report(&events);
    let shrine = placed_item(&events);
    let mut clear_events = Vec::new();
    world::apply(
        &mut world,
        Command::HoverFootprint { footprint: None },
        &mut clear_events,
    );

    if let Some(hut) = hut {
        println!("\n-- move the hut to (-3,1) --");
        let lift_events = drive(
            &mut session,
            &mut world,
            &[],
            DragInput {
                grab_item: Some(hut),
                ..DragInput::default()
            },
        );
        report(&lift_events);
        let input = DragInput {
            pointer_tile: resolve_pointer(
                &projection,
                &viewport,
                &world,
                pointer_over(&projection, &viewport, TileCoord::new(-3, 1)),
            ),
            released: true,
            ..DragInput::default()
        };
        let events = drive(&mut session, &mut world, &lift_events, input);
        report(&events);
    }

    println!("\n-- a temple overlapping the shrine is rejected --");
    let input = DragInput {
        spawn_kind: Some(ItemKind::new("temple")),
        pointer_tile: resolve_pointer(
            &projection,
            &viewport,
            &world,
            pointer_over(&projection, &viewport, TileCoord::new(1, 1)),
        ),
        released: true,
        ..DragInput::default()
    };
    let events = drive(&mut session, &mut world, &[], input);
    report(&events);
    let last_feedback = feedback_from_events(&events);

    if let Some(shrine) = shrine {
        println!("\n-- drop the shrine on the delete zone --");
        let lift_events = drive(
            &mut session,
            &mut world,
            &[],
            DragInput {
                grab_item: Some(shrine),
                ..DragInput::default()
            },
        );
        report(&lift_events);
        let delete_point = delete_zone.origin() + delete_zone.size() * 0.5;
        let input = DragInput {
            pointer_tile: resolve_pointer(&projection, &viewport, &world, delete_point),
            over_delete_zone: delete_zone.contains(delete_point),
            released: true,
            ..DragInput::default()
        };
        let events = drive(&mut session, &mut world, &lift_events, input);
        report(&events);
    }

    println!("\n-- shop --");
    let mut events = Vec::new();
    world::apply(&mut world, Command::GrantCoins { amount: 200 }, &mut events);
    world::apply(
        &mut world,
        Command::PurchaseItem {
            kind: ItemKind::new("hut"),
        },
        &mut events,
    );
    report(&events);

    println!("\n-- scene --");
    let scene = compose_scene(&world, &projection, &catalog, None, last_feedback)?;
    let mut backend = TextBackend;
    backend.present(&scene)?;
    println!(
        "population {}, coins {}, hut inventory {}",
        query::population(&world),
        query::coins(&world),
        query::remaining(&world, &ItemKind::new("hut")),
    );
    assert!(query::occupancy_consistent(&world));

    println!("\nshare this layout:\n{}", snapshot_from_world(&world).encode());
    Ok(())
}

fn restrictions_show(path: &Path) {
    let set = persistence::load_restricted_tiles(path);
    println!("{} restricted tiles in {}", set.len(), path.display());
    for key in set.serialize() {
        println!("{key}");
    }
}

fn restrictions_edit(path: &Path, tiles: &[String], restrict: bool) -> Result<()> {
    let mut parsed = Vec::new();
    for raw in tiles {
        parsed.push(
            raw.parse::<TileCoord>()
                .with_context(|| format!("invalid tile key '{raw}'"))?,
        );
    }

    let existing = persistence::load_restricted_tiles(path);
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadRestrictions {
            tiles: existing.iter().collect(),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SetRestrictionMode { enabled: true },
        &mut events,
    );

    events.clear();
    for tile in parsed {
        if query::restricted(&world).contains(tile) != restrict {
            world::apply(&mut world, Command::ToggleRestriction { tile }, &mut events);
        }
    }
    report(&events);

    persistence::save_restricted_tiles(path, query::restricted(&world))
        .map_err(|error| anyhow!("could not save the restricted-tile store: {error}"))?;
    println!(
        "{} restricted tiles saved to {}",
        query::restricted(&world).len(),
        path.display(),
    );
    Ok(())
}

fn decode_layout(value: &str) -> Result<()> {
    let snapshot = VillageLayoutSnapshot::decode(value)
        .map_err(|error| anyhow!("{error} (expected '{SNAPSHOT_HEADER}:<extent>:<payload>')"))?;
    println!(
        "layout for a lattice of half-extent {} (tile width {}):",
        snapshot.half_extent, snapshot.tile_width,
    );
    if snapshot.items.is_empty() {
        println!("  empty layout");
    }
    for item in &snapshot.items {
        let mut notes = String::new();
        if item.flipped {
            notes.push_str(", flipped");
        }
        println!(
            "  {} at {} (span {}{notes})",
            item.kind,
            item.anchor(),
            item.footprint.span(),
        );
    }
    Ok(())
}
