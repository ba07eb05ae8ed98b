#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Havenisle experience.

use havenisle_core::{Command, TileCoord};
use havenisle_world::{query, World};

/// Default half-extent of the enumerated lattice range.
pub const DEFAULT_HALF_EXTENT: u32 = 50;

/// Default width of a single diamond tile in world units.
pub const DEFAULT_TILE_WIDTH: f32 = 64.0;

/// Startup configuration resolved by the embedding adapter.
#[derive(Clone, Debug, PartialEq)]
pub struct StartupConfig {
    /// Half-extent of the enumerated lattice range along each axis.
    pub half_extent: u32,
    /// Width of a single diamond tile measured in world units.
    pub tile_width: f32,
    /// Tiles restricted by the persisted store, already parsed; an empty
    /// list is the fail-open result of a missing or malformed store.
    pub restricted_tiles: Vec<TileCoord>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            half_extent: DEFAULT_HALF_EXTENT,
            tile_width: DEFAULT_TILE_WIDTH,
            restricted_tiles: Vec::new(),
        }
    }
}

/// Produces the command batch that prepares a fresh world.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Derives the startup command batch for the provided configuration.
    #[must_use]
    pub fn startup_commands(&self, config: &StartupConfig) -> Vec<Command> {
        let mut commands = vec![Command::ConfigureLattice {
            half_extent: config.half_extent,
            tile_width: config.tile_width,
        }];
        if !config.restricted_tiles.is_empty() {
            commands.push(Command::LoadRestrictions {
                tiles: config.restricted_tiles.clone(),
            });
        }
        commands
    }
}
