//! Item-catalog configuration loading.

use std::{error::Error, fmt, fs, io, path::Path};

use havenisle_core::{ItemCatalog, ItemKind, ItemSpec};
use serde::Deserialize;

/// On-disk catalog layout:
///
/// ```toml
/// [items.hut]
/// tile_span = 1
/// vertical_offset = 22.0
/// initial_count = 2
/// price = 50
/// population = 10
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: std::collections::BTreeMap<String, ItemEntry>,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    #[serde(default = "default_span")]
    tile_span: u32,
    #[serde(default)]
    vertical_offset: f32,
    #[serde(default = "default_scale")]
    render_scale: f32,
    #[serde(default)]
    initial_count: u32,
    #[serde(default)]
    price: u32,
    #[serde(default)]
    population: u32,
}

fn default_span() -> u32 {
    1
}

fn default_scale() -> f32 {
    1.0
}

/// Loads a catalog from a TOML file.
pub(crate) fn load(path: &Path) -> Result<ItemCatalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(CatalogError::Io)?;
    parse(&text)
}

fn parse(text: &str) -> Result<ItemCatalog, CatalogError> {
    let file: CatalogFile = toml::from_str(text).map_err(CatalogError::Parse)?;
    Ok(ItemCatalog::from_entries(file.items.into_iter().map(
        |(name, entry)| {
            (
                ItemKind::new(name),
                ItemSpec {
                    tile_span: entry.tile_span,
                    vertical_offset: entry.vertical_offset,
                    render_scale: entry.render_scale,
                    initial_count: entry.initial_count,
                    price: entry.price,
                    population: entry.population,
                },
            )
        },
    )))
}

/// The catalog shipped with the game.
pub(crate) fn built_in() -> ItemCatalog {
    let entry = |span: u32, offset: f32, scale: f32, count: u32, price: u32, population: u32| {
        ItemSpec {
            tile_span: span,
            vertical_offset: offset,
            render_scale: scale,
            initial_count: count,
            price,
            population,
        }
    };
    ItemCatalog::from_entries([
        (ItemKind::new("hut"), entry(1, 22.0, 1.0, 2, 50, 10)),
        (ItemKind::new("hut-u1"), entry(1, 17.0, 1.0, 2, 75, 15)),
        (ItemKind::new("shrine"), entry(2, 44.0, 1.2, 1, 150, 20)),
        (ItemKind::new("shrine-u1"), entry(2, 36.0, 1.1, 0, 250, 35)),
        (ItemKind::new("temple"), entry(2, 44.0, 1.4, 30, 200, 40)),
        (ItemKind::new("temple-u1"), entry(3, 51.0, 1.6, 20, 500, 70)),
    ])
}

/// Errors that can occur while loading the catalog configuration.
#[derive(Debug)]
pub(crate) enum CatalogError {
    /// The configuration file could not be read.
    Io(io::Error),
    /// The configuration file is not valid TOML for the expected layout.
    Parse(toml::de::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "could not read catalog file: {error}"),
            Self::Parse(error) => write!(f, "could not parse catalog file: {error}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Parse(error) => Some(error),
        }
    }
}
