#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Havenisle adapters.
//!
//! This crate owns the coordinate transforms that connect screen input to the
//! lattice (the isometric projection and the zoom/pan viewport) plus the
//! declarative scene types that rendering backends consume. Nothing here
//! draws or plays anything; backends receive a [`Scene`] and interpret it.

use anyhow::Result as AnyResult;
use glam::Vec2;
use havenisle_core::{
    Event, Footprint, ItemId, ItemKind, LatticeRange, PlacementError, TileCoord,
};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Pure isometric coordinate math for the diamond-tiled lattice.
///
/// Tiles use the classic 2:1 diamond ratio: a tile is twice as wide as it is
/// tall, and a cell's world center is a deterministic function of its row and
/// column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsoProjection {
    origin: Vec2,
    tile_width: f32,
}

impl IsoProjection {
    /// Creates a projection centred at the provided world origin.
    ///
    /// Returns an error when `tile_width` is not strictly positive.
    pub fn new(origin: Vec2, tile_width: f32) -> Result<Self, RenderingError> {
        if tile_width <= 0.0 {
            return Err(RenderingError::InvalidTileWidth { tile_width });
        }
        Ok(Self { origin, tile_width })
    }

    /// World origin of the projection (the center of tile `(0, 0)`).
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Width of a single diamond tile in world units.
    #[must_use]
    pub const fn tile_width(&self) -> f32 {
        self.tile_width
    }

    /// Height of a single diamond tile in world units (half the width).
    #[must_use]
    pub fn tile_height(&self) -> f32 {
        self.tile_width * 0.5
    }

    /// Converts a lattice cell to its world-space center.
    #[must_use]
    pub fn cell_to_world(&self, tile: TileCoord) -> Vec2 {
        let half_width = self.tile_width * 0.5;
        let half_height = self.tile_height() * 0.5;
        Vec2::new(
            self.origin.x + (tile.column() - tile.row()) as f32 * half_width,
            self.origin.y + (tile.column() + tile.row()) as f32 * half_height,
        )
    }

    /// Finds the enumerated tile whose center lies nearest to `point`.
    ///
    /// A linear scan in row-major enumeration order; on an exact distance tie
    /// the first tile encountered wins, which keeps resolution deterministic.
    #[must_use]
    pub fn nearest_cell(&self, point: Vec2, range: LatticeRange) -> Option<NearestTile> {
        let mut best: Option<NearestTile> = None;
        for tile in range.iter() {
            let distance = point.distance(self.cell_to_world(tile));
            if best.as_ref().map_or(true, |found| distance < found.distance) {
                best = Some(NearestTile { tile, distance });
            }
        }
        best
    }

    /// Resolves `point` to a tile, applying the hit-test tolerance.
    ///
    /// A tile is only reported when the nearest center lies strictly within
    /// one full tile width of the point; anything farther counts as off the
    /// lattice.
    #[must_use]
    pub fn pick_tile(&self, point: Vec2, range: LatticeRange) -> Option<TileCoord> {
        self.nearest_cell(point, range)
            .filter(|nearest| nearest.distance < self.tile_width)
            .map(|nearest| nearest.tile)
    }

    /// Applies the pointer calibration used for tile selection.
    ///
    /// Sprites overhang the upper half of their tile, so the raw pointer
    /// position selects the tile below the one the player perceives; shifting
    /// the probe up by half a tile height compensates.
    #[must_use]
    pub fn selection_point(&self, pointer_world: Vec2) -> Vec2 {
        Vec2::new(pointer_world.x, pointer_world.y - self.tile_height() * 0.5)
    }
}

/// Result of a nearest-cell search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestTile {
    /// Tile whose center lies nearest to the probed point.
    pub tile: TileCoord,
    /// Euclidean distance from the probed point to that center.
    pub distance: f32,
}

/// Zoom and pan state mapping screen coordinates to world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    zoom: f32,
    zoom_min: f32,
    zoom_max: f32,
    pan: Vec2,
}

impl ViewportTransform {
    /// Creates a transform with unit zoom and no pan.
    ///
    /// Returns an error when the zoom bounds are not a positive, ordered
    /// interval.
    pub fn new(zoom_min: f32, zoom_max: f32) -> Result<Self, RenderingError> {
        if zoom_min <= 0.0 || zoom_max < zoom_min {
            return Err(RenderingError::InvalidZoomBounds { zoom_min, zoom_max });
        }
        Ok(Self {
            zoom: 1.0f32.clamp(zoom_min, zoom_max),
            zoom_min,
            zoom_max,
            pan: Vec2::ZERO,
        })
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current pan offset in screen units.
    #[must_use]
    pub const fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Converts a screen position to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan) / self.zoom
    }

    /// Converts a world position to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.zoom + self.pan
    }

    /// Offsets the pan by the provided screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Applies a zoom request anchored at a screen point, returning the zoom
    /// actually applied.
    ///
    /// The request saturates silently at the configured bounds. When the zoom
    /// changes, the pan is recomputed so the world point previously under the
    /// anchor remains under it after the rescale.
    pub fn set_zoom_anchored(&mut self, requested: f32, anchor_screen: Vec2) -> f32 {
        let clamped = requested.clamp(self.zoom_min, self.zoom_max);
        if clamped != self.zoom {
            let world_under = self.screen_to_world(anchor_screen);
            self.zoom = clamped;
            self.pan = anchor_screen - world_under * clamped;
        }
        self.zoom
    }

    /// Restores unit zoom and clears the pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0f32.clamp(self.zoom_min, self.zoom_max);
        self.pan = Vec2::ZERO;
    }
}

/// Side length of the delete-zone square in screen units.
pub const DELETE_ZONE_SIZE: f32 = 120.0;

/// Margin between the delete zone and the viewport edges.
pub const DELETE_ZONE_MARGIN: f32 = 20.0;

/// Screen-space rectangle that deletes items dropped inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeleteZoneBounds {
    origin: Vec2,
    size: Vec2,
}

impl DeleteZoneBounds {
    /// Creates delete-zone bounds from an explicit rectangle.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Places the standard delete zone in the bottom-right corner of a
    /// viewport; call again after every viewport resize.
    #[must_use]
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(
                width - DELETE_ZONE_SIZE - DELETE_ZONE_MARGIN,
                height - DELETE_ZONE_SIZE - DELETE_ZONE_MARGIN,
            ),
            size: Vec2::splat(DELETE_ZONE_SIZE),
        }
    }

    /// Top-left corner of the rectangle in screen units.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Width and height of the rectangle in screen units.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Reports whether a screen point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size.x
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size.y
    }
}

/// Computes an item's render anchor: the world-space geometric center of its
/// footprint shifted down by the kind's configured vertical offset.
#[must_use]
pub fn item_render_anchor(
    projection: &IsoProjection,
    footprint: Footprint,
    vertical_offset: f32,
) -> Vec2 {
    let reach = footprint.span().saturating_sub(1) as i32;
    let top_left = projection.cell_to_world(footprint.anchor());
    let bottom_right = projection.cell_to_world(footprint.anchor().offset(reach, reach));
    let center = (top_left + bottom_right) * 0.5;
    Vec2::new(center.x, center.y + vertical_offset)
}

/// Describes the diamond-tiled lattice that backends should draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsoGridPresentation {
    /// Enumerated range covered by the lattice.
    pub range: LatticeRange,
    /// Width of a single diamond tile in world units.
    pub tile_width: f32,
    /// Color used when drawing tile outlines.
    pub line_color: Color,
    /// Color used when filling restricted tiles in edit mode.
    pub restricted_color: Color,
    /// Color used when filling hovered tiles.
    pub hover_color: Color,
}

impl IsoGridPresentation {
    /// Creates a new lattice descriptor.
    ///
    /// Returns an error when `tile_width` is not strictly positive.
    pub fn new(
        range: LatticeRange,
        tile_width: f32,
        line_color: Color,
        restricted_color: Color,
        hover_color: Color,
    ) -> Result<Self, RenderingError> {
        if tile_width <= 0.0 {
            return Err(RenderingError::InvalidTileWidth { tile_width });
        }
        Ok(Self {
            range,
            tile_width,
            line_color,
            restricted_color,
            hover_color,
        })
    }

    /// Total width of the drawn lattice in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.range.half_extent() as f32 * 2.0 * self.tile_width
    }

    /// Total height of the drawn lattice in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.range.half_extent() as f32 * self.tile_width
    }
}

/// Immutable snapshot describing one item within the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneItem {
    /// Identifier allocated to the item by the world.
    pub id: ItemId,
    /// Kind the item was placed as.
    pub kind: ItemKind,
    /// Footprint the item occupies.
    pub footprint: Footprint,
    /// World-space render anchor (footprint center plus vertical offset).
    pub anchor: Vec2,
    /// Scale factor applied to the item's sprite.
    pub scale: f32,
    /// Whether the sprite is horizontally mirrored.
    pub flipped: bool,
    /// Whether the item is mid-drag and should track the pointer instead of
    /// its anchor.
    pub lifted: bool,
}

/// Declarative drag preview emitted for the hovered footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScenePreview {
    /// Footprint that would be occupied on release.
    pub footprint: Footprint,
    /// Whether the preview location reads as placeable.
    pub placeable: bool,
}

/// Feedback surfaced to backends about the most recent placement interaction.
///
/// The three outcomes map one-to-one onto the presentation layer's visual and
/// audio responses: placement chime, deletion puff, rejection message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionFeedback {
    /// An item was committed onto the lattice (placement or move).
    Placed {
        /// Identifier of the committed item.
        item: ItemId,
    },
    /// An item was removed from the lattice.
    Removed {
        /// Identifier of the removed item.
        item: ItemId,
    },
    /// A placement or move attempt was rejected.
    Rejected {
        /// Reason reported by the world.
        reason: PlacementError,
    },
}

/// Distils a frame's world events into the most recent interaction feedback.
#[must_use]
pub fn feedback_from_events(events: &[Event]) -> Option<InteractionFeedback> {
    let mut feedback = None;
    for event in events {
        let mapped = match event {
            Event::ItemPlaced { item, .. } | Event::ItemMoved { item, .. } => {
                Some(InteractionFeedback::Placed { item: *item })
            }
            Event::ItemRemoved { item, .. } => Some(InteractionFeedback::Removed { item: *item }),
            Event::PlacementRejected { reason, .. } | Event::MoveRejected { reason, .. } => {
                Some(InteractionFeedback::Rejected { reason: *reason })
            }
            _ => None,
        };
        if mapped.is_some() {
            feedback = mapped;
        }
    }
    feedback
}

/// Scene description combining the lattice, its items, and drag feedback.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Lattice that composes the play area.
    pub grid: IsoGridPresentation,
    /// Items currently visible on the lattice.
    pub items: Vec<SceneItem>,
    /// Drag preview for the hovered footprint, if a drag is in flight.
    pub preview: Option<ScenePreview>,
    /// Feedback about the last placement interaction, if any.
    pub feedback: Option<InteractionFeedback>,
}

/// Rendering backend capable of presenting Havenisle scenes.
pub trait RenderingBackend {
    /// Presents a single scene frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Errors that can occur when constructing presentation descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile width must be strictly positive to avoid degenerate diamonds.
    InvalidTileWidth {
        /// Provided width that failed validation.
        tile_width: f32,
    },
    /// Zoom bounds must form a positive, ordered interval.
    InvalidZoomBounds {
        /// Provided lower bound.
        zoom_min: f32,
        /// Provided upper bound.
        zoom_max: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileWidth { tile_width } => {
                write!(f, "tile_width must be positive (received {tile_width})")
            }
            Self::InvalidZoomBounds { zoom_min, zoom_max } => {
                write!(
                    f,
                    "zoom bounds must satisfy 0 < min <= max (received {zoom_min}..{zoom_max})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
