#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure drag-session system that turns pointer gestures into world commands.
//!
//! A [`DragSession`] represents one gesture: dragging a new piece out of the
//! inventory, or picking up a piece already on the lattice. The session holds
//! only transient gesture state, consumes world [`Event`]s plus a per-frame
//! [`DragInput`] snapshot, and responds exclusively with [`Command`] batches.
//! Exactly one terminal transition fires per gesture (commit, rollback, or
//! delete) and the session returns to idle with nothing carried over.

use havenisle_core::{Command, Event, Footprint, ItemId, ItemKind, TileCoord};

/// Input snapshot distilled from adapter-provided frame input data.
///
/// `pointer_tile` arrives already resolved by the presentation layer: the
/// nearest lattice tile under the pointer, or `None` when the pointer is off
/// the lattice or beyond the one-tile-width hit radius. The delete-zone test
/// is likewise an adapter capability; the session only sees its verdict.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DragInput {
    /// Kind dragged out of the inventory on this frame, if any.
    pub spawn_kind: Option<ItemKind>,
    /// Placed item picked up on this frame, if any.
    pub grab_item: Option<ItemId>,
    /// Nearest tile under the pointer, gated by the hit-test radius.
    pub pointer_tile: Option<TileCoord>,
    /// Whether the pointer is inside the delete-zone rectangle.
    pub over_delete_zone: bool,
    /// Whether the pointer was released on this frame.
    pub released: bool,
}

/// The gesture currently in flight, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveDrag {
    /// A provisional item dragged from the inventory; it has no occupancy
    /// and no inventory unit has been reserved for it yet.
    Spawn {
        /// Kind of the provisional item.
        kind: ItemKind,
    },
    /// An existing item lifted off the lattice.
    Move {
        /// Identifier of the lifted item.
        item: ItemId,
        /// Origin footprint vacated at lift time, once the world confirms it.
        origin: Option<Footprint>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SessionState {
    Idle,
    Spawning { kind: ItemKind },
    Moving { item: ItemId, origin: Option<Footprint> },
}

/// Declarative placement preview describing the hovered footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Footprint that would be occupied on release at the current pointer.
    pub footprint: Footprint,
    /// Advisory placeability verdict; the engine's validation on release is
    /// authoritative (single-tile replacement, for instance, commits even
    /// though the target reads as blocked here).
    pub placeable: bool,
}

/// Computes the preview footprint for a drag hovering at `anchor`.
///
/// The `blocked` closure should report whether a tile is restricted or
/// occupied, mirroring the world's `query` helpers.
pub fn footprint_preview<B>(anchor: TileCoord, span: u32, mut blocked: B) -> PlacementPreview
where
    B: FnMut(TileCoord) -> bool,
{
    let footprint = Footprint::new(anchor, span);
    let placeable = footprint.keys().into_iter().all(|key| !blocked(key));
    PlacementPreview {
        footprint,
        placeable,
    }
}

/// Drag-session state machine driving the placement engine at gesture end.
#[derive(Clone, Debug)]
pub struct DragSession {
    state: SessionState,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Reports whether a gesture is currently in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != SessionState::Idle
    }

    /// The gesture currently in flight, if any.
    #[must_use]
    pub fn active(&self) -> Option<ActiveDrag> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Spawning { kind } => Some(ActiveDrag::Spawn { kind: kind.clone() }),
            SessionState::Moving { item, origin } => Some(ActiveDrag::Move {
                item: *item,
                origin: *origin,
            }),
        }
    }

    /// Consumes world events and adapter-derived input to emit commands.
    ///
    /// The `remaining` closure should mirror the world's `query::remaining`
    /// so spawn gestures are gated on a positive inventory count before any
    /// provisional item appears.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: DragInput,
        mut remaining: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(&ItemKind) -> u32,
    {
        for event in events {
            if let Event::ItemLifted { item, footprint } = event {
                if let SessionState::Moving { item: active, origin } = &mut self.state {
                    if active == item {
                        *origin = Some(*footprint);
                    }
                }
            }
        }

        // Gesture start; ignored while a session is already active.
        if self.state == SessionState::Idle {
            if let Some(kind) = input.spawn_kind.clone() {
                if remaining(&kind) > 0 {
                    self.state = SessionState::Spawning { kind };
                }
            } else if let Some(item) = input.grab_item {
                self.state = SessionState::Moving { item, origin: None };
                out.push(Command::LiftItem { item });
            }
        }

        if !input.released {
            return;
        }

        // Exactly one terminal transition per gesture.
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Idle => {}
            SessionState::Spawning { kind } => {
                if !input.over_delete_zone {
                    if let Some(anchor) = input.pointer_tile {
                        out.push(Command::PlaceItem { kind, anchor });
                    }
                }
                // Off-grid or delete-zone release: the provisional item is
                // discarded with no inventory change; it was never reserved.
            }
            SessionState::Moving { item, .. } => {
                if input.over_delete_zone {
                    out.push(Command::RemoveItem { item });
                } else if let Some(anchor) = input.pointer_tile {
                    out.push(Command::SettleItem { item, anchor });
                } else {
                    out.push(Command::ReturnItem { item });
                }
            }
        }
    }
}
