#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use havenisle_core::{Footprint, ItemKind, TileCoord};
use serde::{Deserialize, Serialize};

const SNAPSHOT_DOMAIN: &str = "havenisle";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "havenisle:v1";
/// Delimiter used to separate the prefix, lattice extent and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of the items placed on the lattice and the grid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct VillageLayoutSnapshot {
    /// Half-extent of the enumerated lattice range.
    pub half_extent: u32,
    /// Width of a single diamond tile expressed in world units.
    pub tile_width: f32,
    /// Items composing the layout captured by the snapshot.
    pub items: Vec<VillageLayoutItem>,
}

impl VillageLayoutSnapshot {
    /// Encodes the snapshot into a single-line string suitable for clipboard
    /// transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableSnapshot {
            tile_width: self.tile_width,
            items: self.items.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("layout snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SNAPSHOT_HEADER}:{}:{encoded}", self.half_extent)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let extent = parts.next().ok_or(LayoutTransferError::MissingExtent)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let half_extent = parse_extent(extent)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        Ok(Self {
            half_extent,
            tile_width: decoded.tile_width,
            items: decoded.items,
        })
    }
}

/// Item description captured within a layout snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct VillageLayoutItem {
    /// Kind of item represented by the snapshot.
    pub kind: ItemKind,
    /// Footprint the item occupies.
    pub footprint: Footprint,
    /// Whether the item's presentation is horizontally mirrored.
    pub flipped: bool,
}

impl VillageLayoutItem {
    /// Anchor tile of the captured footprint.
    pub(crate) fn anchor(&self) -> TileCoord {
        self.footprint.anchor()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    tile_width: f32,
    items: Vec<VillageLayoutItem>,
}

/// Errors that can occur while decoding layout transfer strings.
#[derive(Debug)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include the lattice extent.
    MissingExtent,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The lattice extent could not be parsed from the encoded snapshot.
    InvalidExtent(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for LayoutTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "clipboard payload was empty"),
            Self::MissingPrefix => write!(f, "layout string is missing the prefix"),
            Self::MissingVersion => write!(f, "layout string is missing the version"),
            Self::MissingExtent => write!(f, "layout string is missing the lattice extent"),
            Self::MissingPayload => write!(f, "layout string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "layout prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "layout version '{version}' is not supported")
            }
            Self::InvalidExtent(extent) => {
                write!(f, "could not parse lattice extent '{extent}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode layout payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse layout payload: {error}")
            }
        }
    }
}

impl Error for LayoutTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_extent(extent: &str) -> Result<u32, LayoutTransferError> {
    let half_extent = extent
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidExtent(extent.to_owned()))?;

    if half_extent == 0 {
        return Err(LayoutTransferError::InvalidExtent(extent.to_owned()));
    }

    Ok(half_extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_empty_layout() {
        let snapshot = VillageLayoutSnapshot {
            half_extent: 50,
            tile_width: 64.0,
            items: Vec::new(),
        };

        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:50:")));

        let decoded = VillageLayoutSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn round_trip_populated_layout() {
        let items = vec![
            VillageLayoutItem {
                kind: ItemKind::new("hut"),
                footprint: Footprint::single(TileCoord::new(-5, 7)),
                flipped: true,
            },
            VillageLayoutItem {
                kind: ItemKind::new("shrine"),
                footprint: Footprint::new(TileCoord::new(2, 2), 2),
                flipped: false,
            },
        ];
        let snapshot = VillageLayoutSnapshot {
            half_extent: 12,
            tile_width: 96.0,
            items,
        };

        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:12:")));

        let decoded = VillageLayoutSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
        assert_eq!(decoded.items[0].anchor(), TileCoord::new(-5, 7));
    }

    #[test]
    fn decode_rejects_foreign_and_malformed_strings() {
        assert!(matches!(
            VillageLayoutSnapshot::decode("  "),
            Err(LayoutTransferError::EmptyPayload)
        ));
        assert!(matches!(
            VillageLayoutSnapshot::decode("island:v1:12:AAAA"),
            Err(LayoutTransferError::InvalidPrefix(_))
        ));
        assert!(matches!(
            VillageLayoutSnapshot::decode("havenisle:v9:12:AAAA"),
            Err(LayoutTransferError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            VillageLayoutSnapshot::decode("havenisle:v1:zero:AAAA"),
            Err(LayoutTransferError::InvalidExtent(_))
        ));
        assert!(matches!(
            VillageLayoutSnapshot::decode("havenisle:v1:0:AAAA"),
            Err(LayoutTransferError::InvalidExtent(_))
        ));
        assert!(matches!(
            VillageLayoutSnapshot::decode("havenisle:v1:12:!!!"),
            Err(LayoutTransferError::InvalidEncoding(_))
        ));
    }
}
