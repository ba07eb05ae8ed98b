//! Restricted-tile store: a flat JSON array of `"<row>,<col>"` keys.

use std::{error::Error, fmt, fs, io, path::Path};

use havenisle_core::ParseTileKeyError;
use havenisle_world::RestrictedSet;
use log::warn;

/// Loads the restricted set from the store, failing open.
///
/// A missing or malformed store degrades to an empty set so the game stays
/// playable offline and on first run; the degradation is logged but never
/// surfaced as an error.
pub(crate) fn load_restricted_tiles(path: &Path) -> RestrictedSet {
    match try_load(path) {
        Ok(set) => set,
        Err(error) => {
            warn!(
                "no restricted tiles loaded from {}: {error}",
                path.display()
            );
            RestrictedSet::default()
        }
    }
}

fn try_load(path: &Path) -> Result<RestrictedSet, PersistenceError> {
    let text = fs::read_to_string(path).map_err(PersistenceError::Io)?;
    let keys: Vec<String> = serde_json::from_str(&text).map_err(PersistenceError::Json)?;
    RestrictedSet::deserialize(keys).map_err(PersistenceError::Key)
}

/// Writes the restricted set to the store.
///
/// The set read back must equal the set written, membership-wise; keys are
/// emitted sorted so the file is diff-friendly.
pub(crate) fn save_restricted_tiles(
    path: &Path,
    set: &RestrictedSet,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(&set.serialize()).map_err(PersistenceError::Json)?;
    fs::write(path, json).map_err(PersistenceError::Io)
}

/// Errors that can occur while reading or writing the restricted-tile store.
#[derive(Debug)]
pub(crate) enum PersistenceError {
    /// The store could not be read or written.
    Io(io::Error),
    /// The store does not contain a JSON array of strings.
    Json(serde_json::Error),
    /// The store contains a key that is not a `"<row>,<col>"` pair.
    Key(ParseTileKeyError),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "could not access the store: {error}"),
            Self::Json(error) => write!(f, "store is not a JSON string array: {error}"),
            Self::Key(error) => write!(f, "store holds an invalid tile key: {error}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Json(error) => Some(error),
            Self::Key(error) => Some(error),
        }
    }
}
