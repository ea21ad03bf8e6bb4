//! Stream payloads and the items a carousel builds from them.

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ItemSize, Transform};

/// Track metadata shown in a carousel slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub title: String,
    pub artist: String,
    pub cover: PathBuf,
}

impl Stream {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        cover: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            cover: cover.into(),
        }
    }
}

/// Identifier handed out by a carousel for every item it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stream bound to one slot, with the last transform the engine committed
/// for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub stream: Stream,
    pub natural_size: ItemSize,
    pub slot: usize,
    pub transform: Transform,
}
