use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{ItemSize, Result};

/// Source of natural cover sizes, usually backed by an image decoder.
pub trait CoverMetrics {
    fn natural_size(&self, cover: &Path) -> Result<ItemSize>;
}

/// Reports the same size for every cover.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCoverMetrics {
    size: ItemSize,
}

impl FixedCoverMetrics {
    pub fn new(size: ItemSize) -> Self {
        Self { size }
    }
}

impl CoverMetrics for FixedCoverMetrics {
    fn natural_size(&self, _cover: &Path) -> Result<ItemSize> {
        Ok(self.size)
    }
}

/// Memoises cover sizes so each cover is probed once.
#[derive(Debug, Default)]
pub struct CoverStore<M> {
    metrics: M,
    sizes: HashMap<PathBuf, ItemSize>,
}

impl<M: CoverMetrics> CoverStore<M> {
    pub fn new(metrics: M) -> Self {
        Self {
            metrics,
            sizes: HashMap::new(),
        }
    }

    /// Records a known size, skipping the probe for `cover`.
    pub fn register(&mut self, cover: impl Into<PathBuf>, size: ItemSize) -> Result<()> {
        size.validate()?;
        self.sizes.insert(cover.into(), size);
        Ok(())
    }

    pub fn cached(&self, cover: &Path) -> Option<ItemSize> {
        self.sizes.get(cover).copied()
    }

    /// Returns the natural size of `cover`, probing it on first use.
    /// Probe results that cannot be scaled are rejected and not cached.
    pub fn natural_size(&mut self, cover: &Path) -> Result<ItemSize> {
        if let Some(size) = self.cached(cover) {
            return Ok(size);
        }

        let size = self.metrics.natural_size(cover)?;
        size.validate()?;
        self.sizes.insert(cover.to_path_buf(), size);
        Ok(size)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
