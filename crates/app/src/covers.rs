use std::path::Path;

use cover_carousel_core::{CoverMetrics, ItemSize, Result};

/// Reads cover dimensions from image headers. Covers that cannot be read, or
/// that report an empty image, get the placeholder size instead.
#[derive(Debug, Clone, Copy)]
pub struct ImageCoverMetrics {
    placeholder: ItemSize,
}

impl ImageCoverMetrics {
    pub fn new(placeholder: ItemSize) -> Self {
        Self { placeholder }
    }
}

impl CoverMetrics for ImageCoverMetrics {
    fn natural_size(&self, cover: &Path) -> Result<ItemSize> {
        match image::image_dimensions(cover) {
            Ok((width, height)) if width > 0 && height > 0 => {
                Ok(ItemSize::new(width as f32, height as f32))
            }
            Ok((width, height)) => {
                tracing::warn!(cover = %cover.display(), width, height, "empty cover, using placeholder");
                Ok(self.placeholder)
            }
            Err(err) => {
                tracing::warn!(cover = %cover.display(), %err, "unreadable cover, using placeholder");
                Ok(self.placeholder)
            }
        }
    }
}
