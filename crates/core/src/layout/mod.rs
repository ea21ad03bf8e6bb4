//! Slot tables for the shrinking-perspective stack.
//!
//! The centre slot (`slot_count / 2`) is the largest; every step away from it
//! halves the scale. Sizes and vertical offsets are derived from the scales
//! once per configuration and reused by the placement resolver.

use serde::{Deserialize, Serialize};

use crate::{CarouselError, Result};

/// Largest slot count whose scales stay strictly decreasing in `f32`.
pub const MAX_SLOT_COUNT: usize = 255;

/// Default viewport width used when only a height is configured.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

/// Immutable description of the carousel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub slot_count: usize,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl LayoutConfig {
    /// Scale of the centre slot.
    pub const BASE_SCALE: f32 = 0.25;
    /// Gap between neighbouring slots, in pixels.
    pub const MARGIN: i32 = 10;

    pub fn new(slot_count: usize, viewport_height: f32) -> Self {
        Self {
            slot_count,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height,
        }
    }

    pub fn with_viewport_width(mut self, viewport_width: f32) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    /// Index of the largest slot.
    pub fn center(&self) -> usize {
        self.slot_count / 2
    }

    pub fn validate(&self) -> Result<()> {
        if self.slot_count < 1 {
            return Err(CarouselError::config("slot count must be at least 1"));
        }
        if self.slot_count > MAX_SLOT_COUNT {
            return Err(CarouselError::config(format!(
                "slot count {} exceeds the maximum of {MAX_SLOT_COUNT}",
                self.slot_count
            )));
        }
        if !is_positive(self.viewport_height) {
            return Err(CarouselError::config(format!(
                "viewport height must be positive, got {}",
                self.viewport_height
            )));
        }
        if !is_positive(self.viewport_width) {
            return Err(CarouselError::config(format!(
                "viewport width must be positive, got {}",
                self.viewport_width
            )));
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Scale, size and position tables for one [`LayoutConfig`].
///
/// Positions are stored relative to the vertical centre of the viewport. Use
/// [`LayoutTables::absolute_y`] for viewport coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutTables {
    config: LayoutConfig,
    scales: Vec<f32>,
    sizes: Vec<u32>,
    positions: Vec<i32>,
}

impl LayoutTables {
    /// Builds the tables for `config`.
    ///
    /// Values are computed per distance from the centre and written to both
    /// mirrored indices. With an even slot count the bottom mirror of the
    /// outermost ring falls past the end and is skipped, so the table reads
    /// as the next odd count with its last slot dropped.
    pub fn build(config: &LayoutConfig) -> Result<Self> {
        config.validate()?;

        let n = config.slot_count;
        let center = config.center();
        let mut scales = vec![0.0_f32; n];
        let mut sizes = vec![0_u32; n];
        let mut positions = vec![0_i32; n];

        let mut offset = 0_i64;
        let mut previous_size = 0_u32;
        for distance in 0..=center {
            let scale = LayoutConfig::BASE_SCALE * 0.5_f32.powi(distance as i32);
            let size = slot_size(scale, config.viewport_height)?;

            if distance > 0 {
                offset += i64::from(previous_size / 2)
                    + i64::from(size / 2)
                    + i64::from(LayoutConfig::MARGIN);
            }
            previous_size = size;
            let position = i32::try_from(offset).map_err(|_| {
                CarouselError::config(format!(
                    "viewport height {} places slots beyond the representable range",
                    config.viewport_height
                ))
            })?;

            for (index, sign) in mirrored(center, distance, n) {
                scales[index] = scale;
                sizes[index] = size;
                positions[index] = sign * position;
            }
        }

        tracing::debug!(?scales, ?sizes, ?positions, "built carousel tables");

        Ok(Self {
            config: *config,
            scales,
            sizes,
            positions,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn slot_count(&self) -> usize {
        self.config.slot_count
    }

    pub fn center(&self) -> usize {
        self.config.center()
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// Offsets relative to the vertical centre of the viewport.
    pub fn positions(&self) -> &[i32] {
        &self.positions
    }

    /// Returns an error unless `slot` lies within `[0, slot_count)`.
    pub fn check_slot(&self, slot: usize) -> Result<()> {
        if slot < self.slot_count() {
            Ok(())
        } else {
            Err(CarouselError::SlotIndexOutOfRange {
                index: slot,
                slot_count: self.slot_count(),
            })
        }
    }

    pub fn scale(&self, slot: usize) -> Result<f32> {
        self.check_slot(slot)?;
        Ok(self.scales[slot])
    }

    pub fn size(&self, slot: usize) -> Result<u32> {
        self.check_slot(slot)?;
        Ok(self.sizes[slot])
    }

    pub fn relative_position(&self, slot: usize) -> Result<i32> {
        self.check_slot(slot)?;
        Ok(self.positions[slot])
    }

    /// Vertical viewport coordinate of `slot`, offset by half the viewport
    /// height.
    pub fn absolute_y(&self, slot: usize) -> Result<f32> {
        let relative = self.relative_position(slot)?;
        Ok(self.config.viewport_height / 2.0 + relative as f32)
    }

    /// Horizontal viewport coordinate shared by every slot.
    pub fn center_x(&self) -> f32 {
        self.config.viewport_width / 2.0
    }
}

/// Whole-pixel size of a slot at `scale`, or an error when it does not fit
/// in a `u32`.
fn slot_size(scale: f32, viewport_height: f32) -> Result<u32> {
    let size = (f64::from(scale) * f64::from(viewport_height)).floor();
    if size <= f64::from(u32::MAX) {
        Ok(size as u32)
    } else {
        Err(CarouselError::config(format!(
            "viewport height {viewport_height} gives a slot size of {size} pixels"
        )))
    }
}

/// In-range indices at `distance` from `center`, paired with the sign of
/// their offset. Below the centre is positive.
fn mirrored(center: usize, distance: usize, len: usize) -> impl Iterator<Item = (usize, i32)> {
    let below = Some((center + distance, 1));
    let above = (distance > 0).then(|| (center - distance, -1));
    below
        .into_iter()
        .chain(above)
        .filter(move |(index, _)| *index < len)
}
