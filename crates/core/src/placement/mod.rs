//! Transforms and transitions for items sitting in carousel slots.

use serde::{Deserialize, Serialize};

use crate::{layout::LayoutTables, CarouselError, Result};

/// Natural (unscaled) size of a displayable item in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSize {
    pub width: f32,
    pub height: f32,
}

impl ItemSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns an error unless both dimensions are finite and positive.
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(CarouselError::InvalidItemGeometry {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for ItemSize {
    fn default() -> Self {
        Self::new(256.0, 256.0)
    }
}

/// Position and scale applied to an item by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Transform {
    /// Transform at `(x, y)` that makes an item of `natural` size appear as
    /// `width` by `height` pixels.
    pub fn with_apparent_size(
        x: f32,
        y: f32,
        natural: ItemSize,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        natural.validate()?;
        Ok(Self {
            x,
            y,
            scale_x: width / natural.width,
            scale_y: height / natural.height,
        })
    }

    /// On-screen size of an item of `natural` size under this transform,
    /// truncated to whole pixels.
    pub fn apparent_size(&self, natural: ItemSize) -> (u32, u32) {
        (
            (natural.width * self.scale_x) as u32,
            (natural.height * self.scale_y) as u32,
        )
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Transform, t: f32) -> Transform {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Transform {
            x: mix(self.x, other.x),
            y: mix(self.y, other.y),
            scale_x: mix(self.scale_x, other.scale_x),
            scale_y: mix(self.scale_y, other.scale_y),
        }
    }
}

/// Duration and frame rate used for slot-to-slot moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTiming {
    pub duration_ms: u32,
    pub fps: u32,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            fps: 60,
        }
    }
}

/// Two-point animation path handed to the host. The engine never plays it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub source: Transform,
    pub target: Transform,
    pub duration_ms: u32,
    pub fps: u32,
}

impl Transition {
    /// Transform at `progress` in `[0, 1]` along a linear ramp.
    pub fn sample(&self, progress: f32) -> Transform {
        self.source.lerp(&self.target, progress)
    }

    /// Frames the host should render to play the transition at its frame
    /// rate, rounded up.
    pub fn frame_count(&self) -> u32 {
        (u64::from(self.duration_ms) * u64::from(self.fps)).div_ceil(1000) as u32
    }
}

/// Transform of an item of `natural` size sitting in `slot`.
///
/// The item is centred horizontally and its height is fitted to the slot's
/// size, keeping the natural aspect ratio. `y` is an absolute viewport
/// coordinate.
pub fn resolve(tables: &LayoutTables, slot: usize, natural: ItemSize) -> Result<Transform> {
    let target_height = tables.size(slot)? as f32;
    natural.validate()?;

    let factor = target_height / natural.height;
    let target_width = (natural.width * factor).floor();

    Transform::with_apparent_size(
        tables.center_x(),
        tables.absolute_y(slot)?,
        natural,
        target_width,
        target_height,
    )
}

/// Animation path for an item moving from `previous_slot` to `slot`.
pub fn resolve_transition(
    tables: &LayoutTables,
    slot: usize,
    previous_slot: usize,
    natural: ItemSize,
    timing: TransitionTiming,
) -> Result<Transition> {
    let source = resolve(tables, previous_slot, natural)?;
    let target = resolve(tables, slot, natural)?;
    Ok(Transition {
        source,
        target,
        duration_ms: timing.duration_ms,
        fps: timing.fps,
    })
}
