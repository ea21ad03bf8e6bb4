use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    layout::{LayoutConfig, DEFAULT_VIEWPORT_WIDTH},
    CarouselState, ItemSize, Result, TransitionTiming,
};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub carousel: CarouselConfig,
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Configuration specific to the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub slots: usize,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub transition: TransitionTiming,
    /// Size assumed for covers that cannot be measured.
    pub placeholder_size: ItemSize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slots: 5,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: 768.0,
            transition: TransitionTiming::default(),
            placeholder_size: ItemSize::default(),
        }
    }
}

impl CarouselConfig {
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig::new(self.slots, self.viewport_height).with_viewport_width(self.viewport_width)
    }

    /// Builds an empty carousel from this configuration.
    pub fn build(&self) -> Result<CarouselState> {
        CarouselState::new(self.layout(), self.transition)
    }
}
