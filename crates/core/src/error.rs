/// Result alias that carries the custom [`CarouselError`] type.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Common error type for the carousel engine.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// Slot count below one, or a viewport dimension that is not a finite
    /// positive number.
    #[error("invalid carousel configuration: {0}")]
    InvalidConfiguration(String),
    /// A slot index outside `[0, slot_count)`.
    #[error("slot index {index} is out of range for a carousel with {slot_count} slots")]
    SlotIndexOutOfRange { index: usize, slot_count: usize },
    /// The natural size of an item cannot be scaled (zero, negative or NaN).
    #[error("item geometry {width}x{height} cannot be scaled")]
    InvalidItemGeometry { width: f32, height: f32 },
    /// Free-form failure reported by a collaborator such as a cover loader.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Malformed configuration file.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl CarouselError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn config<T: Into<String>>(reason: T) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

impl From<&str> for CarouselError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for CarouselError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
