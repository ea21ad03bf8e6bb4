//! Layout engine for a scaled cover carousel.
//!
//! Covers are stacked vertically with the largest in the centre slot and
//! every slot further out at half the previous scale. The crate computes the
//! slot tables, the transform of an item in any slot and the transitions
//! produced when a new stream is pushed. Rendering and animation playback are
//! left to the host; every call is synchronous and returns plain data.

pub mod assets;
pub mod carousel;
pub mod config;
pub mod error;
pub mod layout;
pub mod placement;
pub mod stream;

pub use assets::{CoverMetrics, CoverStore, FixedCoverMetrics};
pub use carousel::{CarouselState, ItemMove, ItemPlacement, PushOutcome, Relayout};
pub use config::{AppConfig, CarouselConfig};
pub use error::{CarouselError, Result};
pub use layout::{LayoutConfig, LayoutTables};
pub use placement::{resolve, resolve_transition, ItemSize, Transform, Transition, TransitionTiming};
pub use stream::{Item, ItemId, Stream};
