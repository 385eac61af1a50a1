//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod snapshot;

pub use bar::Bar;
pub use indicators::{ReturnIndicator, SmaIndicator};
pub use snapshot::RankedEntry;
