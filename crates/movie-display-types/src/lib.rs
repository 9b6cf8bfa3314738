//! Shared value types for the movie display crates.

mod descriptor;
mod fit;

pub use descriptor::{ImageRef, PlaybackDescriptor};
pub use fit::fit_dimensions;
