//! Grouped, server-synchronized movie playback for in-world screens.
//!
//! Each screen is a [`DisplaySurface`] bound to a [`MovieDisplay`] entity.
//! Surfaces sharing a non-empty group name form one logical channel: exactly
//! one of them (the master) owns the decode resource, the rest mirror its
//! [`PlaybackDescriptor`](movie_display_types::PlaybackDescriptor) snapshot.
//! The [`ScreenSystem`] drives everything from a single cooperative tick.

pub mod display;
pub mod error;
mod group;
pub mod playback;
pub mod registry;
pub mod settings;
pub mod surface;
pub mod system;

pub use display::MovieDisplay;
pub use error::ScreenError;
pub use playback::{LOOP_REWIND_WINDOW, Playback, PlaybackState};
pub use registry::{Arena, Handle};
pub use settings::{ConfigError, DisplayConfig, Layout, load_layout};
pub use surface::{DisplaySurface, PaintInfo, SurfaceId, TextureId};
pub use system::{DisplayId, ScreenSystem, SimulationState};
