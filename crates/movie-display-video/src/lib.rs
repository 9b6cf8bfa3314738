//! Decode-backend seam for movie display surfaces.
//!
//! The coordination core never decodes video itself; it talks to a
//! [`VideoBackend`] that hands out exclusively-owned [`VideoMaterial`]s.
//! Production backends live with the host engine. This crate ships the
//! trait surface plus a scriptable mock used by tests and demos.

pub mod backends;
mod core;

pub use backends::mock::{MockBackend, MockProbe, MockSource};
pub use self::core::{
    CreateError, DynVideoBackend, DynVideoMaterial, FrameAdvance, PlaybackFlags, VideoBackend,
    VideoMaterial,
};
