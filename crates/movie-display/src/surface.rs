//! One rendering target showing a movie.

use movie_display_types::{ImageRef, PlaybackDescriptor, fit_dimensions};

use crate::display::MovieDisplay;
use crate::playback::Playback;
use crate::registry::Handle;

/// Texture slot bound for the external painter. Allocation is a monotone
/// counter; the real id pool belongs to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

pub type SurfaceId = Handle<DisplaySurface>;

/// A display surface bound to a world entity. Created when a screen is
/// attached, destroyed with it; group membership follows this lifecycle
/// exactly.
pub struct DisplaySurface {
    pub(crate) entity: Handle<MovieDisplay>,
    pub(crate) wide: u32,
    pub(crate) tall: u32,

    pub(crate) initialized: bool,
    pub(crate) follower: bool,
    pub(crate) master: Option<SurfaceId>,

    /// Present only on masters that managed to create their resource.
    pub(crate) playback: Option<Playback>,
    pub(crate) descriptor: PlaybackDescriptor,
    pub(crate) playback_width: u32,
    pub(crate) playback_height: u32,
    pub(crate) texture: Option<TextureId>,

    pub(crate) last_active: bool,
    pub(crate) black_background: bool,
}

impl DisplaySurface {
    pub(crate) fn new(entity: Handle<MovieDisplay>, wide: u32, tall: u32) -> Self {
        Self {
            entity,
            wide,
            tall,
            initialized: false,
            follower: false,
            master: None,
            playback: None,
            descriptor: PlaybackDescriptor::default(),
            playback_width: 0,
            playback_height: 0,
            texture: None,
            last_active: false,
            black_background: true,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Masters own the decode resource. Ungrouped surfaces and surfaces
    /// whose creation failed still report master intent.
    pub fn is_master(&self) -> bool {
        !self.follower
    }

    pub fn master(&self) -> Option<SurfaceId> {
        self.master
    }

    pub fn descriptor(&self) -> PlaybackDescriptor {
        self.descriptor
    }

    pub fn playback_dimensions(&self) -> (u32, u32) {
        (self.playback_width, self.playback_height)
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Adopt a descriptor and refit it to this surface's own container,
    /// which may differ from the master's.
    pub(crate) fn apply_descriptor(&mut self, descriptor: PlaybackDescriptor) {
        self.descriptor = descriptor;
        let (width, height) = fit_dimensions(
            self.wide,
            self.tall,
            descriptor.source_width,
            descriptor.source_height,
        );
        self.playback_width = width;
        self.playback_height = height;
    }

    /// Top-left corner that centers the fitted playback rectangle.
    pub(crate) fn panel_position(&self) -> (i32, i32) {
        (
            ((self.wide - self.playback_width) / 2) as i32,
            ((self.tall - self.playback_height) / 2) as i32,
        )
    }
}

/// Everything the external painter needs for one surface this tick.
#[derive(Debug, Clone, Copy)]
pub struct PaintInfo {
    pub texture: TextureId,
    pub image: ImageRef,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub max_u: f32,
    pub max_v: f32,
    pub black_background: bool,
}
