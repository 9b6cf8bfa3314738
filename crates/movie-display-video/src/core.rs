use movie_display_types::ImageRef;
use thiserror::Error;

/// The backend rejected a material creation request.
#[derive(Debug, Error)]
#[error("failed to create video material '{id}' from '{filename}': {reason}")]
pub struct CreateError {
    pub id: String,
    pub filename: String,
    pub reason: String,
}

/// Outcome of advancing a material by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAdvance {
    Advanced,
    EndOfStream,
    Failed,
}

/// Creation-time options for a material.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackFlags {
    pub loop_video: bool,
    pub no_audio: bool,
}

/// One decode resource. Exclusively owned by whoever created it; dropping
/// the material releases the resource.
pub trait VideoMaterial: std::fmt::Debug {
    fn advance_frame(&mut self) -> FrameAdvance;
    fn seek(&mut self, seconds: f32);
    fn set_paused(&mut self, paused: bool);

    fn source_size(&self) -> (u32, u32);
    /// Valid texture-coordinate extent within the image sheet, origin 0,0.
    fn valid_uv(&self) -> (f32, f32);
    fn image(&self) -> ImageRef;

    fn current_time(&self) -> f32;
    fn duration(&self) -> f32;
}

pub type DynVideoMaterial = Box<dyn VideoMaterial>;

/// Factory for decode materials, keyed by a caller-chosen identifier so
/// logically distinct channels never share a resource.
pub trait VideoBackend {
    fn create_material(
        &mut self,
        id: &str,
        filename: &str,
        flags: PlaybackFlags,
    ) -> Result<DynVideoMaterial, CreateError>;
}

pub type DynVideoBackend = Box<dyn VideoBackend>;
