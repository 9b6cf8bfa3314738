use movie_display_video::CreateError;
use thiserror::Error;

/// Failures surfaced to the per-tick driver. A single surface failing never
/// halts the others; the driver logs and moves on.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The decode backend rejected the request. The surface stays
    /// initialized but holds no playback resource and renders nothing
    /// until it is recreated externally.
    #[error("movie playback resource creation failed")]
    ResourceCreation(#[from] CreateError),
}
