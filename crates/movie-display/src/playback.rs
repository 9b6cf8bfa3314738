//! Master-side playback state machine.
//!
//! Exactly one surface per group owns a `Playback`; followers only ever see
//! the descriptor snapshot it publishes.

use movie_display_types::PlaybackDescriptor;
use movie_display_video::{DynVideoMaterial, FrameAdvance, PlaybackFlags, VideoBackend};

use crate::error::ScreenError;

/// Seconds from the end at which a looping movie seeks back to zero.
/// Native backend looping is unreliable, so the loop is an explicit rewind.
pub const LOOP_REWIND_WINDOW: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    /// Terminal: the stream ended without looping, or the backend failed
    /// mid-playback. The material is kept (the last frame stays visible)
    /// but nothing advances and activity edges are ignored.
    Stopped,
}

pub struct Playback {
    material: DynVideoMaterial,
    descriptor: PlaybackDescriptor,
    looping: bool,
    state: PlaybackState,
}

impl Playback {
    /// Material identifier for one logical channel: the filename alone for
    /// ungrouped screens, `{filename}_{group}` otherwise, so two groups
    /// playing the same file never share a decode resource.
    pub fn material_id(filename: &str, group: &str) -> String {
        if group.is_empty() {
            filename.to_string()
        } else {
            format!("{filename}_{group}")
        }
    }

    /// Request a decode material and capture its descriptor. Enters
    /// `Paused` unless `auto_start`.
    pub fn create(
        backend: &mut dyn VideoBackend,
        filename: &str,
        group: &str,
        looping: bool,
        auto_start: bool,
    ) -> Result<Self, ScreenError> {
        let id = Self::material_id(filename, group);
        let flags = PlaybackFlags {
            loop_video: looping,
            no_audio: false,
        };
        let mut material = backend.create_material(&id, filename, flags)?;

        if !auto_start {
            material.set_paused(true);
        }

        let (source_width, source_height) = material.source_size();
        let (max_u, max_v) = material.valid_uv();
        let descriptor = PlaybackDescriptor {
            image: material.image(),
            source_width,
            source_height,
            max_u,
            max_v,
        };

        Ok(Self {
            material,
            descriptor,
            looping,
            state: if auto_start {
                PlaybackState::Playing
            } else {
                PlaybackState::Paused
            },
        })
    }

    pub fn descriptor(&self) -> PlaybackDescriptor {
        self.descriptor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Apply a computed activity value. Only a Playing⇄Paused transition
    /// reaches the backend; repeated calls with the same value do nothing.
    pub fn set_active(&mut self, active: bool) {
        match (self.state, active) {
            (PlaybackState::Paused, true) => {
                self.material.set_paused(false);
                self.state = PlaybackState::Playing;
            }
            (PlaybackState::Playing, false) => {
                self.material.set_paused(true);
                self.state = PlaybackState::Paused;
            }
            _ => {}
        }
    }

    /// Advance one frame. Driven only while the owning surface is active.
    pub fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }

        match self.material.advance_frame() {
            FrameAdvance::Advanced => {
                if self.looping {
                    let current = self.material.current_time();
                    if current + LOOP_REWIND_WINDOW >= self.material.duration() {
                        self.material.seek(0.0);
                    }
                }
            }
            FrameAdvance::EndOfStream => {
                if self.looping {
                    self.material.seek(0.0);
                } else {
                    self.state = PlaybackState::Stopped;
                }
            }
            FrameAdvance::Failed => {
                self.state = PlaybackState::Stopped;
            }
        }
    }
}
