//! In-memory backend with a probe for observing backend traffic.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use movie_display_types::ImageRef;
use parking_lot::Mutex;

use crate::core::{
    CreateError, DynVideoMaterial, FrameAdvance, PlaybackFlags, VideoBackend, VideoMaterial,
};

/// Scripted properties of one mock video file.
#[derive(Debug, Clone, Copy)]
pub struct MockSource {
    pub width: u32,
    pub height: u32,
    pub max_u: f32,
    pub max_v: f32,
    pub duration: f32,
    pub frame_step: f32,
    /// Report `FrameAdvance::Failed` once this many frames have been decoded.
    pub fail_after_frames: Option<u64>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            max_u: 1.0,
            max_v: 1.0,
            duration: 2.0,
            frame_step: 1.0 / 30.0,
            fail_after_frames: None,
        }
    }
}

#[derive(Debug, Default)]
struct ProbeState {
    next_image: u64,
    created: Vec<String>,
    destroyed: Vec<String>,
    pause_calls: Vec<(String, bool)>,
    seeks: Vec<(String, f32)>,
    times: HashMap<String, f32>,
}

/// Shared view into everything a [`MockBackend`] and its materials did.
#[derive(Clone, Debug, Default)]
pub struct MockProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl MockProbe {
    pub fn created(&self) -> Vec<String> {
        self.state.lock().created.clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.state.lock().destroyed.clone()
    }

    pub fn live_materials(&self) -> usize {
        let state = self.state.lock();
        state.created.len() - state.destroyed.len()
    }

    pub fn pause_calls(&self) -> Vec<(String, bool)> {
        self.state.lock().pause_calls.clone()
    }

    pub fn seeks(&self) -> Vec<(String, f32)> {
        self.state.lock().seeks.clone()
    }

    /// Last playback position a material reported, by material id.
    pub fn current_time(&self, id: &str) -> Option<f32> {
        self.state.lock().times.get(id).copied()
    }
}

/// Backend whose materials play scripted files and report everything to a
/// [`MockProbe`].
#[derive(Default)]
pub struct MockBackend {
    sources: HashMap<String, MockSource>,
    failing: HashSet<String>,
    probe: MockProbe,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> MockProbe {
        self.probe.clone()
    }

    /// Script the properties of `filename`; unscripted files decode with
    /// [`MockSource::default`].
    pub fn with_source(mut self, filename: &str, source: MockSource) -> Self {
        self.sources.insert(filename.to_string(), source);
        self
    }

    /// Make every creation request for `filename` fail.
    pub fn fail_creation(mut self, filename: &str) -> Self {
        self.failing.insert(filename.to_string());
        self
    }
}

impl VideoBackend for MockBackend {
    fn create_material(
        &mut self,
        id: &str,
        filename: &str,
        _flags: PlaybackFlags,
    ) -> Result<DynVideoMaterial, CreateError> {
        if self.failing.contains(filename) {
            return Err(CreateError {
                id: id.to_string(),
                filename: filename.to_string(),
                reason: "creation disabled by test script".to_string(),
            });
        }

        let source = self.sources.get(filename).copied().unwrap_or_default();
        let image = {
            let mut state = self.probe.state.lock();
            state.created.push(id.to_string());
            state.times.insert(id.to_string(), 0.0);
            state.next_image += 1;
            ImageRef::from_raw(state.next_image)
        };

        Ok(Box::new(MockMaterial {
            id: id.to_string(),
            source,
            image,
            time: 0.0,
            frames: 0,
            paused: false,
            probe: self.probe.clone(),
        }))
    }
}

#[derive(Debug)]
struct MockMaterial {
    id: String,
    source: MockSource,
    image: ImageRef,
    time: f32,
    frames: u64,
    paused: bool,
    probe: MockProbe,
}

impl MockMaterial {
    fn publish_time(&self) {
        self.probe
            .state
            .lock()
            .times
            .insert(self.id.clone(), self.time);
    }
}

impl VideoMaterial for MockMaterial {
    fn advance_frame(&mut self) -> FrameAdvance {
        if let Some(limit) = self.source.fail_after_frames
            && self.frames >= limit
        {
            return FrameAdvance::Failed;
        }
        if self.time >= self.source.duration {
            return FrameAdvance::EndOfStream;
        }
        self.time += self.source.frame_step;
        self.frames += 1;
        self.publish_time();
        FrameAdvance::Advanced
    }

    fn seek(&mut self, seconds: f32) {
        self.time = seconds;
        self.publish_time();
        self.probe
            .state
            .lock()
            .seeks
            .push((self.id.clone(), seconds));
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.probe
            .state
            .lock()
            .pause_calls
            .push((self.id.clone(), paused));
    }

    fn source_size(&self) -> (u32, u32) {
        (self.source.width, self.source.height)
    }

    fn valid_uv(&self) -> (f32, f32) {
        (self.source.max_u, self.source.max_v)
    }

    fn image(&self) -> ImageRef {
        self.image
    }

    fn current_time(&self) -> f32 {
        self.time
    }

    fn duration(&self) -> f32 {
        self.source.duration
    }
}

impl Drop for MockMaterial {
    fn drop(&mut self) {
        self.probe.state.lock().destroyed.push(self.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_creation_failure_is_reported() {
        let mut backend = MockBackend::new().fail_creation("broken.bik");
        let err = backend
            .create_material("broken.bik_lobby", "broken.bik", PlaybackFlags::default())
            .unwrap_err();
        assert_eq!(err.id, "broken.bik_lobby");
        assert_eq!(err.filename, "broken.bik");
    }

    #[test]
    fn materials_advance_until_end_of_stream() {
        let mut backend = MockBackend::new().with_source(
            "clip.bik",
            MockSource {
                duration: 0.2,
                frame_step: 0.1,
                ..MockSource::default()
            },
        );
        let mut material = backend
            .create_material("clip.bik", "clip.bik", PlaybackFlags::default())
            .unwrap();

        assert_eq!(material.advance_frame(), FrameAdvance::Advanced);
        assert_eq!(material.advance_frame(), FrameAdvance::Advanced);
        assert_eq!(material.advance_frame(), FrameAdvance::EndOfStream);
    }

    #[test]
    fn probe_records_backend_traffic_and_drop() {
        let mut backend = MockBackend::new();
        let probe = backend.probe();
        {
            let mut material = backend
                .create_material("clip.bik", "clip.bik", PlaybackFlags::default())
                .unwrap();
            material.set_paused(true);
            material.seek(0.0);
        }
        assert_eq!(probe.created(), vec!["clip.bik".to_string()]);
        assert_eq!(probe.pause_calls(), vec![("clip.bik".to_string(), true)]);
        assert_eq!(probe.seeks(), vec![("clip.bik".to_string(), 0.0)]);
        assert_eq!(probe.destroyed(), vec!["clip.bik".to_string()]);
        assert_eq!(probe.live_materials(), 0);
    }

    #[test]
    fn distinct_materials_get_distinct_images() {
        let mut backend = MockBackend::new();
        let a = backend
            .create_material("a.bik", "a.bik", PlaybackFlags::default())
            .unwrap();
        let b = backend
            .create_material("b.bik", "b.bik", PlaybackFlags::default())
            .unwrap();
        assert_ne!(a.image(), b.image());
        assert!(!a.image().is_none());
    }
}
