use std::fmt;

/// Opaque reference to a decoded-frame image owned by a video backend.
///
/// The zero value stands for "no image", matching a display that never
/// managed to create its playback resource.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ImageRef(u64);

impl ImageRef {
    pub const NONE: ImageRef = ImageRef(0);

    pub fn from_raw(raw: u64) -> Self {
        ImageRef(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageRef({})", self.0)
    }
}

/// Snapshot a master surface shares with its followers: the current frame
/// image, the source dimensions and the valid texture-coordinate extent
/// (origin is implicitly 0,0).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackDescriptor {
    pub image: ImageRef,
    pub source_width: u32,
    pub source_height: u32,
    pub max_u: f32,
    pub max_v: f32,
}

impl PlaybackDescriptor {
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }
}
