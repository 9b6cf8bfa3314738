//! The per-tick driver that owns every live display and surface.
//!
//! Each tick runs strictly sequentially: for every surface, group
//! resolution first (a no-op once it has succeeded), then the playback
//! update. Ordering across surfaces is registry order and deliberately
//! unspecified; a follower finding a master that was elected earlier in
//! the same tick is an expected outcome.

use movie_display_types::PlaybackDescriptor;
use movie_display_video::DynVideoBackend;
use tracing::{debug, warn};

use crate::display::MovieDisplay;
use crate::group::group_ids_match;
use crate::playback::Playback;
use crate::registry::{Arena, Handle};
use crate::surface::{DisplaySurface, PaintInfo, SurfaceId, TextureId};

pub type DisplayId = Handle<MovieDisplay>;

/// Host simulation facts that gate playback in single-participant play.
#[derive(Debug, Clone, Copy)]
pub struct SimulationState {
    pub max_clients: u32,
    pub paused: bool,
    pub console_open: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            max_clients: 1,
            paused: false,
            console_open: false,
        }
    }
}

pub struct ScreenSystem {
    backend: DynVideoBackend,
    displays: Arena<MovieDisplay>,
    surfaces: Arena<DisplaySurface>,
    sim: SimulationState,
    time: f32,
    next_texture: u32,
}

impl ScreenSystem {
    pub fn new(backend: DynVideoBackend) -> Self {
        Self {
            backend,
            displays: Arena::new(),
            surfaces: Arena::new(),
            sim: SimulationState::default(),
            time: 0.0,
            next_texture: 0,
        }
    }

    pub fn simulation(&self) -> SimulationState {
        self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut SimulationState {
        &mut self.sim
    }

    pub fn current_time(&self) -> f32 {
        self.time
    }

    pub fn spawn_display(&mut self, display: MovieDisplay) -> DisplayId {
        self.displays.insert(display)
    }

    /// Remove a display entity. Surfaces still holding its handle see an
    /// unresolved entity from now on: unresolved surfaces keep deferring,
    /// initialized masters read as inactive and pause on the next edge.
    pub fn destroy_display(&mut self, id: DisplayId) {
        self.displays.remove(id);
    }

    pub fn display(&self, id: DisplayId) -> Option<&MovieDisplay> {
        self.displays.get(id)
    }

    pub fn enable(&mut self, id: DisplayId) {
        if let Some(display) = self.displays.get_mut(id) {
            display.enable();
        }
    }

    pub fn disable(&mut self, id: DisplayId) {
        if let Some(display) = self.displays.get_mut(id) {
            display.disable();
        }
    }

    pub fn pause_movie(&mut self, id: DisplayId) {
        if let Some(display) = self.displays.get_mut(id) {
            display.pause_movie();
        }
    }

    pub fn unpause_movie(&mut self, id: DisplayId) {
        let now = self.time;
        if let Some(display) = self.displays.get_mut(id) {
            display.unpause_movie(now);
        }
    }

    pub fn create_surface(&mut self, entity: DisplayId, wide: u32, tall: u32) -> SurfaceId {
        self.surfaces.insert(DisplaySurface::new(entity, wide, tall))
    }

    /// Tear a surface down. Dropping it releases its decode material (if it
    /// was a master) and its texture binding.
    pub fn destroy_surface(&mut self, id: SurfaceId) {
        self.surfaces.remove(id);
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&DisplaySurface> {
        self.surfaces.get(id)
    }

    pub fn surface_ids(&self) -> Vec<SurfaceId> {
        self.surfaces.handles()
    }

    /// Advance the whole system by one update pass.
    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
        for id in self.surfaces.handles() {
            self.resolve_surface(id);
            self.update_surface(id);
        }
    }

    /// Classify a surface as group master or follower. Runs until it
    /// succeeds once; after that it is a no-op for the surface's lifetime.
    fn resolve_surface(&mut self, id: SurfaceId) {
        let Some(surface) = self.surfaces.get(id) else {
            return;
        };
        if surface.initialized {
            return;
        }

        // Unresolved owning entity: try again next tick.
        let Some(display) = self.displays.get(surface.entity) else {
            return;
        };
        let group = display.group_name().to_string();
        let filename = display.filename().to_string();
        let looping = display.is_looping();
        let auto_start = display.is_auto_start();

        // An empty group never matches anything; such surfaces skip the
        // scan and are always their own masters.
        let mut found: Option<(SurfaceId, PlaybackDescriptor)> = None;
        if !group.is_empty() {
            for (other_id, other) in self.surfaces.iter() {
                if other_id == id {
                    continue;
                }
                let Some(other_display) = self.displays.get(other.entity) else {
                    continue;
                };
                if !group_ids_match(&group, other_display.group_name()) {
                    continue;
                }
                // First initialized master in registry order wins.
                if other.initialized && other.is_master() {
                    found = Some((other_id, other.descriptor));
                    break;
                }
            }
        }

        match found {
            Some((master_id, descriptor)) => {
                let texture = self.alloc_texture();
                let Some(surface) = self.surfaces.get_mut(id) else {
                    return;
                };
                surface.follower = true;
                surface.master = Some(master_id);
                surface.apply_descriptor(descriptor);
                surface.texture = Some(texture);
                surface.initialized = true;
                debug!(group = %group, "surface joined group as follower");
            }
            None => {
                match Playback::create(
                    self.backend.as_mut(),
                    &filename,
                    &group,
                    looping,
                    auto_start,
                ) {
                    Ok(playback) => {
                        let texture = self.alloc_texture();
                        let descriptor = playback.descriptor();
                        let Some(surface) = self.surfaces.get_mut(id) else {
                            return;
                        };
                        surface.follower = false;
                        surface.playback = Some(playback);
                        surface.apply_descriptor(descriptor);
                        surface.texture = Some(texture);
                        surface.initialized = true;
                        debug!(filename = %filename, group = %group, "surface became group master");
                    }
                    Err(err) => {
                        // Terminal for this surface: it stays initialized,
                        // master-intended, and renders nothing.
                        warn!(filename = %filename, error = %err, "failed to begin movie playback");
                        let Some(surface) = self.surfaces.get_mut(id) else {
                            return;
                        };
                        surface.follower = false;
                        surface.initialized = true;
                    }
                }
            }
        }
    }

    fn update_surface(&mut self, id: SurfaceId) {
        enum Plan {
            Follower(SurfaceId),
            Master(bool),
        }

        let plan = {
            let Some(surface) = self.surfaces.get(id) else {
                return;
            };
            if !surface.initialized {
                return;
            }
            if surface.follower {
                let Some(master_id) = surface.master else {
                    return;
                };
                Plan::Follower(master_id)
            } else {
                if surface.playback.is_none() {
                    return;
                }
                Plan::Master(self.computed_active(surface))
            }
        };

        match plan {
            Plan::Follower(master_id) => {
                // Re-snapshot the master's descriptor; followers never own
                // or mutate the shared state.
                let Some(descriptor) = self.surfaces.get(master_id).map(|m| m.descriptor) else {
                    return;
                };
                let Some(surface) = self.surfaces.get_mut(id) else {
                    return;
                };
                if descriptor != surface.descriptor {
                    surface.apply_descriptor(descriptor);
                }
            }
            Plan::Master(active) => {
                let Some(surface) = self.surfaces.get_mut(id) else {
                    return;
                };
                let edge = active != surface.last_active;
                surface.last_active = active;

                let mut descriptor = None;
                if let Some(playback) = surface.playback.as_mut() {
                    if edge {
                        playback.set_active(active);
                    }
                    if active {
                        playback.tick();
                    }
                    descriptor = Some(playback.descriptor());
                }
                if let Some(descriptor) = descriptor
                    && descriptor != surface.descriptor
                {
                    surface.apply_descriptor(descriptor);
                }
            }
        }
    }

    /// Activity is computed, never stored as authoritative input: the
    /// screen must be enabled, its data source playing, and in
    /// single-participant play the simulation neither paused nor behind
    /// the console.
    fn computed_active(&self, surface: &DisplaySurface) -> bool {
        let Some(display) = self.displays.get(surface.entity) else {
            return false;
        };
        let mut active = display.is_enabled();
        if !display.is_playing() {
            active = false;
        }
        if self.sim.max_clients == 1 && (self.sim.paused || self.sim.console_open) {
            active = false;
        }
        active
    }

    /// Snapshot for the external painter: bound texture, centered
    /// destination rectangle and the valid UV extent.
    pub fn paint_info(&self, id: SurfaceId) -> Option<PaintInfo> {
        let surface = self.surfaces.get(id)?;
        let texture = surface.texture?;
        let (x, y) = surface.panel_position();
        Some(PaintInfo {
            texture,
            image: surface.descriptor.image,
            x,
            y,
            width: surface.playback_width,
            height: surface.playback_height,
            max_u: surface.descriptor.max_u,
            max_v: surface.descriptor.max_v,
            black_background: surface.black_background,
        })
    }

    fn alloc_texture(&mut self) -> TextureId {
        self.next_texture += 1;
        TextureId(self.next_texture)
    }
}
