//! The world-entity side of a movie display: the data source surfaces read
//! and the command surface the map logic drives.

/// Per-display data source. Screens sharing a non-empty group name tune to
/// the same channel; the coordination core reads these fields and never
/// writes them except through the explicit commands below.
#[derive(Debug, Clone)]
pub struct MovieDisplay {
    filename: String,
    group_name: String,
    screen_width: u32,
    screen_height: u32,
    looping: bool,
    auto_start: bool,
    enabled: bool,
    playing: bool,
    // Recorded when playback is unpaused so late joiners can synchronize.
    start_playback_time: f32,
}

impl MovieDisplay {
    /// Displays spawn disabled and not playing; `enable` and
    /// `unpause_movie` switch them on.
    pub fn new(
        filename: impl Into<String>,
        group_name: impl Into<String>,
        screen_width: u32,
        screen_height: u32,
        looping: bool,
        auto_start: bool,
    ) -> Self {
        Self {
            filename: filename.into(),
            group_name: group_name.into(),
            screen_width,
            screen_height,
            looping,
            auto_start,
            enabled: false,
            playing: false,
            start_playback_time: 0.0,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_auto_start(&self) -> bool {
        self.auto_start
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn start_playback_time(&self) -> f32 {
        self.start_playback_time
    }

    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
    }

    pub fn pause_movie(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
    }

    pub fn unpause_movie(&mut self, now: f32) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.start_playback_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> MovieDisplay {
        MovieDisplay::new("media/intro.bik", "lobby", 512, 256, true, true)
    }

    #[test]
    fn spawns_disabled_and_not_playing() {
        let display = display();
        assert!(!display.is_enabled());
        assert!(!display.is_playing());
    }

    #[test]
    fn enable_and_disable_are_edge_only() {
        let mut display = display();
        display.enable();
        display.enable();
        assert!(display.is_enabled());
        display.disable();
        display.disable();
        assert!(!display.is_enabled());
    }

    #[test]
    fn unpause_records_the_start_time_once() {
        let mut display = display();
        display.unpause_movie(4.0);
        assert!(display.is_playing());
        assert_eq!(display.start_playback_time(), 4.0);

        // Already playing: the timestamp must not move.
        display.unpause_movie(9.0);
        assert_eq!(display.start_playback_time(), 4.0);

        display.pause_movie();
        display.unpause_movie(9.0);
        assert_eq!(display.start_playback_time(), 9.0);
    }

    #[test]
    fn pause_when_not_playing_is_a_no_op() {
        let mut display = display();
        display.pause_movie();
        assert!(!display.is_playing());
    }
}
