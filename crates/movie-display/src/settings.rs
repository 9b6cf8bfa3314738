//! Layout files: simulation facts plus the set of screens to spawn.
//!
//! The file format is TOML with every field optional; omitted fields fall
//! back to the same defaults a hand-spawned display gets.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::display::MovieDisplay;
use crate::group::MAX_GROUP_ID;
use crate::surface::SurfaceId;
use crate::system::{DisplayId, ScreenSystem, SimulationState};

const DEFAULT_SCREEN_WIDTH: u32 = 512;
const DEFAULT_SCREEN_HEIGHT: u32 = 256;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct LayoutFile {
    simulation: Option<SimulationFileConfig>,
    #[serde(rename = "display")]
    displays: Vec<DisplayFileConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
struct SimulationFileConfig {
    max_clients: Option<u32>,
    paused: Option<bool>,
    console_open: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
struct DisplayFileConfig {
    filename: Option<String>,
    group: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    looping: Option<bool>,
    auto_start: Option<bool>,
}

/// A validated layout, ready to spawn.
#[derive(Debug, Clone)]
pub struct Layout {
    pub simulation: SimulationState,
    pub displays: Vec<DisplayConfig>,
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub filename: String,
    pub group: String,
    pub width: u32,
    pub height: u32,
    pub looping: bool,
    pub auto_start: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue {
        path: Option<PathBuf>,
        field: &'static str,
        value: String,
    },
    NotFound {
        path: PathBuf,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(
                    f,
                    "failed to read layout file {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Parse { path, source } => {
                write!(
                    f,
                    "failed to parse layout file {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidValue { path, field, value } => {
                if let Some(path) = path {
                    write!(
                        f,
                        "invalid value '{}' for '{}' in {}",
                        value,
                        field,
                        path.display()
                    )
                } else {
                    write!(f, "invalid value '{}' for '{}'", value, field)
                }
            }
            ConfigError::NotFound { path } => {
                write!(f, "layout file {} does not exist", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
            ConfigError::NotFound { .. } => None,
        }
    }
}

pub fn load_layout(path: &Path) -> Result<Layout, ConfigError> {
    let path_buf = path.to_path_buf();
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path_buf });
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path_buf.clone(),
        source,
    })?;
    let file: LayoutFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path_buf.clone(),
        source,
    })?;
    resolve(file, Some(path_buf))
}

fn resolve(file: LayoutFile, path: Option<PathBuf>) -> Result<Layout, ConfigError> {
    let defaults = SimulationState::default();
    let sim = file.simulation.unwrap_or_default();
    let max_clients = sim.max_clients.unwrap_or(defaults.max_clients);
    if max_clients == 0 {
        return Err(ConfigError::InvalidValue {
            path,
            field: "simulation.max_clients",
            value: max_clients.to_string(),
        });
    }
    let simulation = SimulationState {
        max_clients,
        paused: sim.paused.unwrap_or(defaults.paused),
        console_open: sim.console_open.unwrap_or(defaults.console_open),
    };

    let mut displays = Vec::with_capacity(file.displays.len());
    for cfg in file.displays {
        let filename = cfg.filename.unwrap_or_default();
        if filename.is_empty() {
            return Err(ConfigError::InvalidValue {
                path,
                field: "display.filename",
                value: filename,
            });
        }
        let group = cfg.group.unwrap_or_default();
        if group.len() > MAX_GROUP_ID {
            return Err(ConfigError::InvalidValue {
                path,
                field: "display.group",
                value: group,
            });
        }
        let width = cfg.width.unwrap_or(DEFAULT_SCREEN_WIDTH);
        let height = cfg.height.unwrap_or(DEFAULT_SCREEN_HEIGHT);
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidValue {
                path,
                field: "display.width",
                value: format!("{width}x{height}"),
            });
        }
        displays.push(DisplayConfig {
            filename,
            group,
            width,
            height,
            looping: cfg.looping.unwrap_or(false),
            auto_start: cfg.auto_start.unwrap_or(true),
        });
    }

    Ok(Layout {
        simulation,
        displays,
    })
}

impl ScreenSystem {
    /// Spawn every display in the layout together with one surface sized to
    /// its screen, and adopt the layout's simulation facts.
    pub fn spawn_layout(&mut self, layout: &Layout) -> Vec<(DisplayId, SurfaceId)> {
        *self.simulation_mut() = layout.simulation;
        layout
            .displays
            .iter()
            .map(|cfg| {
                let display = self.spawn_display(MovieDisplay::new(
                    cfg.filename.as_str(),
                    cfg.group.as_str(),
                    cfg.width,
                    cfg.height,
                    cfg.looping,
                    cfg.auto_start,
                ));
                let surface = self.create_surface(display, cfg.width, cfg.height);
                (display, surface)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use movie_display_video::MockBackend;
    use tempfile::tempdir;

    use super::*;

    fn write_layout(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("screens.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_a_full_layout() {
        let (_dir, path) = write_layout(
            r#"
            [simulation]
            max_clients = 8

            [[display]]
            filename = "media/intro.bik"
            group = "lobby"
            width = 320
            height = 240
            looping = true

            [[display]]
            filename = "media/intro.bik"
            group = "lobby"
            "#,
        );

        let layout = load_layout(&path).unwrap();
        assert_eq!(layout.simulation.max_clients, 8);
        assert!(!layout.simulation.paused);
        assert_eq!(layout.displays.len(), 2);

        let first = &layout.displays[0];
        assert_eq!(first.filename, "media/intro.bik");
        assert_eq!((first.width, first.height), (320, 240));
        assert!(first.looping);
        assert!(first.auto_start);

        let second = &layout.displays[1];
        assert_eq!((second.width, second.height), (512, 256));
        assert!(!second.looping);
    }

    #[test]
    fn missing_layout_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_layout(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn rejects_displays_without_a_filename() {
        let (_dir, path) = write_layout("[[display]]\ngroup = \"lobby\"\n");
        let err = load_layout(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "display.filename",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_sized_screens() {
        let (_dir, path) = write_layout("[[display]]\nfilename = \"a.bik\"\nwidth = 0\n");
        let err = load_layout(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "display.width",
                ..
            }
        ));
    }

    #[test]
    fn rejects_overlong_group_names() {
        let group = "g".repeat(MAX_GROUP_ID + 1);
        let (_dir, path) =
            write_layout(&format!("[[display]]\nfilename = \"a.bik\"\ngroup = \"{group}\"\n"));
        let err = load_layout(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "display.group",
                ..
            }
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let (_dir, path) = write_layout("[[display\n");
        let err = load_layout(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn spawned_layouts_resolve_into_groups() {
        let (_dir, path) = write_layout(
            r#"
            [[display]]
            filename = "wall.bik"
            group = "wall"

            [[display]]
            filename = "wall.bik"
            group = "wall"
            "#,
        );
        let layout = load_layout(&path).unwrap();

        let backend = MockBackend::new();
        let probe = backend.probe();
        let mut sys = ScreenSystem::new(Box::new(backend));
        let spawned = sys.spawn_layout(&layout);
        assert_eq!(spawned.len(), 2);

        sys.tick(0.1);
        assert_eq!(probe.created(), vec!["wall.bik_wall".to_string()]);
        let masters = spawned
            .iter()
            .filter(|(_, surface)| sys.surface(*surface).unwrap().is_master())
            .count();
        assert_eq!(masters, 1);
    }
}
