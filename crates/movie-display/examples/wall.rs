//! A three-screen video wall driven against the mock backend.
//!
//! Two screens share the "wall" group (one master, one follower), a third
//! plays its own ungrouped clip. Prints what the painter would draw after
//! each simulated second.

use movie_display::{DisplayConfig, Layout, MovieDisplay, ScreenSystem, SimulationState};
use movie_display_video::{MockBackend, MockSource};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let backend = MockBackend::new().with_source(
        "media/wall_loop.bik",
        MockSource {
            width: 1280,
            height: 720,
            duration: 3.0,
            ..MockSource::default()
        },
    );
    let probe = backend.probe();
    let mut sys = ScreenSystem::new(Box::new(backend));

    let layout = Layout {
        simulation: SimulationState::default(),
        displays: vec![
            DisplayConfig {
                filename: "media/wall_loop.bik".to_string(),
                group: "wall".to_string(),
                width: 512,
                height: 256,
                looping: true,
                auto_start: true,
            },
            DisplayConfig {
                filename: "media/wall_loop.bik".to_string(),
                group: "wall".to_string(),
                width: 256,
                height: 256,
                looping: true,
                auto_start: true,
            },
            DisplayConfig {
                filename: "media/ticker.bik".to_string(),
                group: String::new(),
                width: 400,
                height: 300,
                looping: false,
                auto_start: true,
            },
        ],
    };

    let spawned = sys.spawn_layout(&layout);
    for (display, _) in &spawned {
        sys.enable(*display);
        sys.unpause_movie(*display);
    }

    for second in 1..=4 {
        for _ in 0..30 {
            sys.tick(1.0 / 30.0);
        }
        println!("t={second}s");
        for (_, surface) in &spawned {
            let Some(info) = sys.paint_info(*surface) else {
                println!("  surface: nothing to paint");
                continue;
            };
            println!(
                "  texture {:?} image {:?} at ({}, {}) {}x{}",
                info.texture, info.image, info.x, info.y, info.width, info.height
            );
        }
        for id in probe.created() {
            if let Some(time) = probe.current_time(&id) {
                println!("  {id}: {time:.2}s decoded");
            }
        }
    }

    // Late joiner: a new screen tunes into the running wall channel without
    // creating a second decode resource.
    let late = sys.spawn_display(MovieDisplay::new(
        "media/wall_loop.bik",
        "wall",
        640,
        480,
        true,
        true,
    ));
    let late_surface = sys.create_surface(late, 640, 480);
    sys.tick(1.0 / 30.0);
    println!(
        "late joiner is follower: {} (materials created: {})",
        sys.surface(late_surface)
            .map(|s| !s.is_master())
            .unwrap_or_default(),
        probe.created().len()
    );
}
