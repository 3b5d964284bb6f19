//! Twin Lane Runner entry point
//!
//! Native builds run a headless demo: the autopilot plays a run, restarts
//! once through the persisted restart intent, then exits to the title.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::process::ExitCode;

    use twin_lane_runner::consts::FRAME_DT;
    use twin_lane_runner::persistence::JsonFileStore;
    use twin_lane_runner::platform::Presentation;
    use twin_lane_runner::{Collaborators, GamePhase, TickInput, Tuning, World};

    /// Longest a single run may last before the demo gives up on it (seconds)
    const MAX_RUN_SECS: f32 = 600.0;
    const DEFAULT_SAVE_PATH: &str = "lane_runner_save.json";

    /// Prints every presentation call as a log line
    struct LogPresentation;

    impl Presentation for LogPresentation {
        fn set_score_text(&mut self, score: u64) {
            log::info!("[ui] Score: {}", score);
        }
        fn set_high_score_text(&mut self, high_score: u64) {
            log::info!("[ui] High Score: {}", high_score);
        }
        fn show_title(&mut self) {
            log::info!("[ui] title shown");
        }
        fn hide_title(&mut self) {
            log::info!("[ui] title hidden");
        }
        fn show_game_over(&mut self) {
            log::info!("[ui] game over shown");
        }
        fn hide_game_over(&mut self) {
            log::debug!("[ui] game over hidden");
        }
        fn play_music(&mut self) {
            log::info!("[audio] music on");
        }
        fn stop_music(&mut self) {
            log::info!("[audio] music off");
        }
        fn play_collision_sound(&mut self) {
            log::info!("[audio] crash!");
        }
        fn reload_session(&mut self) {
            log::info!("[scene] reload");
        }
    }

    /// Tick with autopilot until the run ends; returns the final score
    fn play_run(world: &mut World) -> u64 {
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let max_ticks = (MAX_RUN_SECS / FRAME_DT) as u32;
        for _ in 0..max_ticks {
            world.tick(&input, FRAME_DT);
            if world.phase() == GamePhase::GameOver {
                break;
            }
        }
        world.session().score()
    }

    fn press(world: &mut World, input: TickInput) {
        world.tick(&input, FRAME_DT);
    }

    pub fn run() -> ExitCode {
        let tuning = match std::env::args().nth(1) {
            Some(path) => match Tuning::load(&path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Bad tuning file {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            },
            None => Tuning::default(),
        };

        let save_path =
            std::env::var("LANE_RUNNER_SAVE").unwrap_or_else(|_| DEFAULT_SAVE_PATH.to_string());
        let store = match JsonFileStore::open(&save_path) {
            Ok(store) => store,
            Err(e) => {
                log::error!("Cannot open save {}: {}", save_path, e);
                return ExitCode::FAILURE;
            }
        };

        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let collaborators = Collaborators {
            presentation: Some(Box::new(LogPresentation)),
            factory: None,
        };
        let mut world = match World::new(tuning, seed, Box::new(store), collaborators) {
            Ok(world) => world,
            Err(e) => {
                log::error!("Invalid tuning: {}", e);
                return ExitCode::FAILURE;
            }
        };

        // Title screen -> first run
        press(
            &mut world,
            TickInput {
                start: true,
                ..Default::default()
            },
        );
        let first = play_run(&mut world);

        // Restart skips the title
        press(
            &mut world,
            TickInput {
                restart: true,
                ..Default::default()
            },
        );
        let second = play_run(&mut world);

        // Back to the title
        press(
            &mut world,
            TickInput {
                exit_to_menu: true,
                ..Default::default()
            },
        );

        println!(
            "runs: {} then {}, high score {}, final phase {:?}",
            first,
            second,
            world.session().high_score(),
            world.phase()
        );
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Twin Lane Runner (headless) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's wasm_bindgen start fn, this is just to satisfy the compiler
}
