//! Flappy sim entry point
//!
//! Headless native host: loads settings, drives the simulation with a
//! fixed-timestep accumulator, forwards audio cues and presents frames to a
//! logging renderer.
//!
//! Usage:
//!   flappy-sim [SECONDS] [SETTINGS] [--no-autopilot]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use flappy_sim::Settings;
    use flappy_sim::audio::{AudioManager, SilentBackend};
    use flappy_sim::consts::*;
    use flappy_sim::sim::{GameEvent, GameSession, TickInput, tick};
    use flappy_sim::view::{FrameView, Renderer};

    /// Host frame length, not a multiple of the sim step
    const FRAME_DT: f32 = 1.0 / 45.0;

    #[derive(Parser, Debug)]
    #[command(name = "flappy-sim")]
    #[command(about = "Run the flappy game headless and log what happens")]
    pub(crate) struct Args {
        /// Simulated seconds to run
        #[arg(default_value_t = 30.0, value_parser = parse_seconds)]
        pub(crate) seconds: f32,
        /// Settings file (JSON); defaults are used if it is missing
        #[arg(default_value = "flappy-settings.json")]
        pub(crate) settings: PathBuf,
        /// Leave the bird to fall instead of letting the demo player fly
        #[arg(long)]
        pub(crate) no_autopilot: bool,
    }

    fn parse_seconds(value: &str) -> Result<f32, String> {
        let seconds: f32 = value
            .parse()
            .map_err(|_| format!("`{value}` is not a number of seconds"))?;
        if seconds.is_finite() && seconds > 0.0 {
            Ok(seconds)
        } else {
            Err(format!("duration must be positive, got {value}"))
        }
    }

    /// Renderer that writes frames to the log instead of a window
    #[derive(Default)]
    struct LogRenderer {
        frames: u64,
        last_score: Option<String>,
    }

    impl Renderer for LogRenderer {
        fn present(&mut self, frame: &FrameView) {
            self.frames += 1;
            if self.last_score.as_deref() != Some(frame.score.text.as_str()) {
                log::debug!("Score label: {} (x{:.2})", frame.score.text, frame.score.scale);
                self.last_score = Some(frame.score.text.clone());
            }
            if let Some(bird) = frame.bird() {
                log::trace!(
                    "frame {}: bird ({:.1}, {:.1}) rot {:.2} {:?}, {} sprites",
                    self.frames,
                    bird.pos.x,
                    bird.pos.y,
                    bird.rotation,
                    bird.texture,
                    frame.sprites.len()
                );
            }
        }
    }

    /// Game instance holding all host state
    struct Game {
        session: GameSession,
        audio: AudioManager<SilentBackend>,
        renderer: LogRenderer,
        accumulator: f32,
        input: TickInput,
        crashes: u32,
        best_score: u32,
    }

    impl Game {
        fn new(settings: &Settings, idle_mode: bool) -> Self {
            Self {
                session: GameSession::with_tuning(settings.seed, settings.tuning),
                audio: AudioManager::from_settings(SilentBackend, settings),
                renderer: LogRenderer::default(),
                accumulator: 0.0,
                input: TickInput {
                    tap: false,
                    idle_mode,
                },
                crashes: 0,
                best_score: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.session, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.tap = false;
            }

            let events = self.session.drain_events();
            self.audio.handle_events(&events);
            for event in &events {
                self.log_event(event);
            }
        }

        fn log_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Scored { score, gap } => {
                    log::info!("Score {} (next gap {:.0})", score, gap);
                }
                GameEvent::Crashed { score } => {
                    self.crashes += 1;
                    self.best_score = self.best_score.max(*score);
                    log::info!("Crashed with score {}", score);
                }
                GameEvent::GameOver { score } => log::info!("Game over ({})", score),
                GameEvent::Restarted => log::info!("Restarted"),
                GameEvent::PairSpawned { id, offset, gap } => {
                    log::debug!("Pair {} spawned at offset {:.1}, gap {:.0}", id, offset, gap);
                }
                other => log::trace!("{:?}", other),
            }
        }

        fn render(&mut self) {
            let frame = FrameView::capture(&self.session);
            self.renderer.present(&frame);
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Flappy sim (native) starting...");

        let args = Args::parse();

        let settings = Settings::load_or_default(&args.settings);
        let mut game = Game::new(&settings, !args.no_autopilot);

        let frames = (args.seconds / FRAME_DT).ceil() as u64;
        for _ in 0..frames {
            game.update(FRAME_DT);
            game.render();
        }

        let session = &game.session;
        log::info!(
            "Simulated {:.1}s in {} ticks: score {}, best {}, {} crashes, {} frames presented",
            session.time_secs,
            session.time_ticks,
            session.score.score,
            game.best_score.max(session.score.score),
            game.crashes,
            game.renderer.frames
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use clap::Parser;

    use super::native::Args;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["flappy-sim"]).expect("defaults parse");
        assert_eq!(args.seconds, 30.0);
        assert_eq!(args.settings.to_str(), Some("flappy-settings.json"));
        assert!(!args.no_autopilot);
    }

    #[test]
    fn test_args_explicit() {
        let args = Args::try_parse_from(["flappy-sim", "12.5", "my.json", "--no-autopilot"])
            .expect("valid args");
        assert_eq!(args.seconds, 12.5);
        assert_eq!(args.settings.to_str(), Some("my.json"));
        assert!(args.no_autopilot);
    }

    #[test]
    fn test_args_rejects_bad_input() {
        assert!(Args::try_parse_from(["flappy-sim", "2s"]).is_err());
        assert!(Args::try_parse_from(["flappy-sim", "-4"]).is_err());
        assert!(Args::try_parse_from(["flappy-sim", "0"]).is_err());
        assert!(Args::try_parse_from(["flappy-sim", "--autopilot-off", "1"]).is_err());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly
}
