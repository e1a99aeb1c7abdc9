//! Breakout entry point
//!
//! Headless native driver: runs the simulation on a fixed timestep with an
//! autopilot at the controls. Windowing and GPU rendering live elsewhere.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use breakout::consts::*;
    use breakout::renderer::build_frame;
    use breakout::sim::{FrameInput, GameEvent, GamePhase, GameState, parse_tiles, tick};
    use breakout::{GameConfig, TextureRegistry, Textures};

    const LEVELS: [&str; 4] = [
        include_str!("../levels/one.level"),
        include_str!("../levels/two.level"),
        include_str!("../levels/three.level"),
        include_str!("../levels/four.level"),
    ];

    /// Simulated display refresh
    const FRAME_DT: f32 = 1.0 / 30.0;
    /// Length of the demo run in display frames
    const DEMO_FRAMES: u32 = 30 * 120;

    #[derive(Debug, Default)]
    struct RunStats {
        bricks: u32,
        paddle_hits: u32,
        powerups: u32,
        balls_lost: u32,
        sprites_drawn: usize,
    }

    /// Keep the paddle under the ball; launch whenever it is stuck
    fn autopilot(state: &GameState) -> FrameInput {
        let target = state.ball.center().x;
        let paddle_center = state.paddle.rect().center().x;
        let dead_zone = state.paddle.size.x / 4.0;
        FrameInput {
            left: target < paddle_center - dead_zone,
            right: target > paddle_center + dead_zone,
            launch: state.ball.stuck,
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::init();
        log::info!("Breakout (headless) starting...");

        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        let mut registry = TextureRegistry::new();
        let textures = Textures::resolve(&mut registry);
        let levels = LEVELS
            .iter()
            .map(|text| parse_tiles(text))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} levels, {} textures", levels.len(), registry.len());

        let mut state = GameState::new(config, levels, textures);
        let mut stats = RunStats::default();
        let mut accumulator = 0.0;

        for _ in 0..DEMO_FRAMES {
            accumulator += FRAME_DT;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = autopilot(&state);
                tick(&mut state, &input, SIM_DT);
                accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in state.drain_events() {
                match event {
                    GameEvent::BrickDestroyed => stats.bricks += 1,
                    GameEvent::PaddleHit => stats.paddle_hits += 1,
                    GameEvent::PowerUpActivated(_) => stats.powerups += 1,
                    GameEvent::BallLost => stats.balls_lost += 1,
                    GameEvent::LevelCompleted => {
                        let next = state.level + 1;
                        if next < state.levels.len() {
                            state.select_level(next);
                        } else {
                            state.phase = GamePhase::Win;
                            log::info!("All levels cleared");
                        }
                    }
                    _ => {}
                }
            }

            match build_frame(&state) {
                Some(frame) => stats.sprites_drawn += frame.sprites.len(),
                None => break,
            }
        }

        log::info!("Run finished: {:?}", stats);
        println!(
            "level {} | bricks {} | paddle hits {} | power-ups {} | balls lost {} | sprites {}",
            state.level + 1,
            stats.bricks,
            stats.paddle_hits,
            stats.powerups,
            stats.balls_lost,
            stats.sprites_drawn
        );
        log::debug!("Final state:\n{}", state.snapshot_json()?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by an external web shell on wasm
}
