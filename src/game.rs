use std::io;
use std::time::{Duration, Instant};
use crossterm::event::{self, Event};
use log::{error, info};
use rand::Rng;

use crate::assets::SpriteSet;
use crate::constants::TARGET_FPS;
use crate::rendering::{self, GameGrid, OutputTarget};
use crate::state::World;
use crate::terminal_io::{InputCollector, SimulatedInput};

const MAX_FRAME_DT: f64 = 0.25; // stall guard: never integrate a huge step

/// Owns the terminal handles and drives the cooperative frame loop:
/// read input, step the world, compose the grid, flush.
pub struct Game {
    terminal_width: u16,
    terminal_height: u16,
    stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
        }
    }

    pub fn run(&mut self, rng: &mut impl Rng) -> io::Result<()> {
        let sprites = SpriteSet::load();
        let mut world = World::new(rng);
        let mut collector = InputCollector::new();
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);

        let frame_budget = Duration::from_millis(1000 / TARGET_FPS);
        let mut last_frame = Instant::now();
        let mut elapsed = 0.0;
        let mut frame_count: u64 = 0;

        loop {
            if let Some(max) = self.max_frames {
                if frame_count >= max {
                    info!("Reached max frame count {}", max);
                    break;
                }
            }

            self.collect_input(&mut collector, frame_count, frame_budget, &mut game_grid)?;
            if collector.quit_requested() {
                info!("Quit requested at frame {}", frame_count);
                break;
            }

            let dt = if self.debug_mode_active {
                1.0 / TARGET_FPS as f64
            } else {
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f64().min(MAX_FRAME_DT);
                last_frame = now;
                dt
            };

            let input = collector.frame(dt);
            world.step(dt, &input, rng);
            elapsed += dt;

            rendering::compose_frame(&mut game_grid, &world, &sprites, elapsed);
            self.present(&game_grid)?;

            frame_count += 1;
        }

        info!("Game loop ended at score {}", world.state.score);
        Ok(())
    }

    /// Waits out the frame budget on the event queue, then drains whatever
    /// arrived. Resizes rebuild the grid; everything else goes to the
    /// collector.
    fn collect_input(
        &mut self,
        collector: &mut InputCollector,
        frame_count: u64,
        frame_budget: Duration,
        game_grid: &mut GameGrid,
    ) -> io::Result<()> {
        if self.debug_mode_active {
            if let Some(sim_input) = &mut self.simulated_input {
                if sim_input.poll(frame_count)? {
                    collector.ingest(&sim_input.read()?);
                }
            }
            return Ok(());
        }

        let mut wait = frame_budget;
        loop {
            let ready = event::poll(wait).map_err(|e| {
                error!("Failed to poll event: {}", e);
                e
            })?;
            if !ready {
                break;
            }
            let event = event::read().map_err(|e| {
                error!("Failed to read event: {}", e);
                e
            })?;
            match event {
                Event::Resize(new_width, new_height) => {
                    self.terminal_width = new_width;
                    self.terminal_height = new_height;
                    *game_grid = GameGrid::new(new_width, new_height);
                }
                other => collector.ingest(&other),
            }
            wait = Duration::ZERO;
        }
        Ok(())
    }

    fn present(&mut self, game_grid: &GameGrid) -> io::Result<()> {
        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(sb) = &mut self.stdout_target {
                sb.clear();
                for y in 0..self.terminal_height.min(game_grid.height) {
                    for x in 0..self.terminal_width.min(game_grid.width) {
                        sb.buffer[y as usize][x as usize] = game_grid.grid[y as usize][x as usize];
                    }
                }
                sb.print_to_log();
            }
            return Ok(());
        }
        game_grid.render(&mut self.stdout_target)?;
        use std::io::Write;
        self.stdout_target.flush()
    }
}
