use std::collections::HashMap;
use std::env;
use std::io;
use crossterm::{
    cursor::{Hide, Show},
    event::{Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

mod assets;
mod collision;
mod constants;
mod entities;
mod game;
mod rendering;
mod spawner;
mod state;
mod terminal_io;
mod types;

use game::Game;
use rendering::{GameGrid, OutputTarget, ScreenBuffer};
use terminal_io::SimulatedInput;

fn main() -> io::Result<()> {
    simple_logging::log_to_file("unicorn-nightmare.log", log::LevelFilter::Info)
        .unwrap_or_else(|e| eprintln!("Failed to open log file: {}", e));
    info!("Starting unicorn-nightmare.");

    let args: Vec<String> = env::args().collect();
    let debug_mode_active = args.len() > 1 && args[1] == "--debug";

    let mut stdout_target;
    let mut simulated_input: Option<SimulatedInput> = None;
    let terminal_width: u16;
    let terminal_height: u16;

    if debug_mode_active {
        info!("Debug mode enabled.");
        let mut debug_width = 80;
        let mut debug_height = 24;
        if args.len() >= 4 {
            debug_width = args[2].parse::<u16>().unwrap_or(80);
            debug_height = args[3].parse::<u16>().unwrap_or(24);
        }
        terminal_width = debug_width;
        terminal_height = debug_height;
        info!("Debug resolution set to {}x{}", terminal_width, terminal_height);
        stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(terminal_width, terminal_height));

        let mut sim_events = HashMap::new();
        sim_events.insert(1, Event::Key(KeyCode::Char('w').into()));
        sim_events.insert(2, Event::Key(KeyCode::Char(' ').into()));
        sim_events.insert(4, Event::Key(KeyCode::Tab.into()));
        sim_events.insert(5, Event::Key(KeyCode::Char(' ').into()));
        sim_events.insert(8, Event::Key(KeyCode::Char('q').into()));
        simulated_input = Some(SimulatedInput::new(sim_events));
    } else {
        info!("Attempting to enable raw mode.");
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
        terminal_width = width;
        terminal_height = height;
        stdout_target = OutputTarget::Stdout(io::stdout());
        info!("Terminal size: {}x{}", terminal_width, terminal_height);
    }

    let max_frames: Option<u64> = if debug_mode_active {
        args.get(4).and_then(|s| s.parse().ok()).or(Some(600))
    } else {
        None
    };

    if !debug_mode_active {
        let game_grid = GameGrid::new(terminal_width, terminal_height);
        game_grid
            .clear_screen_manual(&mut stdout_target, terminal_width, terminal_height)
            .map_err(|e| { error!("Failed to clear screen: {}", e); e })?;
        stdout_target
            .execute_other_command(Hide)
            .map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    }

    let mut rng = rand::thread_rng();
    let mut game = Game::new(
        terminal_width,
        terminal_height,
        stdout_target,
        simulated_input,
        debug_mode_active,
        max_frames,
    );
    let result = game.run(&mut rng);

    if !debug_mode_active {
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, Show)
            .unwrap_or_else(|e| error!("Failed to show cursor on exit: {}", e));
        disable_raw_mode().unwrap_or_else(|e| error!("Failed to disable raw mode on exit: {}", e));
    }

    info!("Exiting.");
    result
}
