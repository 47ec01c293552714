//! Cryptcrawl - Entry Point
//!
//! Initializes logging and the terminal, then runs the input loop.
//! The game only advances on key presses.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cryptcrawl::data::{load_config, DEFAULT_CONFIG_PATH};
use cryptcrawl::game::Game;
use cryptcrawl::ui::App;

fn main() -> Result<()> {
    // Log to a file so the TUI is not disturbed
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("cryptcrawl.log")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Cryptcrawl v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(Path::new(DEFAULT_CONFIG_PATH));
    let mut game = Game::new(config);
    game.start_configured_game()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_game_loop(&mut terminal, &mut app, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Cryptcrawl shut down cleanly");
    result
}

/// Draw, then block for the next key
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut Game,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame, game))?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events, not releases
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_input(key, game) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => log::warn!("Input handling error: {}", e),
            }
        }
    }

    Ok(())
}
