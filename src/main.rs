//! # Blob Life
//!
//! Conway's Game of Life in the terminal, drawn as wobbling blobs, built on
//! `ratatui` for the interface and `crossterm` for terminal manipulation.
//!
//! ## Features
//!
//! * Toroidal grid sized from the terminal and resampled on resize
//! * Click anywhere on the grid to seed a burst of life
//! * Optional hand tracker whose fingertip movement seeds bursts too
//! * A timed motion effect that keeps the colony from dying out
//! * Real-time statistics and memory usage

mod app;
mod config;
mod demo;
mod error;
mod grid;
mod motion;
mod perturb;
mod rules;
mod simulation;
mod tracker;
mod ui;

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crate::app::App;
use crate::config::{Config, CAPTURE_HEIGHT, CAPTURE_WIDTH};
use crate::demo::DemoTracker;
use crate::tracker::{FrameSize, TrackerBridge};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Main entry point.
///
/// # Controls
///
/// * Left click: seed a burst of life under the pointer
/// * q / Esc / Ctrl-C: quit
/// * Any other key: reseed the grid
///
/// # Errors
///
/// Returns an error if terminal manipulation fails.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let config = Config::parse();
    log::info!("Blob Life starting with {config:?}");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Term, config: Config) -> Result<(), Box<dyn Error>> {
    let resolution = config.resolution;
    let tick_rate = config.frame_period();
    let mut area = ui::grid_area(terminal.size()?);
    let (width, height) = ui::surface_size(area, resolution);

    let mut app = App::new(config.clone(), width, height);
    if config.demo_hand {
        let bridge = TrackerBridge::new();
        DemoTracker {
            capture: FrameSize::new(CAPTURE_WIDTH, CAPTURE_HEIGHT),
            warmup: Duration::from_millis(1500),
            period: Duration::from_millis(50),
            seed: config.seed.unwrap_or_else(rand::random),
        }
        .spawn(bridge.publisher());
        app = app.with_tracker(bridge);
    }

    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    _ => app.on_key_press(),
                },
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(point) =
                        ui::pointer_to_surface(mouse.column, mouse.row, area, resolution)
                    {
                        app.on_pointer_down(point, Instant::now());
                    }
                }
                Event::Resize(columns, rows) => {
                    area = ui::grid_area(Rect::new(0, 0, columns, rows));
                    let (width, height) = ui::surface_size(area, resolution);
                    app.on_resize(width, height);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.update(Instant::now());
            last_tick = Instant::now();
        }
    }

    Ok(())
}
