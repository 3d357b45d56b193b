mod controller;
mod grid;
mod input;
mod render;
mod surface;

use std::io::{self, Write};

use crossterm::{
    cursor, execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::controller::Controller;
use crate::grid::CellGrid;
use crate::input::TerminalInput;
use crate::render::TerminalRenderer;
use crate::surface::Surface;

/// Raw-mode terminal session. Dropping it restores the terminal, so every
/// exit path, including panics and errors, tears the session down.
struct TermSession;

impl TermSession {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TermSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // size the surface before touching the terminal so a failure reports
    // on a normal screen
    let (term_cols, term_rows) = terminal::size()?;
    let surface = Surface::from_terminal(term_rows, term_cols)?;
    let mut grid = CellGrid::new(surface.grid_rows(), surface.grid_cols());
    log::debug!(
        "surface {}x{} at ({}, {}), grid {}x{}",
        surface.height(),
        surface.width(),
        surface.origin_row(),
        surface.origin_col(),
        grid.rows(),
        grid.cols()
    );

    let _session = TermSession::new()?;
    let mut renderer = TerminalRenderer::new();
    let mut input = TerminalInput::new();
    let mut controller = Controller::new(surface);

    if let Err(err) = controller.drive(&mut grid, &mut input, &mut renderer, &mut rand::thread_rng()) {
        log::error!("terminal session failed: {}", err);
        return Err(err.into());
    }

    Ok(())
}
