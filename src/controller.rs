use std::io;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::grid::CellGrid;
use crate::input::{InputEvent, InputSource};
use crate::render::Renderer;
use crate::surface::Surface;

const INIT_CHANCE: u8 = 25;
const CHANCE_STEP: u8 = 5;
const INIT_DELAY: Duration = Duration::from_millis(250);
const MIN_DELAY: Duration = Duration::from_millis(1);
const MAX_DELAY: Duration = Duration::from_millis(60_000);

const EDIT_HELP: &str =
    "Arrow keys = move | f = fill | v = random | c = +5% | x = -5% | r = run | F1 = exit";
const RUN_HELP: &str = "UP = x2 delay | DOWN = x0.5 delay | e = end | F1 = exit";

/// Interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Run,
}

/// Outcome of handling one input event or one mode loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    SwitchTo(Mode),
    Terminate,
}

/// Drives the grid through the edit/run state machine.
///
/// Owns the cursor, the fill chance and the step delay; all three outlive
/// individual mode loops, so chance and delay persist across mode switches
/// and the cursor is preserved when run mode hands back to edit mode.
pub struct Controller {
    surface: Surface,
    cursor_row: usize,
    cursor_col: usize,
    chance: u8,
    delay: Duration,
}

impl Controller {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            cursor_row: 0,
            cursor_col: 0,
            chance: INIT_CHANCE,
            delay: INIT_DELAY,
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn chance(&self) -> u8 {
        self.chance
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Outer driver loop for one program run: clears the grid, draws the
    /// border, then alternates edit and run mode until either terminates.
    pub fn drive<R: Rng>(
        &mut self,
        grid: &mut CellGrid,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
        rng: &mut R,
    ) -> io::Result<()> {
        renderer.draw_border(&self.surface)?;
        grid.clear();
        self.paint_grid(grid, renderer)?;

        let mut mode = Mode::Edit;
        loop {
            let next = match mode {
                Mode::Edit => self.edit_loop(grid, input, renderer, rng)?,
                Mode::Run => self.run_loop(grid, input, renderer)?,
            };
            match next {
                Transition::Stay => {}
                Transition::SwitchTo(to) => {
                    log::debug!("mode switch {:?} -> {:?}", mode, to);
                    mode = to;
                }
                Transition::Terminate => {
                    log::debug!("exit from {:?}", mode);
                    return Ok(());
                }
            }
        }
    }

    /// Edit mode: blocking reads, one dispatch per event. Returns only on
    /// a mode switch or termination.
    fn edit_loop<R: Rng>(
        &mut self,
        grid: &mut CellGrid,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
        rng: &mut R,
    ) -> io::Result<Transition> {
        renderer.draw_status_line(0, EDIT_HELP)?;
        self.draw_chance_line(renderer)?;
        renderer.set_cursor_visible(true)?;
        self.position_cursor(renderer)?;
        renderer.refresh()?;

        loop {
            let event = input.read_event(true)?;
            match self.handle_edit_event(event, grid, renderer, rng)? {
                Transition::Stay => {
                    self.position_cursor(renderer)?;
                    renderer.refresh()?;
                }
                other => return Ok(other),
            }
        }
    }

    fn handle_edit_event<R: Rng>(
        &mut self,
        event: InputEvent,
        grid: &mut CellGrid,
        renderer: &mut dyn Renderer,
        rng: &mut R,
    ) -> io::Result<Transition> {
        match event {
            InputEvent::MoveUp => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
            }
            InputEvent::MoveDown => {
                if self.cursor_row + 1 < grid.rows() {
                    self.cursor_row += 1;
                }
            }
            InputEvent::MoveLeft => {
                self.cursor_col = self.cursor_col.saturating_sub(1);
            }
            InputEvent::MoveRight => {
                if self.cursor_col + 1 < grid.cols() {
                    self.cursor_col += 1;
                }
            }
            InputEvent::Toggle => {
                let alive = grid.toggle(self.cursor_row, self.cursor_col);
                let (y, x) = self.surface.cell_to_screen(self.cursor_row, self.cursor_col);
                renderer.draw_cell(y, x, alive)?;
            }
            InputEvent::Randomize => {
                grid.randomize(self.chance, rng);
                self.paint_grid(grid, renderer)?;
            }
            InputEvent::ChanceUp => {
                self.chance = (self.chance + CHANCE_STEP).min(100);
                self.draw_chance_line(renderer)?;
            }
            InputEvent::ChanceDown => {
                self.chance = self.chance.saturating_sub(CHANCE_STEP);
                self.draw_chance_line(renderer)?;
            }
            InputEvent::Run => return Ok(Transition::SwitchTo(Mode::Run)),
            InputEvent::Exit => return Ok(Transition::Terminate),
            // end and the speed keys only mean something while running
            InputEvent::End
            | InputEvent::SpeedUp
            | InputEvent::SpeedDown
            | InputEvent::None => {}
        }
        Ok(Transition::Stay)
    }

    /// Run mode: one non-blocking poll per tick, one generation per tick,
    /// then a sleep for the current delay. Input never interrupts a sleep.
    fn run_loop(
        &mut self,
        grid: &mut CellGrid,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> io::Result<Transition> {
        renderer.draw_status_line(0, RUN_HELP)?;
        self.draw_delay_line(renderer)?;
        renderer.set_cursor_visible(false)?;
        renderer.refresh()?;

        loop {
            let event = input.read_event(false)?;

            grid.advance_generation();
            self.paint_grid(grid, renderer)?;

            match event {
                InputEvent::End => return Ok(Transition::SwitchTo(Mode::Edit)),
                InputEvent::Exit => return Ok(Transition::Terminate),
                InputEvent::MoveUp | InputEvent::SpeedUp => {
                    self.double_delay();
                    self.draw_delay_line(renderer)?;
                }
                InputEvent::MoveDown | InputEvent::SpeedDown => {
                    self.halve_delay();
                    self.draw_delay_line(renderer)?;
                }
                _ => {}
            }

            renderer.refresh()?;
            thread::sleep(self.delay);
        }
    }

    fn double_delay(&mut self) {
        self.delay = (self.delay * 2).min(MAX_DELAY);
    }

    fn halve_delay(&mut self) {
        self.delay = (self.delay / 2).max(MIN_DELAY);
    }

    fn paint_grid(&self, grid: &CellGrid, renderer: &mut dyn Renderer) -> io::Result<()> {
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let (y, x) = self.surface.cell_to_screen(row, col);
                renderer.draw_cell(y, x, grid.get(row, col))?;
            }
        }
        Ok(())
    }

    fn position_cursor(&self, renderer: &mut dyn Renderer) -> io::Result<()> {
        let (y, x) = self.surface.cell_to_screen(self.cursor_row, self.cursor_col);
        renderer.move_cursor(y, x)
    }

    fn draw_chance_line(&self, renderer: &mut dyn Renderer) -> io::Result<()> {
        renderer.draw_status_line(1, &format!("Fill chance: {}%", self.chance))
    }

    fn draw_delay_line(&self, renderer: &mut dyn Renderer) -> io::Result<()> {
        renderer.draw_status_line(1, &format!("Delay: {}ms", self.delay.as_millis()))
    }
}
