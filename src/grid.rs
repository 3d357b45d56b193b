use rand::Rng;

/// Bounded Game of Life cell matrix, stored row-major.
///
/// The grid never wraps: neighbors outside the matrix are permanently dead.
/// Size is fixed after construction and out-of-range access is a
/// programming error, not a recoverable condition.
#[derive(Debug, Clone)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    scratch: Vec<bool>,
}

impl CellGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid must hold at least one cell");
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
            scratch: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let i = self.index(row, col);
        self.cells[i] = alive;
    }

    /// Flips a cell and returns its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let i = self.index(row, col);
        self.cells[i] = !self.cells[i];
        self.cells[i]
    }

    /// Live cells in the 8-connected neighborhood of `(row, col)`.
    pub fn neighbor_count(&self, row: usize, col: usize) -> usize {
        let _ = self.index(row, col);

        let mut count = 0;
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dy == 0 && dx == 0 {
                    continue;
                }
                let r = row as i32 + dy;
                let c = col as i32 + dx;
                if r < 0 || c < 0 || r >= self.rows as i32 || c >= self.cols as i32 {
                    continue;
                }
                if self.cells[r as usize * self.cols + c as usize] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advances one generation under the classical rule: a live cell with
    /// 2 or 3 live neighbors survives, a dead cell with exactly 3 becomes
    /// alive, everything else dies or stays dead.
    ///
    /// The whole current generation is read before any cell of the next
    /// one is written; the two buffers are swapped at the end.
    pub fn advance_generation(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let n = self.neighbor_count(row, col);
                let alive = self.cells[row * self.cols + col];
                self.scratch[row * self.cols + col] = match (alive, n) {
                    (true, 2) | (true, 3) => true,
                    (false, 3) => true,
                    _ => false,
                };
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
    }

    /// Sets each cell alive independently with probability
    /// `chance_percent / 100`.
    pub fn randomize<R: Rng>(&mut self, chance_percent: u8, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.gen_range(0..100u8) < chance_percent;
        }
    }

    /// Kills every cell. The allocation is kept for reuse.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}
