use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::cell::Cell;

/// Row-major grid of cells, `height` rows of `width` cells each.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid where every cell is dead
    pub fn dead(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Build a grid from rows of `0` / `1`. Every row must have the same length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());

        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), width, "ragged rows");

            cells.extend(row.iter().map(|&v| Cell::from(v != 0)));
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.cells[self.at(x, y)])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Rows as `0` / `1` values, handy for comparisons
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|&c| u8::from(c)).collect())
            .collect()
    }

    /// Number of living cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// True when no cell is alive
    pub fn is_dead(&self) -> bool {
        !self.cells.iter().any(|c| c.is_alive())
    }

    fn at(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

/// How [`GameField::fill`] replaces the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Every cell is alive with probability 1/2
    Random,
    Dead,
    Alive,
}

/// Why the simulation cannot go on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The next generation is identical to the current one
    Stable,

    /// The next generation has no living cells
    Extinct,
}

/// Outcome of [`GameField::next_generation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    Advanced,

    /// The field was reset to all-dead
    Ended(EndReason),
}

impl Generation {
    pub fn is_advanced(self) -> bool {
        matches!(self, Generation::Advanced)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Cell ({x}, {y}) is outside the {width}x{height} field")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// Everything the controller needs from a field
pub trait GameField {
    fn state(&self) -> &Grid;

    /// Flip a single cell, returning its new value
    fn toggle_cell(&mut self, x: usize, y: usize) -> Result<Cell, FieldError>;

    fn next_generation(&mut self) -> Generation;

    fn fill(&mut self, fill: Fill);

    fn set_size(&mut self, width: usize, height: usize);
}

/// Bounded (non-wrapping) Game of Life field
pub struct Field {
    grid: Grid,
    rng: StdRng,
}

impl Field {
    /// Create an all-dead field, seeding random fill from the OS
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Create an all-dead field whose random fill is reproducible
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: usize, height: usize, rng: StdRng) -> Self {
        Self {
            grid: Grid::dead(width, height),
            rng,
        }
    }

    /// Replace the grid wholesale, keeping the random source
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Signed so that neighbors of edge cells can be asked about
    pub fn is_outside(&self, x: isize, y: isize) -> bool {
        x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height()
    }

    /// Living cells in the Moore neighborhood of `(x, y)`. Edges do not wrap.
    pub fn living_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut n = 0;

        for dy in -1..=1isize {
            for dx in -1..=1isize {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let (x1, y1) = (x as isize + dx, y as isize + dy);
                if self.is_outside(x1, y1) {
                    continue;
                }

                if self.grid.cells[self.grid.at(x1 as usize, y1 as usize)].is_alive() {
                    n += 1;
                }
            }
        }

        n
    }
}

impl GameField for Field {
    fn state(&self) -> &Grid {
        &self.grid
    }

    fn toggle_cell(&mut self, x: usize, y: usize) -> Result<Cell, FieldError> {
        let Some(cell) = self.grid.get(x, y) else {
            return Err(FieldError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        };

        let i = self.grid.at(x, y);
        self.grid.cells[i] = cell.toggled();

        Ok(self.grid.cells[i])
    }

    fn next_generation(&mut self) -> Generation {
        let (w, h) = (self.width(), self.height());
        let mut next = Grid::dead(w, h);

        for y in 0..h {
            for x in 0..w {
                let i = self.grid.at(x, y);
                next.cells[i] = self.grid.cells[i].next(self.living_neighbors(x, y));
            }
        }

        let reason = if next == self.grid {
            Some(EndReason::Stable)
        } else if next.is_dead() {
            Some(EndReason::Extinct)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                debug!(?reason, "Simulation ended");
                self.grid = Grid::dead(w, h);

                Generation::Ended(reason)
            }
            None => {
                debug!(population = next.population(), "Advanced one generation");
                self.grid = next;

                Generation::Advanced
            }
        }
    }

    fn fill(&mut self, fill: Fill) {
        info!(?fill, "Filling field");

        let (w, h) = (self.width(), self.height());
        self.grid = match fill {
            Fill::Dead => Grid::dead(w, h),
            Fill::Alive => Grid {
                width: w,
                height: h,
                cells: vec![Cell::Alive; w * h],
            },
            Fill::Random => Grid {
                width: w,
                height: h,
                cells: (0..w * h)
                    .map(|_| Cell::from(self.rng.gen_bool(0.5)))
                    .collect(),
            },
        };
    }

    fn set_size(&mut self, width: usize, height: usize) {
        info!(width, height, "Resizing field");

        let mut grid = Grid::dead(width, height);
        for y in 0..height {
            for x in 0..width {
                if let Some(cell) = self.grid.get(x, y) {
                    let i = grid.at(x, y);
                    grid.cells[i] = cell;
                }
            }
        }

        self.grid = grid;
    }
}
