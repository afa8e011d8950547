/// State of a single square of the grid.
///
/// The discriminants are the `0` / `1` encoding used when the grid is read as numbers.
#[repr(u8)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// The opposite state
    pub const fn toggled(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }

    /// Apply B3/S23 to a cell with `n` living neighbors.
    pub const fn next(self, n: u8) -> Self {
        match (self, n) {
            (Cell::Dead, 3) => Cell::Alive,
            (Cell::Alive, n) if n < 2 || n > 3 => Cell::Dead,
            (cell, _) => cell,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell as u8
    }
}
