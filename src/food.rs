use rand::Rng;

use crate::config::GridSize;
use crate::snake::Cell;

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub cell: Cell,
    pub active: bool,
}

impl Food {
    /// Creates active food at `cell`.
    #[must_use]
    pub fn at(cell: Cell) -> Self {
        Self { cell, active: true }
    }

    /// Spawns active food at a uniformly random grid cell.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Self {
        Self::at(spawn_position(rng, bounds))
    }

    /// Returns true when `cell` is the active food cell.
    #[must_use]
    pub fn is_eaten_at(self, cell: Cell) -> bool {
        self.active && self.cell == cell
    }
}

/// Picks a uniformly random cell on the grid.
///
/// The snake body is not consulted, so the result may land on it.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Cell {
    debug_assert!(bounds.width > 0 && bounds.height > 0);

    Cell {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}
