// --- File: rule.rs ---
use crate::grid::{Cell, Grid};
use rayon::prelude::*;
use std::fmt;

/// Which cells count as neighbors when evaluating the update rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// Only the cell directly to the right, no wraparound.
    #[default]
    RightOnly,
    /// All eight surrounding cells on a toroidal grid.
    Moore,
}

impl Neighborhood {
    pub fn toggled(self) -> Self {
        match self {
            Neighborhood::RightOnly => Neighborhood::Moore,
            Neighborhood::Moore => Neighborhood::RightOnly,
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Neighborhood::RightOnly => write!(f, "right-only"),
            Neighborhood::Moore => write!(f, "moore"),
        }
    }
}

/// Counts Alive neighbors of (x, y). `x` and `y` must be inside the grid.
pub fn count_neighbors(grid: &Grid, x: usize, y: usize, neighborhood: Neighborhood) -> u32 {
    match neighborhood {
        Neighborhood::RightOnly => {
            let right = x + 1;
            if right < grid.width() && grid.row(y)[right] == Cell::Alive {
                1
            } else {
                0
            }
        }
        Neighborhood::Moore => {
            let (w, h) = (grid.width(), grid.height());
            let mut count = 0;
            for dy in [h - 1, 0, 1] {
                for dx in [w - 1, 0, 1] {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = (x + dx) % w;
                    let ny = (y + dy) % h;
                    if grid.row(ny)[nx] == Cell::Alive {
                        count += 1;
                    }
                }
            }
            count
        }
    }
}

/// Computes the row `y` of the next generation into `next_row`.
///
/// Cells are visited left to right and later writes win: a Food cell writes
/// over its left neighbor's freshly computed state.
fn step_row(current: &Grid, y: usize, next_row: &mut [Cell], neighborhood: Neighborhood) {
    let row = current.row(y);
    for x in 0..row.len() {
        let neighbors = count_neighbors(current, x, y, neighborhood);
        match row[x] {
            Cell::Empty => {
                next_row[x] = if neighbors == 1 { Cell::Alive } else { Cell::Empty };
            }
            Cell::Alive => {
                next_row[x] = if neighbors == 0 { Cell::Empty } else { Cell::Alive };
            }
            Cell::Food => {
                if x == 0 {
                    // No left neighbor to feed.
                    next_row[x] = Cell::Food;
                } else if neighbors == 1 {
                    next_row[x - 1] = Cell::Alive;
                    next_row[x] = Cell::Alive;
                } else {
                    next_row[x - 1] = row[x - 1];
                    next_row[x] = Cell::Food;
                }
            }
        }
    }
}

/// Writes the generation following `current` into `next`.
///
/// Every write a cell makes stays inside its own row, so rows are stepped in parallel.
pub fn step_into(current: &Grid, next: &mut Grid, neighborhood: Neighborhood) {
    if next.width() != current.width() || next.height() != current.height() {
        *next = Grid::new(current.width(), current.height());
    }
    let width = current.width();
    next.cells_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, next_row)| step_row(current, y, next_row, neighborhood));
}

/// Convenience wrapper returning a freshly allocated next generation.
pub fn next_generation(current: &Grid, neighborhood: Neighborhood) -> Grid {
    let mut next = Grid::new(current.width(), current.height());
    step_into(current, &mut next, neighborhood);
    next
}

// --- End of File: rule.rs ---
