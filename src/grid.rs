// --- File: grid.rs ---
use rand::Rng;
use std::fmt;

/// State of a single grid cell. The discriminants are the values uploaded to the GPU.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Cell {
    #[default]
    Empty = 0,
    Alive = 1,
    Food = 2,
}

impl Cell {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Cell {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Alive),
            2 => Ok(Cell::Food),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    DimensionMismatch { expected: usize, actual: usize },
    InvalidCellState { index: usize, value: u32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::DimensionMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, got {actual}")
            }
            GridError::InvalidCellState { index, value } => {
                write!(f, "invalid cell state {value} at index {index}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Fixed-size row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-Empty grid. Zero dimensions are bumped to 1.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Builds a grid from raw row-major state values.
    pub fn from_raw(width: usize, height: usize, raw: &[u32]) -> Result<Self, GridError> {
        let expected = width * height;
        if expected == 0 || raw.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                actual: raw.len(),
            });
        }
        let cells = raw
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Cell::try_from(value).map_err(|value| GridError::InvalidCellState { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    /// Returns `None` for coordinates outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Writes a cell. Out-of-range coordinates are ignored and reported as `false`.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Re-seeds every cell: Alive with probability `density`, Empty otherwise.
    pub fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            *cell = if rng.r#gen::<f64>() < density {
                Cell::Alive
            } else {
                Cell::Empty
            };
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Copies the cell states into `out` as `u32`s for the storage buffer.
    pub fn write_gpu_data(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.as_u32()));
    }
}

// --- End of File: grid.rs ---
