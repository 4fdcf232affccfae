//! Fixed-size grid storage for board cells

use super::error::{BoardError, BoardResult};
use super::rules::RuleSet;
use itertools::iproduct;
use std::fmt;

/// x,y offsets of the eight Moore neighbors of a cell.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Width and height of a grid created with `Grid::default()`.
pub const DEFAULT_BOARD_SIZE: usize = 100;

/// Largest width or height the binary board format can store.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Number of cells in a `width` x `height` grid, or `InvalidDimensions` if
/// either side is zero, exceeds [`MAX_DIMENSION`], or the product overflows.
fn cell_count(width: usize, height: usize) -> BoardResult<usize> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(BoardError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(BoardError::InvalidDimensions { width, height })
}

/// A non-wrapping grid of cells, stored row-major.
///
/// Dimensions are fixed once the grid exists; anything outside
/// `[0, width) x [0, height)` is treated as permanently dead by the
/// neighbor count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(width: usize, height: usize) -> BoardResult<Self> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Create a grid from rows of cells (outer `Vec` is y, inner is x)
    pub fn from_rows(rows: Vec<Vec<bool>>) -> BoardResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        cell_count(width, height)?;

        // Verify all rows have the same length
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::InvalidBoard(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Create a grid from a flat row-major cell vector
    pub(crate) fn from_raw(width: usize, height: usize, cells: Vec<bool>) -> BoardResult<Self> {
        let len = cell_count(width, height)?;
        if cells.len() != len {
            return Err(BoardError::InvalidBoard(format!(
                "expected {} cells for a {}x{} board, found {}",
                len,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells in row-major order (y outer, x inner)
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check_bounds(&self, x: usize, y: usize) -> BoardResult<()> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(BoardError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get cell value at coordinates
    pub fn get(&self, x: usize, y: usize) -> BoardResult<bool> {
        self.check_bounds(x, y)?;
        Ok(self.cells[self.index(x, y)])
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> BoardResult<()> {
        self.check_bounds(x, y)?;
        let idx = self.index(x, y);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Whether a possibly off-grid coordinate holds a living cell.
    /// Off-grid coordinates are dead.
    fn is_alive_at(&self, x: isize, y: isize) -> bool {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[self.index(x as usize, y as usize)]
        } else {
            false
        }
    }

    /// Count living neighbors for a cell. The edge of the grid is bordered
    /// by dead cells.
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| self.is_alive_at(x as isize + dx, y as isize + dy))
            .count() as u8
    }

    /// Compute the next generation into a freshly allocated grid.
    ///
    /// Every cell's neighbor count is read from `self`, never from the grid
    /// being built.
    pub fn next_generation(&self, rules: &dyn RuleSet) -> Grid {
        let cells = iproduct!(0..self.height, 0..self.width)
            .map(|(y, x)| rules.apply(self.cells[self.index(x, y)], self.count_neighbors(x, y)))
            .collect();
        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Get all living cell coordinates as `(x, y)`, row by row
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
            .filter(|&(y, x)| self.cells[self.index(x, y)])
            .map(|(y, x)| (x, y))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Iterate over rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }
}

impl Default for Grid {
    /// A 100x100 grid of dead cells
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_SIZE,
            height: DEFAULT_BOARD_SIZE,
            cells: vec![false; DEFAULT_BOARD_SIZE * DEFAULT_BOARD_SIZE],
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                let symbol = if cell { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::rules::Conway;

    fn glider() -> Grid {
        let mut grid = Grid::new(10, 10).unwrap();
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            grid.set(x, y, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(15, 397).unwrap();
        assert_eq!(grid.width(), 15);
        assert_eq!(grid.height(), 397);
        assert_eq!(grid.cells().len(), 15 * 397);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(BoardError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::from_rows(vec![]).is_err());
        assert!(matches!(
            Grid::from_raw(0, 3, vec![]),
            Err(BoardError::InvalidDimensions { .. })
        ));
        assert!(Grid::from_rows(vec![vec![]]).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(BoardError::InvalidDimensions { width: usize::MAX, height: 2 })
        ));
        assert!(matches!(
            Grid::new(1, MAX_DIMENSION + 1),
            Err(BoardError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Grid::from_raw(MAX_DIMENSION + 1, 1, vec![false]),
            Err(BoardError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_grid_from_rows() {
        let rows = vec![
            vec![true, false, true],
            vec![false, true, false],
        ];
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.get(2, 0).unwrap());
        assert!(grid.get(1, 1).unwrap());
        assert!(!grid.get(0, 1).unwrap());
        assert_eq!(grid.living_cells(), vec![(0, 0), (2, 0), (1, 1)]);

        let ragged = vec![vec![true, false], vec![true]];
        assert!(matches!(Grid::from_rows(ragged), Err(BoardError::InvalidBoard(_))));
    }

    #[test]
    fn test_set_leaves_neighbors_alone() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(1, 3, true).unwrap();
        assert!(grid.get(1, 3).unwrap());
        assert!(!grid.get(3, 1).unwrap());
        assert!(!grid.get(0, 3).unwrap());
        assert!(!grid.get(1, 4).unwrap());
        assert_eq!(grid.living_count(), 1);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new(10, 10).unwrap();
        assert!(matches!(
            grid.get(3, 10),
            Err(BoardError::OutOfRange { x: 3, y: 10, .. })
        ));
        assert!(grid.get(10, 0).is_err());
        assert!(grid.set(10, 3, true).is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_neighbor_counting_single_cell() {
        let mut grid = Grid::new(10, 10).unwrap();
        assert_eq!(grid.count_neighbors(1, 1), 0);

        grid.set(1, 1, true).unwrap();
        assert_eq!(grid.count_neighbors(1, 1), 0);
        assert_eq!(grid.count_neighbors(0, 0), 1);
        assert_eq!(grid.count_neighbors(2, 2), 1);
        assert_eq!(grid.count_neighbors(3, 3), 0);
    }

    #[test]
    fn test_neighbor_counting_glider() {
        let grid = glider();
        assert_eq!(grid.count_neighbors(1, 1), 5);
        assert_eq!(grid.count_neighbors(0, 0), 1);
        assert_eq!(grid.count_neighbors(2, 2), 2);
    }

    #[test]
    fn test_edges_are_dead() {
        let rows = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let grid = Grid::from_rows(rows).unwrap();

        // Center cell sees the whole ring
        assert_eq!(grid.count_neighbors(1, 1), 8);
        // Corners only see three in-grid neighbors, two of them alive
        assert_eq!(grid.count_neighbors(0, 0), 2);
        assert_eq!(grid.count_neighbors(2, 2), 2);
        // Edge midpoints see five in-grid neighbors, four of them alive
        assert_eq!(grid.count_neighbors(1, 0), 4);
    }

    #[test]
    fn test_single_cell_grid() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.set(0, 0, true).unwrap();
        assert_eq!(grid.count_neighbors(0, 0), 0);
    }

    #[test]
    fn test_next_generation_leaves_source_untouched() {
        let rows = vec![
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ];
        let grid = Grid::from_rows(rows).unwrap();
        let next = grid.next_generation(&Conway);

        assert_eq!(next.living_cells(), vec![(1, 0), (1, 1), (1, 2)]);
        assert_eq!(grid.living_cells(), vec![(0, 1), (1, 1), (2, 1)]);
        assert_eq!(next.next_generation(&Conway), grid);
    }

    #[test]
    fn test_clear() {
        let mut grid = glider();
        assert_eq!(grid.living_count(), 5);
        grid.clear();
        assert!(grid.is_empty());
    }
}
