//! The board engine: a grid plus the rule set that advances it

use super::error::BoardResult;
use super::io;
use super::rules::{Conway, RuleSet};
use super::Grid;
use log::{debug, info, trace};
use std::io::{Read, Write};
use std::path::Path;

/// A standard non-wrapping Life board whose edges are bordered by dead cells.
///
/// The board owns its grid exclusively. Every call to [`GameBoard::advance`]
/// computes the next generation into a fresh grid from the current one and
/// then replaces it, so no cell ever sees a neighbor's next-generation value.
#[derive(Debug)]
pub struct GameBoard {
    grid: Grid,
    rules: Box<dyn RuleSet>,
    generation: u64,
}

impl GameBoard {
    /// Create a board of the given size with every cell dead
    pub fn new(rules: Box<dyn RuleSet>, width: usize, height: usize) -> BoardResult<Self> {
        let grid = Grid::new(width, height)?;
        debug!("Created {}x{} board with {}", width, height, rules.name());
        Ok(Self::from_grid(rules, grid))
    }

    /// Create a board using Conway's rules
    pub fn with_conway(width: usize, height: usize) -> BoardResult<Self> {
        Self::new(Box::new(Conway), width, height)
    }

    /// Wrap an existing grid
    pub fn from_grid(rules: Box<dyn RuleSet>, grid: Grid) -> Self {
        Self {
            grid,
            rules,
            generation: 0,
        }
    }

    /// Load a board from a stream in the binary board format.
    ///
    /// The format carries no rule information, so the caller chooses the rules.
    pub fn load<R: Read>(rules: Box<dyn RuleSet>, reader: R) -> BoardResult<Self> {
        let grid = io::read_board(reader)?;
        debug!(
            "Loaded {}x{} board ({} living cells)",
            grid.width(),
            grid.height(),
            grid.living_count()
        );
        Ok(Self::from_grid(rules, grid))
    }

    /// Load a board from a file in the binary board format
    pub fn load_from_path<P: AsRef<Path>>(rules: Box<dyn RuleSet>, path: P) -> BoardResult<Self> {
        let grid = io::load_board_from_file(path)?;
        Ok(Self::from_grid(rules, grid))
    }

    /// Serialize the board to a stream in the binary board format
    pub fn save<W: Write>(&self, writer: W) -> BoardResult<()> {
        io::write_board(&self.grid, writer)
    }

    /// Save the board to a file, replacing it only once the write succeeded
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> BoardResult<()> {
        io::save_board_to_file(&self.grid, path)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Number of generations advanced since the board was created or loaded
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current generation's grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Queries the currently-active rule set
    pub fn rule_set(&self) -> &dyn RuleSet {
        self.rules.as_ref()
    }

    /// Replace the rule set. Only later generations are affected.
    pub fn set_rule_set(&mut self, rules: Box<dyn RuleSet>) {
        info!("Switching rules from {} to {}", self.rules.name(), rules.name());
        self.rules = rules;
    }

    pub fn get_cell(&self, x: usize, y: usize) -> BoardResult<bool> {
        self.grid.get(x, y)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> BoardResult<()> {
        self.grid.set(x, y, alive)
    }

    /// Flip a cell and return its new state
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> BoardResult<bool> {
        let alive = !self.grid.get(x, y)?;
        self.grid.set(x, y, alive)?;
        Ok(alive)
    }

    /// Counts the living neighbors of an in-range cell. Off-board neighbors
    /// are dead.
    pub fn count_living_neighbors(&self, x: usize, y: usize) -> u8 {
        self.grid.count_neighbors(x, y)
    }

    /// Computes the next generation of the board
    pub fn advance(&mut self) {
        self.grid = self.grid.next_generation(self.rules.as_ref());
        self.generation += 1;
        trace!(
            "Generation {}: {} living cells",
            self.generation,
            self.grid.living_count()
        );
    }

    /// Advance the board several generations
    pub fn advance_by(&mut self, generations: usize) {
        for _ in 0..generations {
            self.advance();
        }
        debug!(
            "Advanced {} generations under {}, now at generation {}",
            generations,
            self.rules.name(),
            self.generation
        );
    }

    /// Kill every cell without touching the generation counter
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn living_count(&self) -> usize {
        self.grid.living_count()
    }

    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.grid.living_cells()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

impl Default for GameBoard {
    /// A 100x100 board with Conway's rules
    fn default() -> Self {
        Self::from_grid(Box::new(Conway), Grid::default())
    }
}
