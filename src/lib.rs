//! Bounded Game of Life board engine
//!
//! This library provides a fixed-size, non-wrapping Game of Life board with
//! pluggable rule sets and a compact binary save format.

pub mod config;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{BoardError, GameBoard, Grid, RuleSet};

use anyhow::{Context, Result};
use std::path::Path;

/// Load a saved board, advance it under the configured rules, and return it
pub fn simulate<P: AsRef<Path>>(settings: &Settings, board_file: P) -> Result<GameBoard> {
    let rules = settings.rule_set()?;
    let mut board = GameBoard::load_from_path(rules, &board_file).with_context(|| {
        format!("Failed to load board from {}", board_file.as_ref().display())
    })?;
    board.advance_by(settings.simulation.generations);
    Ok(board)
}
