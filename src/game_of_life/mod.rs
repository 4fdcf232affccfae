//! Game of Life core functionality

pub mod board;
pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use board::GameBoard;
pub use error::{BoardError, BoardResult, RuleParseError};
pub use grid::Grid;
pub use io::{create_example_boards, load_pattern_from_file, save_pattern_to_file};
pub use rules::{rule_set_from_name, Conway, HighLife, LifeLike, RuleSet};
