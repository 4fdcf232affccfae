//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{GameBoard, Grid};
use anyhow::Result;
use serde::Serialize;

/// Serializable view of a board for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    pub generation: u64,
    pub rule: String,
    pub living_cells: usize,
    /// One string per row, `1` alive and `0` dead
    pub rows: Vec<String>,
}

impl BoardSnapshot {
    pub fn of(board: &GameBoard) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            generation: board.generation(),
            rule: board.rule_set().name().to_string(),
            living_cells: board.living_count(),
            rows: board
                .grid()
                .rows()
                .map(|row| row.iter().map(|&alive| if alive { '1' } else { '0' }).collect())
                .collect(),
        }
    }
}

/// Format boards for console output
pub struct BoardFormatter;

impl BoardFormatter {
    /// Render a board in the requested output format
    pub fn render(board: &GameBoard, format: OutputFormat) -> Result<String> {
        let output = match format {
            OutputFormat::Text => {
                let mut output = Self::format_board_header(board);
                output.push_str(&Self::format_grid_compact(board.grid()));
                output
            }
            OutputFormat::Visual => {
                let mut output = Self::format_board_header(board);
                output.push_str(&Self::format_grid_with_coords(board.grid()));
                output
            }
            OutputFormat::Json => serde_json::to_string_pretty(&BoardSnapshot::of(board))?,
        };
        Ok(output)
    }

    /// One-line summary of the board
    pub fn format_board_header(board: &GameBoard) -> String {
        format!(
            "Generation {} ({}x{}, {}, living: {}):\n",
            board.generation(),
            board.width(),
            board.height(),
            board.rule_set().name(),
            board.living_count()
        )
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for row in grid.rows() {
            output.extend(row.iter().map(|&alive| if alive { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (y, row) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &alive in row {
                output.push_str(if alive { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Grid statistics used by the `show` command
    pub fn format_statistics(board: &GameBoard) -> String {
        let total = board.width() * board.height();
        let living = board.living_count();
        format!(
            "Board Statistics:\n  Size: {}x{}\n  Living cells: {}\n  Density: {:.1}%\n",
            board.width(),
            board.height(),
            living,
            living as f64 / total as f64 * 100.0
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
