//! File I/O for boards: the binary board format and plain-text patterns
//!
//! Binary board format (big-endian):
//!
//! ```text
//! int32   width
//! int32   height
//! u8[]    width * height cells, y outer and x inner, nonzero = alive
//! ```

use super::error::{BoardError, BoardResult};
use super::Grid;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Size of the width/height header in bytes
pub const HEADER_LEN: usize = 8;

/// Read a grid in the binary board format.
///
/// A stream that ends early, declares a non-positive dimension, or carries
/// bytes past the last cell is rejected as [`BoardError::InvalidBoard`].
pub fn read_board<R: Read>(mut reader: R) -> BoardResult<Grid> {
    let width = read_dimension(&mut reader, "width")?;
    let height = read_dimension(&mut reader, "height")?;
    let expected = width.checked_mul(height).ok_or_else(|| {
        BoardError::InvalidBoard(format!("{}x{} board is too large", width, height))
    })?;

    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(expected as u64)
        .read_to_end(&mut payload)?;
    if payload.len() < expected {
        return Err(BoardError::InvalidBoard(format!(
            "{}x{} board needs {} cell bytes, stream has {}",
            width,
            height,
            expected,
            payload.len()
        )));
    }

    let mut trailing = [0u8; 1];
    if reader.read(&mut trailing)? != 0 {
        return Err(BoardError::InvalidBoard(format!(
            "unexpected data after {} cell bytes",
            expected
        )));
    }

    Grid::from_raw(width, height, payload.into_iter().map(|b| b != 0).collect())
}

fn read_dimension<R: Read>(reader: &mut R, what: &str) -> BoardResult<usize> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            BoardError::InvalidBoard(format!("stream ends before the board {}", what))
        }
        _ => BoardError::Io(e),
    })?;

    let value = i32::from_be_bytes(buf);
    if value <= 0 {
        return Err(BoardError::InvalidBoard(format!(
            "board {} must be positive, found {}",
            what, value
        )));
    }
    Ok(value as usize)
}

/// Encode a grid in the binary board format
pub fn encode_board(grid: &Grid) -> BoardResult<Vec<u8>> {
    let invalid = || BoardError::InvalidDimensions {
        width: grid.width(),
        height: grid.height(),
    };
    let width = i32::try_from(grid.width()).map_err(|_| invalid())?;
    let height = i32::try_from(grid.height()).map_err(|_| invalid())?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + grid.cells().len());
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend(grid.cells().iter().map(|&alive| u8::from(alive)));
    Ok(bytes)
}

/// Write a grid in the binary board format.
///
/// The whole board is encoded in memory first and handed to the writer in a
/// single `write_all`.
pub fn write_board<W: Write>(grid: &Grid, mut writer: W) -> BoardResult<()> {
    let bytes = encode_board(grid)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Load a grid from a binary board file
pub fn load_board_from_file<P: AsRef<Path>>(path: P) -> BoardResult<Grid> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let grid = read_board(BufReader::new(file))?;
    debug!(
        "Read {}x{} board from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(grid)
}

/// Save a grid to a binary board file.
///
/// The board is written to a temporary file next to `path` and renamed over
/// it, so an existing board is never left half-written.
pub fn save_board_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> BoardResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    write_board(grid, &mut temp)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| BoardError::Io(e.error))?;

    debug!(
        "Wrote {}x{} board to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}

/// Parse a grid from its text pattern form.
/// Format: each line is a row, with '1' for alive cells and '0' for dead cells
pub fn parse_pattern(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (y, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(x, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    x,
                    y
                ),
            })
            .collect::<Result<Vec<bool>>>()?;
        rows.push(row);
    }

    Grid::from_rows(rows).context("Pattern rows do not form a rectangle")
}

/// Convert a grid to its text pattern form
pub fn pattern_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));
    for row in grid.rows() {
        result.extend(row.iter().map(|&alive| if alive { '1' } else { '0' }));
        result.push('\n');
    }
    result
}

/// Load a grid from a text pattern file
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern file: {}", path.as_ref().display()))
}

/// Save a grid to a text pattern file
pub fn save_pattern_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, pattern_to_string(grid))
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))
}

/// Well-known patterns written by [`create_example_boards`]
pub const EXAMPLE_PATTERNS: [(&str, &str); 4] = [
    ("glider", "01000\n00100\n11100\n00000\n00000\n"),
    ("blinker", "000\n111\n000\n"),
    ("block", "0000\n0110\n0110\n0000\n"),
    ("beacon", "110000\n110000\n001100\n001100\n"),
];

/// Write the example patterns as `<name>.board` files
pub fn create_example_boards<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, pattern) in EXAMPLE_PATTERNS {
        let grid = parse_pattern(pattern)?;
        let path = dir.join(format!("{}.board", name));
        save_board_to_file(&grid, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

/// Load every `.board` file in a directory, skipping unreadable ones
pub fn load_boards_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, Grid)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut grids = Vec::new();
    for entry in dir {
        let path = entry.context("Failed to read directory entry")?.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "board") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        match load_board_from_file(&path) {
            Ok(grid) => grids.push((name, grid)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    grids.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(grids)
}
