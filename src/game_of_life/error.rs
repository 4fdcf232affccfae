//! Error types for board and rule operations

use thiserror::Error;

/// Result type returned by fallible board routines.
pub type BoardResult<T> = Result<T, BoardError>;

/// Error raised by the board engine and its persistence layer.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is out of range for a {width}x{height} board")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid board dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    /// Persisted board data is truncated or malformed.
    #[error("invalid board data: {0}")]
    InvalidBoard(String),

    #[error("neighbor count {0} is outside the Moore neighborhood range 0..=8")]
    InvalidNeighborCount(u8),

    #[error("board I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised when a rule name or `B/S` notation cannot be parsed.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RuleParseError {
    #[error("unknown rule set '{0}'")]
    UnknownRule(String),
    #[error("rule notation '{0}' must look like B3/S23")]
    MalformedNotation(String),
    #[error("neighbor count '{0}' in rule notation is not a digit from 0 to 8")]
    InvalidDigit(char),
    #[error("neighbor count {0} is outside the range 0..=8")]
    CountOutOfRange(u8),
}
