//! Configuration management for the board simulator

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, OutputConfig, OutputFormat, Settings, SimulationConfig,
};
