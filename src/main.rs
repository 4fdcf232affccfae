//! Command line front end for the bounded Game of Life board

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use life_board::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{
        create_example_boards, io::load_boards_from_directory, load_pattern_from_file,
        rules::available_rule_sets, save_pattern_to_file, GameBoard,
    },
    utils::{BoardFormatter, ColorOutput},
};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "life_board")]
#[command(about = "Bounded Game of Life board simulator")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Visual,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Visual => OutputFormat::Visual,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty board file
    New {
        /// Board file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Board width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Board height (overrides config)
        #[arg(long)]
        height: Option<usize>,
    },

    /// Advance a saved board some number of generations
    Run {
        /// Board file to load
        #[arg(short, long)]
        input: PathBuf,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Rule set name or B/S notation (overrides config)
        #[arg(short, long)]
        rule: Option<String>,

        /// Where to save the advanced board
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print every intermediate generation
        #[arg(long)]
        show_evolution: bool,
    },

    /// Set or clear cells of a saved board in place
    Set {
        /// Board file to edit
        #[arg(short, long)]
        input: PathBuf,

        /// Cell coordinates as X,Y (repeatable)
        #[arg(long = "cell", value_parser = parse_cell, required = true)]
        cells: Vec<(usize, usize)>,

        /// Kill the cells instead of bringing them to life
        #[arg(long)]
        dead: bool,
    },

    /// Print a saved board
    Show {
        /// Board file to load
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Convert a text pattern of 0s and 1s into a board file
    Import {
        #[arg(short, long)]
        pattern: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a board file into a text pattern of 0s and 1s
    Export {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        pattern: PathBuf,
    },

    /// List the built-in rule sets
    Rules,

    /// Create a default configuration and example boards
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_cell(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let coordinate = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid coordinate '{}': {}", part, e))
    };
    Ok((coordinate(x)?, coordinate(y)?))
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", e)));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialize logger")?;

    match cli.command {
        Commands::New { output, width, height } => {
            let overrides = CliOverrides {
                width,
                height,
                ..CliOverrides::default()
            };
            new_command(&cli.config, &overrides, &output)
        }
        Commands::Run {
            input,
            generations,
            rule,
            output,
            format,
            show_evolution,
        } => {
            let overrides = CliOverrides {
                generations,
                rule,
                format: format.map(OutputFormat::from),
                show_each_generation: show_evolution,
                ..CliOverrides::default()
            };
            run_command(&cli.config, &overrides, &input, output.as_deref())
        }
        Commands::Set { input, cells, dead } => set_command(&cli.config, &input, &cells, !dead),
        Commands::Show { input, format } => {
            let overrides = CliOverrides {
                format: format.map(OutputFormat::from),
                ..CliOverrides::default()
            };
            show_command(&cli.config, &overrides, &input)
        }
        Commands::Import { pattern, output } => import_command(&pattern, &output),
        Commands::Export { input, pattern } => export_command(&cli.config, &input, &pattern),
        Commands::Rules => {
            rules_command();
            Ok(())
        }
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = Settings::from_file_or_default(config_path)?;
    settings.merge_with_cli(overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

fn load_board(settings: &Settings, path: &Path) -> Result<GameBoard> {
    GameBoard::load_from_path(settings.rule_set()?, path)
        .with_context(|| format!("Failed to load board from {}", path.display()))
}

fn new_command(config_path: &Path, overrides: &CliOverrides, output: &Path) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    let board = GameBoard::new(
        settings.rule_set()?,
        settings.board.width,
        settings.board.height,
    )?;
    board
        .save_to_path(output)
        .with_context(|| format!("Failed to save board to {}", output.display()))?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Created empty {}x{} board at {}",
            board.width(),
            board.height(),
            output.display()
        ))
    );
    Ok(())
}

fn run_command(
    config_path: &Path,
    overrides: &CliOverrides,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    let mut board = load_board(&settings, input)?;
    let format = settings.output.format;

    info!(
        "Running {} generations of {}",
        settings.simulation.generations,
        board.rule_set().name()
    );

    if settings.output.show_each_generation {
        println!("{}", BoardFormatter::render(&board, format)?);
        for _ in 0..settings.simulation.generations {
            board.advance();
            println!("{}", BoardFormatter::render(&board, format)?);
        }
    } else {
        board.advance_by(settings.simulation.generations);
        println!("{}", BoardFormatter::render(&board, format)?);
    }

    if let Some(output) = output {
        board
            .save_to_path(output)
            .with_context(|| format!("Failed to save board to {}", output.display()))?;
        println!(
            "{}",
            ColorOutput::success(&format!("Saved board to {}", output.display()))
        );
    }

    Ok(())
}

fn set_command(config_path: &Path, input: &Path, cells: &[(usize, usize)], alive: bool) -> Result<()> {
    let settings = load_settings(config_path, &CliOverrides::default())?;
    let mut board = load_board(&settings, input)?;

    for &(x, y) in cells {
        board
            .set_cell(x, y, alive)
            .with_context(|| format!("Cannot set cell ({}, {})", x, y))?;
    }
    board
        .save_to_path(input)
        .with_context(|| format!("Failed to save board to {}", input.display()))?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Updated {} cell(s) in {}",
            cells.len(),
            input.display()
        ))
    );
    Ok(())
}

fn show_command(config_path: &Path, overrides: &CliOverrides, input: &Path) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    let board = load_board(&settings, input)?;

    println!("{}", BoardFormatter::render(&board, settings.output.format)?);
    if settings.output.format != OutputFormat::Json {
        println!("{}", BoardFormatter::format_statistics(&board));
    }
    Ok(())
}

fn import_command(pattern: &Path, output: &Path) -> Result<()> {
    let grid = load_pattern_from_file(pattern)?;
    life_board::game_of_life::io::save_board_to_file(&grid, output)
        .with_context(|| format!("Failed to save board to {}", output.display()))?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Imported {}x{} pattern into {}",
            grid.width(),
            grid.height(),
            output.display()
        ))
    );
    Ok(())
}

fn export_command(config_path: &Path, input: &Path, pattern: &Path) -> Result<()> {
    let settings = load_settings(config_path, &CliOverrides::default())?;
    let board = load_board(&settings, input)?;
    save_pattern_to_file(board.grid(), pattern)?;

    println!(
        "{}",
        ColorOutput::success(&format!("Exported board to {}", pattern.display()))
    );
    Ok(())
}

fn rules_command() {
    println!("Built-in rule sets:");
    for (name, description) in available_rule_sets() {
        println!("  {:10} {}", name, description);
    }
    println!("Any B/S notation (for example B36/S23) is also accepted.");
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up board simulator..."));

    let config_path = directory.join("config").join("default.yaml");
    if config_path.exists() && !force {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} already exists, use --force to overwrite",
                config_path.display()
            ))
        );
    } else {
        Settings::default().to_file(&config_path)?;
        println!("Created default configuration: {}", config_path.display());
    }

    let boards_dir = directory.join("boards");
    create_example_boards(&boards_dir)?;
    println!("Created example boards in: {}", boards_dir.display());
    for (name, grid) in load_boards_from_directory(&boards_dir)? {
        println!(
            "  {:10} {}x{}, {} living cells",
            name,
            grid.width(),
            grid.height(),
            grid.living_count()
        );
    }

    println!("\n{}", ColorOutput::success("Setup complete!"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_board::game_of_life::Conway;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_board",
            "run",
            "--input",
            "glider.board",
            "--generations",
            "5",
            "--rule",
            "B36/S23",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from([
            "life_board",
            "set",
            "--input",
            "a.board",
            "--cell",
            "1,2",
            "--cell",
            "3, 4",
        ])
        .unwrap();
        match cli.command {
            Commands::Set { cells, dead, .. } => {
                assert_eq!(cells, vec![(1, 2), (3, 4)]);
                assert!(!dead);
            }
            _ => panic!("expected set command"),
        }

        assert!(Cli::try_parse_from(["life_board", "set", "--input", "a.board", "--cell", "1"]).is_err());
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("0,9"), Ok((0, 9)));
        assert!(parse_cell("-1,2").is_err());
        assert!(parse_cell("12").is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("boards/glider.board").exists());

        // Running setup again keeps the config and rewrites the boards
        setup_command(temp_dir.path(), false).unwrap();
        let boards = load_boards_from_directory(temp_dir.path().join("boards")).unwrap();
        assert_eq!(boards.len(), 4);
    }

    #[test]
    fn test_new_set_run_round_trip() {
        let temp_dir = tempdir().unwrap();
        let config = temp_dir.path().join("missing.yaml");
        let board_path = temp_dir.path().join("blinker.board");
        let next_path = temp_dir.path().join("next.board");

        let overrides = CliOverrides {
            width: Some(5),
            height: Some(5),
            ..CliOverrides::default()
        };
        new_command(&config, &overrides, &board_path).unwrap();
        set_command(&config, &board_path, &[(1, 2), (2, 2), (3, 2)], true).unwrap();
        run_command(&config, &CliOverrides::default(), &board_path, Some(&next_path)).unwrap();

        let next = GameBoard::load_from_path(Box::new(Conway), &next_path).unwrap();
        assert_eq!(next.living_cells(), vec![(2, 1), (2, 2), (2, 3)]);

        assert!(set_command(&config, &board_path, &[(5, 0)], true).is_err());
    }

    #[test]
    fn test_import_export() {
        let temp_dir = tempdir().unwrap();
        let config = temp_dir.path().join("missing.yaml");
        let pattern = temp_dir.path().join("in.txt");
        let board_path = temp_dir.path().join("in.board");
        let exported = temp_dir.path().join("out.txt");

        std::fs::write(&pattern, "010\n001\n111\n").unwrap();
        import_command(&pattern, &board_path).unwrap();
        export_command(&config, &board_path, &exported).unwrap();
        assert_eq!(std::fs::read_to_string(&exported).unwrap(), "010\n001\n111\n");
    }
}
