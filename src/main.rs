//! Command-line Game of Life player

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use game_of_life::{
    analysis::classify,
    config::{CliOverrides, DisplayMode, InputFormat, OutputFormat, Settings},
    life::create_example_grids,
    load_game,
    utils::{ColorOutput, GridFormatter},
    Player,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "game_of_life")]
#[command(about = "Conway's Game of Life on a finite grid")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game from an initial state file
    Run(RunArgs),

    /// Create a default configuration and example pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Describe an initial state without playing it
    Inspect {
        /// Initial state file
        input: PathBuf,

        /// Initial state file format
        #[arg(short, long, value_enum, default_value = "coordinates")]
        format: InputFormat,

        /// Generations to simulate when classifying the pattern
        #[arg(short, long, default_value_t = 100)]
        lookahead: u64,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Initial state file (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Initial state file format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Number of generations (overrides config)
    #[arg(short, long)]
    generations: Option<u64>,

    /// Dead border added around the initial state (overrides config)
    #[arg(short, long)]
    margin: Option<usize>,

    /// Delay between generations in milliseconds (overrides config)
    #[arg(short, long)]
    delay: Option<u64>,

    /// How to render each generation (overrides config)
    #[arg(long, value_enum)]
    display: Option<DisplayMode>,

    /// Evolve cells on all cores
    #[arg(long)]
    parallel: bool,

    /// Stop once the universe dies out, freezes or repeats
    #[arg(long)]
    stop_when_stable: bool,

    /// Recent generations compared when looking for repeats, 0 to skip
    /// detection (overrides config)
    #[arg(long)]
    stability_window: Option<usize>,

    /// Run report format (overrides config)
    #[arg(long, value_enum)]
    report_format: Option<OutputFormat>,

    /// Write the run report to this file instead of stdout (overrides config)
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = dispatch(cli.command) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:?}", err)));
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run_command(args),
        Commands::Setup { directory, force } => setup_command(&directory, force),
        Commands::Inspect {
            input,
            format,
            lookahead,
        } => inspect_command(&input, format, lookahead),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::warn!(
            "config file {} not found, using defaults",
            config_path.display()
        );
        Ok(Settings::default())
    }
}

fn run_command(args: RunArgs) -> Result<()> {
    let mut settings = load_settings(&args.config)?;

    settings.merge_with_cli(&CliOverrides {
        generations: args.generations,
        parallel: args.parallel,
        stop_when_stable: args.stop_when_stable,
        stability_window: args.stability_window,
        initial_state_file: args.input,
        input_format: args.format,
        margin: args.margin,
        display_mode: args.display,
        frame_delay_ms: args.delay,
        output_format: args.report_format,
        report_file: args.report,
    });

    settings.validate().context("Configuration validation failed")?;

    let mut game = load_game(&settings).context("Failed to load initial state")?;
    let (rows, columns) = game.dimensions();
    log::info!(
        "playing {}x{} grid for up to {} generations",
        rows,
        columns,
        settings.simulation.generations
    );

    let stdout = std::io::stdout();
    let report = Player::new(&settings)
        .play(&mut game, &mut stdout.lock())
        .context("Failed to play game")?;

    match settings.output.report_file {
        Some(ref path) => {
            report.save_to_file(path, settings.output.format)?;
            println!(
                "{}",
                ColorOutput::success(&format!("Report saved to {}", path.display()))
            );
        }
        None => println!("{}", report.render(settings.output.format)?),
    }

    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input");

    for dir in [&config_dir, &input_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Paths inside configs are relative to `directory`, where the player is
    // expected to run.
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir).context("Failed to create example grids")?;
    println!("Created example initial states in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");

    let mut blinker = Settings::default();
    blinker.input.initial_state_file = PathBuf::from("input/bitmap/blinker.txt");
    blinker.input.format = InputFormat::Bitmap;
    blinker.display.mode = DisplayMode::Compact;
    blinker.to_file(examples_dir.join("blinker.yaml"))?;

    let mut glider = Settings::default();
    glider.simulation.generations = 200;
    glider.simulation.stop_when_stable = true;
    glider.input.margin = 10;
    glider.display.mode = DisplayMode::Compact;
    glider.display.highlight_ever_alive = true;
    glider.output.format = OutputFormat::Json;
    glider.to_file(examples_dir.join("glider.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your initial states to {}", input_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn inspect_command(input: &Path, format: InputFormat, lookahead: u64) -> Result<()> {
    let grid = game_of_life::life::load_grid_from_file(input, format, 0)
        .with_context(|| format!("Failed to load initial state from {}", input.display()))?;

    let (rows, columns) = grid.dimensions();
    let population = grid.living_count();

    println!("Initial State ({}x{}):", rows, columns);
    println!("{}", GridFormatter::format_grid_with_coords(&grid, false));
    println!("Grid Statistics:");
    println!("  Living cells: {}", population);
    println!(
        "  Density: {:.1}%",
        population as f64 / (rows * columns) as f64 * 100.0
    );

    match classify(&grid, lookahead) {
        Some((generation, stability)) => println!(
            "  Outcome: {}",
            ColorOutput::success(&format!("{} at generation {}", stability, generation))
        ),
        None => println!(
            "  Outcome: {}",
            ColorOutput::warning(&format!("still evolving after {} generations", lookahead))
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
            "--display",
            "none",
            "--format",
            "bitmap",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["game_of_life", "-v", "inspect", "state.txt", "-l", "7"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["game_of_life", "run", "--display", "fancy"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/glider.yaml").exists());
        assert!(temp_dir.path().join("input/coordinates/glider.txt").exists());
        assert!(temp_dir.path().join("input/bitmap/blinker.txt").exists());

        // A second run keeps the existing configuration.
        setup_command(temp_dir.path(), false).unwrap();
    }

    #[test]
    fn test_run_command_writes_report() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();
        let report_path = temp_dir.path().join("report.json");

        run_command(RunArgs {
            config: temp_dir.path().join("missing.yaml"),
            input: Some(temp_dir.path().join("coordinates/blinker.txt")),
            format: Some(InputFormat::Coordinates),
            generations: Some(4),
            margin: None,
            delay: Some(0),
            display: Some(DisplayMode::None),
            parallel: true,
            stop_when_stable: false,
            stability_window: None,
            report_format: Some(OutputFormat::Json),
            report: Some(report_path.clone()),
        })
        .unwrap();

        let report: game_of_life::RunReport =
            serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(report.generations_run, 4);
        assert_eq!(report.final_population, 3);
    }

    #[test]
    fn test_dispatch_reports_errors() {
        let temp_dir = tempdir().unwrap();
        let result = dispatch(Commands::Inspect {
            input: temp_dir.path().join("absent.txt"),
            format: InputFormat::Bitmap,
            lookahead: 1,
        });
        let message = format!("{:?}", result.unwrap_err());
        assert!(message.contains("absent.txt"));
    }

    #[test]
    fn test_run_command_rejects_missing_input() {
        let temp_dir = tempdir().unwrap();
        let result = run_command(RunArgs {
            config: temp_dir.path().join("missing.yaml"),
            input: Some(temp_dir.path().join("absent.txt")),
            format: None,
            generations: None,
            margin: None,
            delay: None,
            display: None,
            parallel: false,
            stop_when_stable: false,
            stability_window: None,
            report_format: None,
            report: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_command() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();
        inspect_command(
            &temp_dir.path().join("bitmap/block.txt"),
            InputFormat::Bitmap,
            10,
        )
        .unwrap();
    }
}
