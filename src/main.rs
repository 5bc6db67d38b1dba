use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use dirt_search::output::{ColorMode, StdoutSink};
use dirt_search::query::{Facing, RequestBuilder};
use dirt_search::search::SearchEngine;
use dirt_search::utils::{self, AppConfig};
use dirt_search::world;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const ROTATION_HELP: &str = "\
ROTATION
    rotation = 0   rotation = 1   rotation = 2   rotation = 3
    _____________  _____________  _____________  _____________
    |         ==|  |           |  |           |  | I         |
    |       ==  |  |           |  |           |  |  I        |
    |           |  |           |  |           |  |           |
    |           |  |        I  |  |  ==       |  |           |
    |___________|  |_________I_|  |==_________|  |___________|

EXAMPLES
    dirt -f north -r 0,3,1 -x -100 -X 100 -y 60 -Y 70 -z -100 -Z 100
    dirt -f east -c '{dx:0,dy:0,dz:0,r:2},{dx:1,dy:0,dz:0,r:1}' -x 0 -X 99 -y 64 -Y 64 -z 0 -Z 99";

#[derive(Parser)]
#[command(name = "dirt")]
#[command(about = "Find block positions whose random texture rotations match a pattern")]
#[command(allow_negative_numbers = true, args_conflicts_with_subcommands = true)]
#[command(after_help = ROTATION_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    search: SearchArgs,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long = "config", value_name = "FILE", global = true)]
    config_file: Option<PathBuf>,
}

#[derive(Args)]
struct SearchArgs {
    /// Facing while reading the rotations: north, east, south or west
    #[arg(short = 'f', long)]
    facing: Option<String>,

    /// Comma-separated rotations (0-3) of consecutive blocks along --direction
    #[arg(short = 'r', long = "rotation", value_name = "LIST")]
    rotation: Option<String>,

    /// Constraint objects, e.g. '{dx:0,dy:1,dz:0,r:3},{dx:1,dy:0,dz:0,r:0}'
    #[arg(short = 'c', long, value_name = "OBJECTS")]
    constraints: Option<String>,

    /// Axis the rotation list runs along: x, y or z [default: y]
    #[arg(short = 'd', long)]
    direction: Option<String>,

    /// Minimum x (inclusive)
    #[arg(short = 'x', long = "min-x", value_name = "MIN_X")]
    min_x: Option<i32>,

    /// Maximum x (inclusive)
    #[arg(short = 'X', long = "max-x", value_name = "MAX_X")]
    max_x: Option<i32>,

    /// Minimum y (inclusive)
    #[arg(short = 'y', long = "min-y", value_name = "MIN_Y")]
    min_y: Option<i32>,

    /// Maximum y (inclusive)
    #[arg(short = 'Y', long = "max-y", value_name = "MAX_Y")]
    max_y: Option<i32>,

    /// Minimum z (inclusive)
    #[arg(short = 'z', long = "min-z", value_name = "MIN_Z")]
    min_z: Option<i32>,

    /// Maximum z (inclusive)
    #[arg(short = 'Z', long = "max-z", value_name = "MAX_Z")]
    max_z: Option<i32>,

    /// Number of worker threads [default: CPU count]
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Print search statistics to stderr when done
    #[arg(long)]
    stats: bool,

    /// Colour match lines: auto, always or never
    #[arg(long, value_name = "WHEN")]
    color: Option<ColorMode>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rotation of a single block
    #[command(allow_negative_numbers = true)]
    Probe {
        x: i32,
        y: i32,
        z: i32,

        /// Report the rotation as it reads while facing this way
        #[arg(short, long)]
        facing: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let rendered = err.to_string();
            let message = rendered.lines().next().unwrap_or_default();
            exit_with_usage(message.trim_start_matches("error: "))
        }
    };
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Probe { x, y, z, facing }) => {
            let facing = match facing.as_deref().map(str::parse::<Facing>).transpose() {
                Ok(facing) => facing,
                Err(err) => exit_with_usage(&err),
            };
            println!("{}", probe(x, y, z, facing));
        }
        Some(Commands::Config { init }) => {
            show_config(cli.config_file, init)?;
        }
        None => {
            let config = load_config(cli.config_file.as_ref())?;
            run_search(cli.search, &config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("DIRT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

fn run_search(args: SearchArgs, config: &AppConfig) -> Result<()> {
    let mut builder = RequestBuilder::new()
        .bounds(
            (args.min_x, args.min_y, args.min_z),
            (args.max_x, args.max_y, args.max_z),
        )
        .workers(args.threads.unwrap_or_else(|| config.effective_threads()));
    if let Some(facing) = args.facing {
        builder = builder.facing(facing);
    }
    if let Some(direction) = args.direction {
        if args.constraints.is_some() {
            tracing::warn!("--direction only applies to --rotation lists; ignoring it");
        }
        builder = builder.direction(direction);
    }
    if let Some(rotation) = args.rotation {
        builder = builder.rotations(rotation);
    }
    if let Some(constraints) = args.constraints {
        builder = builder.constraints(constraints);
    }

    let request = match builder.build() {
        Ok(request) => request,
        Err(err) => exit_with_usage(&err),
    };

    let color = args.color.unwrap_or(config.color);
    let sink = StdoutSink::new(color);
    let engine =
        SearchEngine::from_request(request).with_progress(args.progress || config.progress);
    let stats = engine.run(&sink).context("Failed to write matches")?;

    if args.stats {
        eprintln!("{}", stats);
    }

    Ok(())
}

/// Rotation of one block, optionally as read while facing `facing`.
fn probe(x: i32, y: i32, z: i32, facing: Option<Facing>) -> i32 {
    let raw = world::orientation(x, y, z);
    let offset = facing.map(Facing::offset).unwrap_or(0);
    (raw - offset).rem_euclid(world::ORIENTATION_COUNT)
}

fn show_config(path: Option<PathBuf>, init: bool) -> Result<()> {
    let path = path
        .or_else(utils::get_config_path)
        .context("Could not determine config directory")?;

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            AppConfig::default().save_to(&path)?;
            println!("Wrote default config: {}", path.display());
        }
    }

    let config = if path.exists() {
        AppConfig::load_from(&path)?
    } else {
        AppConfig::default()
    };

    println!("Config file:      {}", path.display());
    println!("Threads:          {} (effective {})", config.threads, config.effective_threads());
    println!("Progress:         {}", config.progress);
    println!("Color:            {:?}", config.color);
    Ok(())
}

/// Report an invalid command line with the full usage text and exit with
/// status 1.
fn exit_with_usage(message: impl fmt::Display) -> ! {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "Error: {}", message);
    let _ = writeln!(stderr);
    let _ = Cli::command().write_help(&mut stderr);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_probe_with_facing() {
        // Raw rotation at (1, 2, 3) is 2
        assert_eq!(probe(1, 2, 3, None), 2);
        assert_eq!(probe(1, 2, 3, Some(Facing::North)), 2);
        assert_eq!(probe(1, 2, 3, Some(Facing::West)), 3);
    }

    #[test]
    fn test_parses_negative_bounds() {
        let cli = Cli::try_parse_from([
            "dirt", "-f", "north", "-r", "0,1", "-x", "-10", "-X", "-1", "-y", "0", "-Y", "5",
            "-z", "-3", "-Z", "3",
        ])
        .unwrap();
        assert_eq!(cli.search.min_x, Some(-10));
        assert_eq!(cli.search.max_x, Some(-1));
        assert_eq!(cli.search.min_z, Some(-3));
    }

    #[test]
    fn test_parses_probe() {
        let cli = Cli::try_parse_from(["dirt", "probe", "-5", "64", "-7", "--facing", "east"])
            .unwrap();
        match cli.command {
            Some(Commands::Probe { x, y, z, facing }) => {
                assert_eq!((x, y, z), (-5, 64, -7));
                assert_eq!(facing.as_deref(), Some("east"));
            }
            _ => panic!("expected probe subcommand"),
        }
    }

    #[test]
    fn test_rejects_non_integer_bound() {
        assert!(Cli::try_parse_from(["dirt", "-f", "north", "-x", "ten"]).is_err());
    }
}
