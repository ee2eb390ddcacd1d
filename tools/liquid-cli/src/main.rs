//! Liquid CLI — Command-line interface for exercising the transition animator.
//!
//! Usage:
//!   liquid simulate <FILE>     Replay a recorded gesture through the animator
//!   liquid curve [CURVE]       Sample a timing curve
//!   liquid validate <FILE>     Validate a gesture stream
//!   liquid config show|init    Inspect or create the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use liquid_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "liquid",
    about = "Interactive percent-driven transitions, replayed offline",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded gesture stream through the animator
    Simulate {
        /// Path to the gesture stream (JSONL)
        path: PathBuf,

        /// Base transition duration (seconds)
        #[arg(long)]
        duration: Option<f64>,

        /// Timing curve: linear|ease-in|ease-out|ease-in-out|default|cubic-bezier(x1,y1,x2,y2)
        #[arg(long)]
        curve: Option<String>,

        /// Enable smoothing with the given window (seconds)
        #[arg(long)]
        smooth: Option<f64>,

        /// Translation mapping onto a complete transition (points)
        #[arg(long)]
        pan_distance: Option<f64>,

        /// Simulated display refresh rate (Hz)
        #[arg(long)]
        fps: Option<u32>,

        /// Print every percent change
        #[arg(long)]
        trace: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sample a timing curve
    Curve {
        /// Curve name or cubic-bezier(x1,y1,x2,y2)
        #[arg(default_value = "default")]
        curve: String,

        /// Number of evenly spaced samples
        #[arg(long, default_value = "11")]
        samples: usize,

        /// Sample every stock curve side by side
        #[arg(long)]
        all: bool,
    },

    /// Validate a gesture stream
    Validate {
        /// Path to the gesture stream (JSONL)
        path: PathBuf,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config init` writes a fresh file, so nothing needs to exist yet.
    let writes_config = matches!(
        cli.command,
        Commands::Config {
            action: ConfigAction::Init { .. }
        }
    );
    let config = match &cli.config {
        Some(_) if writes_config => AppConfig::default(),
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    liquid_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Simulate {
            path,
            duration,
            curve,
            smooth,
            pan_distance,
            fps,
            trace,
            json,
        } => commands::simulate::run(
            &config,
            path,
            commands::simulate::Overrides {
                duration,
                curve,
                smooth,
                pan_distance,
                fps,
            },
            trace,
            json,
        ),
        Commands::Curve {
            curve,
            samples,
            all,
        } => commands::curve::run(curve, samples, all),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config, cli.config.as_deref()),
            ConfigAction::Init { force } => commands::config::init(cli.config.as_deref(), force),
        },
    }
}
