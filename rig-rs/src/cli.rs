//! Root CLI structure for rig-rs

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "rig-rs")]
#[command(about = "Command-line tools for skeletal animation rigs", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List archetypes with their bones and clips
    Info {
        /// Archetype configuration (JSON or YAML); bundled archetypes if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only show this archetype
        #[arg(short, long)]
        archetype: Option<String>,
    },

    /// Display an archetype's bone hierarchy as a tree
    Skeleton {
        /// Archetype name
        archetype: String,

        /// Archetype configuration (JSON or YAML); bundled archetypes if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Load and validate an archetype configuration
    Validate {
        /// Configuration file (JSON or YAML)
        file: PathBuf,
    },

    /// Run a headless simulation and print each frame
    Simulate {
        /// Archetype to spawn
        #[arg(short, long)]
        archetype: String,

        /// Clip to start with
        #[arg(short = 'C', long, default_value = "idle")]
        clip: String,

        /// Number of ticks to run
        #[arg(short, long, default_value = "60")]
        frames: u32,

        /// Seconds per tick
        #[arg(long, default_value_t = rig_anim::DEFAULT_TICK)]
        dt: f32,

        /// Archetype configuration (JSON or YAML); bundled archetypes if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per frame
    Text,
    /// Full frame snapshots as a JSON array
    Json,
}
