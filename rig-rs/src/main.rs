//! Main entry point for the rig-rs CLI

mod cli;
mod commands;
mod utils;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Set verbosity
    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    match cli.command {
        Commands::Info { config, archetype } => {
            commands::info::execute(config.as_deref(), archetype.as_deref())
        }
        Commands::Skeleton {
            archetype,
            config,
            depth,
            no_color,
        } => commands::skeleton::execute(&archetype, config.as_deref(), depth, no_color),
        Commands::Validate { file } => commands::validate::execute(&file),
        Commands::Simulate {
            archetype,
            clip,
            frames,
            dt,
            config,
            format,
        } => commands::simulate::execute(&commands::simulate::SimulateArgs {
            archetype,
            clip,
            frames,
            dt,
            config,
            format,
        }),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
