use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use herding::manager::Manager;
use std::{io, path::PathBuf};

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report whether the model parameters are valid, risky or invalid.
    Validate,

    /// Run the simulation and print one row per recorded step.
    Simulate {
        /// Print noisy observations instead of latent states.
        #[arg(long)]
        noisy: bool,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(&args.config).context("failed to construct mgr")?;

    match args.command {
        Command::Validate => println!("{}", mgr.validate().name()),
        Command::Simulate { noisy } => {
            let stdout = io::stdout();
            let mut writer = io::BufWriter::new(stdout.lock());
            mgr.simulate(noisy, &mut writer)?;
        }
    }

    Ok(())
}
