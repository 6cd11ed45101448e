use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "ringflow",
    about = "ringflow — diffusion load balancing on a processor ring",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario: one simulation per processor count.
    ///
    /// Values come from the scenario file when given, otherwise from the
    /// built-in scenario (3, 5, 10, 50, 100 and 250 processors, loads in
    /// [10, 1000], intervals in [100, 1000]). Flags override both.
    Run(commands::run::RunArgs),
    /// Write the built-in scenario to a TOML file
    Scaffold {
        #[arg(short, long, default_value = "ringflow.toml")]
        path: PathBuf,
        /// Pin the seed in the generated file
        #[arg(long)]
        seed: Option<u64>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ringflow=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(&args),
        Commands::Scaffold { path, seed, force } => {
            commands::scaffold::scaffold(&path, seed, force)
        }
    }
}
