mod bench;
mod findup;
mod plan;
mod verify;

use clap::{Parser, Subcommand};

/// xtask command-line interface
#[derive(Parser)]
#[command(name = "xtask", version, about = "Summed-area table auxiliary tasks")]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Supported subcommands
#[derive(Subcommand)]
enum Command {
    /// Time each strategy over the runs of a plan
    Bench(bench::BenchArgs),
    /// Check each strategy's tables against a reference strategy
    Verify(verify::VerifyArgs),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Bench(args) => bench::run(args),
        Command::Verify(args) => verify::run(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
