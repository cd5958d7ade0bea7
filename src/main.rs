//! pony-docgen CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pony_docgen::cli::{Cli, Commands};
use pony_docgen::commands::{run_generate, run_inject, CommandContext};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> pony_docgen::Result<String> {
    let ctx = CommandContext::from_cli(cli)?;

    match &cli.command {
        Commands::Generate(args) => run_generate(args, &ctx),
        Commands::Inject(args) => run_inject(args, &ctx),
    }
}

/// Logs go to stderr so stdout carries only the generated document.
/// `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "pony_docgen=debug"
    } else {
        "pony_docgen=info"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
