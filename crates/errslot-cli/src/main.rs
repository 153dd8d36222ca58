use std::process::ExitCode;

use clap::Parser;

use errslot_cli::{ChainOptions, run_main};

#[derive(Parser, Debug)]
#[command(
    name = "errslot",
    about = "errslot: create an error deep in a call chain and watch it surface",
    version
)]
pub struct Cli {
    #[command(flatten)]
    chain: ChainOptions,
}

pub fn run(args: Cli) -> ExitCode {
    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let (status, report) = run_main(&args.chain);
    tracing::info!(status, depth = args.chain.depth, "chain complete");

    match (status, report) {
        (true, _) => {
            println!("ok");
            ExitCode::SUCCESS
        }
        (false, Some(report)) => {
            eprintln!("{report}");
            ExitCode::FAILURE
        }
        (false, None) => {
            eprintln!("Error: chain failed (error discarded)");
            ExitCode::FAILURE
        }
    }
}

pub fn main() -> ExitCode {
    let args = Cli::parse();
    run(args)
}
