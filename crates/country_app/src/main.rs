mod platform;

use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let args = platform::cli::Args::parse();
    platform::run_app(args)
}
