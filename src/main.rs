// Entrypoint for the CLI application.
// - Keeps `main` small: load configuration, install logging, hand off
//   to `cli::run`.
// - Any error reaching this level is printed once and mapped to a
//   non-zero exit code.

use clap::Parser;
use crossterm::style::Stylize;
use std::process::ExitCode;
use wb_anki::cli::{self, Args};
use wb_anki::config::{self, Config};

fn try_main(args: &Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    config.validate()?;
    cli::init_logging(&config);

    cli::run(args, &config)?;
    Ok(())
}

fn main() -> ExitCode {
    config::load_env();
    let args = Args::parse();

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("❌ Error: {e:#}").red());
            ExitCode::FAILURE
        }
    }
}
