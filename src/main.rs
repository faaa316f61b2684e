use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use phosphor_uikit::cli::Cli;
use phosphor_uikit::commands;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and are not failures. If printing
            // itself fails there is nowhere left to report it.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match commands::generate::run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "❌ Error:".red(), err);
            ExitCode::FAILURE
        }
    }
}
