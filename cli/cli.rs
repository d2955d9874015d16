mod cli_args;
mod output;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io;
use std::process;

use cli_args::Cli;
use dirdoc_core::{AppError, generate_document};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let core_err = e.downcast_ref::<AppError>();
            let exit_code = match core_err {
                Some(AppError::Input(_)) => 1,
                Some(AppError::Io(_)) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::WalkDir(_)) => 2,
                Some(AppError::InvalidArgument(_)) => 5,
                Some(AppError::Docx(_)) => 6,
                Some(AppError::Xml(_)) => 6,
                Some(_) => 1,
                None => 1,
            };

            if !quiet || exit_code == 1 || exit_code == 5 {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            } else {
                log::error!("Application failed: {:#}", e);
            }

            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    let verbose = cli.verbose;

    let config = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        prompt::resolve_scan_config(&cli, &mut input, &mut output)?
    };

    let (output_path, summary) = generate_document(&config).with_context(|| {
        format!(
            "Failed to generate document for {}",
            config.target_directory.display()
        )
    })?;

    output::print_saved(&output_path);
    if verbose > 0 {
        output::print_summary(&summary, quiet);
    }
    Ok(())
}
