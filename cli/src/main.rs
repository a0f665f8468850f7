use clap::Parser;
use color_eyre::eyre::Report;
use std::process::ExitCode;
use topic2crossword::args::Cli;
use topic2crossword::config::load_config;
use topic2crossword::{exit, logging, App, AppError, RunSummary, Settings};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // clap exits with 2 on usage errors, which is taken by "too few questions"
            return if err.use_stderr() {
                ExitCode::from(exit::INPUT)
            } else {
                ExitCode::from(exit::SUCCESS)
            };
        }
    };

    logging::init(cli.verbose, cli.quiet);
    if let Err(report) = color_eyre::install() {
        log::debug!("color-eyre not installed: {}", report);
    }

    let quiet = cli.quiet;
    match run(cli) {
        Ok(summary) => {
            if !quiet {
                print!("{}", summary.report());
            }
            ExitCode::from(exit::SUCCESS)
        }
        Err(err) => {
            let code = err.exit_code();
            eprintln!("Error: {:?}", Report::new(err));
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<RunSummary, AppError> {
    let config = load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, &config);
    App::new(settings).run()
}
