use clap::Parser;
use colored::Colorize;
use config_engine::CarelogSettings;
use error_common::{log_error, Result};
use ops_cli::{apply_overrides, build_service, run, Cli, Outcome};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::NotFound) => ExitCode::from(1),
        Err(err) => {
            log_error("carelog", &err);
            eprintln!("{}: {}", err.code().red().bold(), err);
            ExitCode::from(2)
        }
    }
}

fn execute(cli: &Cli) -> Result<Outcome> {
    let mut settings = CarelogSettings::load(cli.config.as_deref())?;
    apply_overrides(&mut settings, cli);

    logger_redacted::init_logging(&settings.logging)?;
    tracing::debug!(data_file = %settings.storage.data_file.display(), "Settings loaded");

    let (store, service) = build_service(&settings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli.command, &service, &store, &mut out)
}
