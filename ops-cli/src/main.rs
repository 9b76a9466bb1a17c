use clap::Parser;
use colored::Colorize;
use config_engine::ClientConfig;
use error_common::{ErrorReporter, PlantGuardError};
use logger_redacted::LoggingGuard;
use ops_cli::app::{follow_up, user_error, App};
use ops_cli::{commands, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, _logging) = match setup(&cli) {
        Ok(ready) => ready,
        Err(err) => return fail(&err),
    };

    let outcome = async move {
        let app = App::bootstrap(&config).await?;
        commands::execute(&app, cli.command).await
    }
    .await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

fn setup(cli: &Cli) -> anyhow::Result<(ClientConfig, LoggingGuard)> {
    let mut config = config_engine::load(cli.config.as_deref()).map_err(user_error)?;
    if let Some(base_url) = &cli.base_url {
        config.authority.base_url = base_url.clone();
        config_engine::validation::validate(&config).map_err(user_error)?;
    }

    let logging = logger_redacted::init_tracing(&config.logging)?;
    Ok((config, logging))
}

fn fail(err: &anyhow::Error) -> ExitCode {
    let (message, hint) = match err.downcast_ref::<PlantGuardError>() {
        Some(error) => (ErrorReporter.report("plantguard", error), follow_up(error)),
        None => {
            tracing::error!(error = %err, "command failed");
            (err.to_string(), None)
        }
    };
    eprintln!("{} {}", "error:".red().bold(), message);
    if let Some(hint) = hint {
        eprintln!("{}", hint.yellow());
    }
    ExitCode::FAILURE
}
