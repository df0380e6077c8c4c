//! FinTrack CLI
//!
//! Terminal front end for the FinTrack backend: log in, maintain expense
//! types, funds, budgets, deposits and expenses, and read the dashboard and
//! budget vs actual reports.

mod cli;
mod commands;
mod render;

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use colored::Colorize;
use fintrack_client::{ApiClient, AppState, FileSessionStore};
use fintrack_core::validation::ValidationError;
use fintrack_shared::{AppConfig, AppError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::Context;
use crate::render::Renderer;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            if matches!(error.downcast_ref::<AppError>(), Some(AppError::Unauthorized(_))) {
                eprintln!("{}", "hint: run `fintrack login -u <user>`".dimmed());
            }
            exit_code(&error)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose)?;

    let config = AppConfig::load().context("failed to load configuration")?;
    let locale = config.display.number_locale()?;
    tracing::debug!(
        base_url = %config.api.base_url,
        route_style = ?config.api.route_style,
        locale = %locale,
        "configuration loaded"
    );

    let client = ApiClient::new(&config.api)?;
    let store = FileSessionStore::from_config(&config.session)?;
    let mut state = AppState::new(client, Box::new(store));
    state.restore()?;

    let out = Renderer::new(cli.output, locale, config.display.currency_symbol);
    let mut ctx = Context { state, out };
    commands::dispatch(cli.command, &mut ctx).await
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_filter = if verbose {
        "fintrack=debug"
    } else {
        "fintrack=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing: {error}"))
}

/// Exit status per failure class: 2 for input problems, 3 for
/// authentication, 4 for backend or network trouble, 1 otherwise.
fn exit_code(error: &anyhow::Error) -> ExitCode {
    if error.downcast_ref::<ValidationError>().is_some() {
        return ExitCode::from(2);
    }
    match error.downcast_ref::<AppError>() {
        Some(AppError::Validation(_) | AppError::Busy(_)) => ExitCode::from(2),
        Some(AppError::Unauthorized(_)) => ExitCode::from(3),
        Some(AppError::Network(_) | AppError::Server { .. } | AppError::Decode(_)) => {
            ExitCode::from(4)
        }
        _ => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let code = |error: anyhow::Error| exit_code(&error);

        assert_eq!(code(ValidationError::NoDetails.into()), ExitCode::from(2));
        assert_eq!(
            code(AppError::Unauthorized("expired".into()).into()),
            ExitCode::from(3)
        );
        assert_eq!(
            code(AppError::Network("refused".into()).into()),
            ExitCode::from(4)
        );
        assert_eq!(code(anyhow::anyhow!("other")), ExitCode::FAILURE);
    }
}
