//! Runs poll commands against the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! polls [--config <path>] [-v...] <command>
//! ```
//!
//! Rendered pages are written to stdout and logs to stderr. Failures that
//! stop a command exit with status 3.

use anyhow::{Context, Result};
use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use polls::cli::{self, Cli, Command, EXIT_OK};
use polls::config::ConfigLoader;
use polls::poll::{
    adapters::postgres::PostgresPollRepository, services::PollService, views::PollViews,
};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => ExitCode::from(cli::report_failure(&err, &mut io::stderr().lock())),
    }
}

async fn run(cli: Cli) -> Result<u8> {
    let config = ConfigLoader::load(cli.config.as_deref()).context("load configuration")?;

    let filter = cli::env_filter(cli.verbose, &config.log_filter).context("parse log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .build(manager)
        .context("connect to PostgreSQL")?;
    let repository = Arc::new(PostgresPollRepository::new(pool));

    match cli.command {
        Command::Migrate => {
            repository
                .apply_schema()
                .await
                .context("apply poll schema")?;
            info!("poll schema applied");
            Ok(EXIT_OK)
        }
        Command::Poll(command) => {
            let service = PollService::new(repository, Arc::new(DefaultClock));
            let views = PollViews::new(service).context("compile templates")?;
            let mut stdout = io::stdout().lock();
            Ok(cli::execute(&views, &command, &mut stdout).await?)
        }
    }
}
