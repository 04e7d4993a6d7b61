//! Command-line surface of the `polls` binary.
//!
//! Each poll command calls one view handler and writes the rendered page to
//! the given writer. The exit code mirrors the view outcome.

use crate::poll::{
    domain::QuestionId,
    ports::PollRepository,
    services::{CreateQuestionRequest, PollServiceError},
    views::{PollViews, ViewError, ViewOutcome, VoteForm},
};
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use mockable::Clock;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Exit code for a rendered page or a redirect.
pub const EXIT_OK: u8 = 0;
/// Exit code when a vote submission was rejected.
pub const EXIT_FORM_ERROR: u8 = 1;
/// Exit code when the question is absent or unpublished.
pub const EXIT_NOT_FOUND: u8 = 2;
/// Exit code when the command could not run, such as a configuration,
/// connection or persistence failure.
pub const EXIT_FAILURE: u8 = 3;

/// CLI arguments for `polls`.
#[derive(Parser, Debug)]
#[command(name = "polls", version, about = "List questions, show choices and record votes")]
pub struct Cli {
    /// Path to a configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the poll tables in the configured database
    Migrate,
    /// Poll commands
    #[command(flatten)]
    Poll(PollCommand),
}

/// Commands that operate on questions and choices.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PollCommand {
    /// Create a question
    AddQuestion {
        /// Question text
        #[arg(long)]
        text: String,
        /// Publish offset in days from now (negative for the past)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        days: i64,
        /// Choice text (repeatable)
        #[arg(long = "choice", value_name = "TEXT")]
        choices: Vec<String>,
    },
    /// Add a choice to a question
    AddChoice {
        /// Question identifier
        question: QuestionId,
        /// Choice text
        #[arg(long)]
        text: String,
    },
    /// Show the latest published questions
    Index,
    /// Show the voting form of a question
    Detail {
        /// Question identifier
        question: QuestionId,
    },
    /// Show the vote tallies of a question
    Results {
        /// Question identifier
        question: QuestionId,
    },
    /// Vote for a choice of a question
    Vote {
        /// Question identifier
        question: QuestionId,
        /// Identifier of the selected choice
        #[arg(long)]
        choice: Option<String>,
    },
}

/// Errors that abort a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A view handler failed.
    #[error(transparent)]
    View(#[from] ViewError),
    /// An administrative service call failed.
    #[error(transparent)]
    Service(#[from] PollServiceError),
    /// The publish offset is out of range.
    #[error("publish offset of {0} days is out of range")]
    InvalidOffset(i64),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns the `tracing` filter directive for a `-v` count, falling back to
/// the configured filter when no flag was given.
#[must_use]
pub fn log_filter(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_owned(),
        1 => "info".to_owned(),
        2 => "debug".to_owned(),
        _ => "trace".to_owned(),
    }
}

/// Builds the `tracing` filter for a `-v` count and the configured filter.
///
/// # Errors
///
/// Returns [`ParseError`] when the selected directive is malformed.
pub fn env_filter(verbose: u8, configured: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(log_filter(verbose, configured))
}

/// Writes a failed command's error chain and returns [`EXIT_FAILURE`].
pub fn report_failure<W: Write>(err: &anyhow::Error, out: &mut W) -> u8 {
    drop(writeln!(out, "error: {err:#}"));
    EXIT_FAILURE
}

/// Runs one poll command and returns the process exit code.
///
/// # Errors
///
/// Returns [`CliError`] when a handler, service call or write fails.
pub async fn execute<R, C, W>(
    views: &PollViews<R, C>,
    command: &PollCommand,
    out: &mut W,
) -> Result<u8, CliError>
where
    R: PollRepository,
    C: Clock + Send + Sync,
    W: Write,
{
    let outcome = match command {
        PollCommand::AddQuestion {
            text,
            days,
            choices,
        } => {
            let offset = TimeDelta::try_days(*days).ok_or(CliError::InvalidOffset(*days))?;
            let pub_date = views
                .service()
                .now()
                .checked_add_signed(offset)
                .ok_or(CliError::InvalidOffset(*days))?;
            let request = CreateQuestionRequest::new(text.clone(), pub_date)
                .with_choices(choices.iter().cloned());
            let question = views.service().create_question(request).await?;
            writeln!(out, "{}", question.id())?;
            for choice in question.choices() {
                writeln!(out, "  {} {}", choice.id(), choice.text())?;
            }
            return Ok(EXIT_OK);
        }
        PollCommand::AddChoice { question, text } => {
            return match views.service().add_choice(*question, text.clone()).await {
                Ok(choice) => {
                    writeln!(out, "{}", choice.id())?;
                    Ok(EXIT_OK)
                }
                Err(PollServiceError::NotFound(_)) => write_outcome(&ViewOutcome::NotFound, out),
                Err(err) => Err(err.into()),
            };
        }
        PollCommand::Index => views.index().await?,
        PollCommand::Detail { question } => views.detail(*question).await?,
        PollCommand::Results { question } => views.results(*question).await?,
        PollCommand::Vote { question, choice } => {
            let form = VoteForm {
                choice: choice.clone(),
            };
            views.vote(*question, &form).await?
        }
    };
    write_outcome(&outcome, out)
}

fn write_outcome<W: Write>(outcome: &ViewOutcome, out: &mut W) -> Result<u8, CliError> {
    match outcome {
        ViewOutcome::Found(body) => {
            out.write_all(body.as_bytes())?;
            Ok(EXIT_OK)
        }
        ViewOutcome::FormError(body) => {
            out.write_all(body.as_bytes())?;
            Ok(EXIT_FORM_ERROR)
        }
        ViewOutcome::NotFound => {
            writeln!(out, "Not Found")?;
            Ok(EXIT_NOT_FOUND)
        }
        ViewOutcome::Redirect(route) => {
            writeln!(out, "Redirect: {route}")?;
            Ok(EXIT_OK)
        }
    }
}
