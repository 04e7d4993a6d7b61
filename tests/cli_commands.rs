//! Integration tests for the `polls` command-line surface.
//!
//! Commands run against the in-memory repository with a pinned clock, and
//! their output is captured in a byte buffer.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use clap::Parser;
use anyhow::Context;
use polls::cli::{
    self, Cli, Command, EXIT_FAILURE, EXIT_FORM_ERROR, EXIT_NOT_FOUND, EXIT_OK, PollCommand,
};
use polls::poll::{
    adapters::memory::InMemoryPollRepository,
    domain::{ChoiceId, QuestionId},
    services::{FixedClock, PollService},
    views::PollViews,
};
use rstest::{fixture, rstest};

type TestViews = PollViews<InMemoryPollRepository, FixedClock>;

#[fixture]
fn views() -> TestViews {
    let now = Utc
        .with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixed instant");
    let service = PollService::new(
        Arc::new(InMemoryPollRepository::new()),
        Arc::new(FixedClock::new(now)),
    );
    PollViews::new(service).expect("templates should compile")
}

async fn run(views: &TestViews, command: &PollCommand) -> (u8, String) {
    let mut out = Vec::new();
    let code = cli::execute(views, command, &mut out)
        .await
        .expect("command should complete");
    (code, String::from_utf8(out).expect("output should be UTF-8"))
}

/// Creates a question through the CLI and returns its id and choice ids.
async fn add_question(
    views: &TestViews,
    text: &str,
    days: i64,
    choices: &[&str],
) -> (QuestionId, Vec<ChoiceId>) {
    let command = PollCommand::AddQuestion {
        text: text.to_owned(),
        days,
        choices: choices.iter().map(|choice| (*choice).to_owned()).collect(),
    };
    let (code, output) = run(views, &command).await;
    assert_eq!(code, EXIT_OK);

    let mut lines = output.lines();
    let question_id = lines
        .next()
        .expect("question id line")
        .parse()
        .expect("question id should parse");
    let choice_ids = lines
        .map(|line| {
            line.split_whitespace()
                .next()
                .expect("choice id column")
                .parse()
                .expect("choice id should parse")
        })
        .collect();
    (question_id, choice_ids)
}

#[rstest]
fn parses_add_question_with_negative_offset() {
    let cli = Cli::try_parse_from([
        "polls",
        "add-question",
        "--text",
        "What's new?",
        "--days",
        "-30",
        "--choice",
        "Not much",
        "--choice",
        "The sky",
    ])
    .expect("arguments should parse");

    assert_eq!(
        cli.command,
        Command::Poll(PollCommand::AddQuestion {
            text: "What's new?".to_owned(),
            days: -30,
            choices: vec!["Not much".to_owned(), "The sky".to_owned()],
        })
    );
}

#[rstest]
fn parses_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["polls", "index", "-vv", "--config", "custom.toml"])
        .expect("arguments should parse");

    assert_eq!(cli.command, Command::Poll(PollCommand::Index));
    assert_eq!(cli.verbose, 2);
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("custom.toml"))
    );
}

#[rstest]
fn rejects_malformed_question_id() {
    let result = Cli::try_parse_from(["polls", "detail", "not-a-uuid"]);
    assert!(result.is_err());
}

#[rstest]
#[case(0, "warn", "warn")]
#[case(0, "polls=debug", "polls=debug")]
#[case(1, "warn", "info")]
#[case(2, "warn", "debug")]
#[case(5, "warn", "trace")]
fn verbosity_selects_log_filter(
    #[case] verbose: u8,
    #[case] configured: &str,
    #[case] expected: &str,
) {
    assert_eq!(cli::log_filter(verbose, configured), expected);
}

#[rstest]
#[case::bad_level(0, "polls=loud")]
#[case::bad_second_directive(0, "polls=trace,app=verbose")]
fn malformed_log_filter_is_rejected(#[case] verbose: u8, #[case] configured: &str) {
    assert!(cli::env_filter(verbose, configured).is_err());
}

#[rstest]
#[case::configured(0, "polls=debug,warn")]
#[case::verbose_flag_wins(1, "polls=loud")]
fn valid_log_filter_is_built(#[case] verbose: u8, #[case] configured: &str) {
    assert!(cli::env_filter(verbose, configured).is_ok());
}

#[rstest]
fn failure_exit_code_is_distinct_from_outcomes() {
    let codes = [EXIT_OK, EXIT_FORM_ERROR, EXIT_NOT_FOUND];
    assert!(!codes.contains(&EXIT_FAILURE));
}

#[rstest]
fn report_failure_writes_error_chain() {
    let err = Err::<(), _>(std::io::Error::other("connection refused"))
        .context("connect to PostgreSQL")
        .expect_err("context should wrap the error");
    let mut out = Vec::new();

    let code = cli::report_failure(&err, &mut out);

    assert_eq!(code, EXIT_FAILURE);
    let written = String::from_utf8(out).expect("output should be UTF-8");
    assert_eq!(
        written.trim_end(),
        "error: connect to PostgreSQL: connection refused"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn index_lists_questions_added_through_cli(views: TestViews) {
    add_question(&views, "Past question.", -30, &["Yes"]).await;

    let (code, output) = run(&views, &PollCommand::Index).await;

    assert_eq!(code, EXIT_OK);
    assert!(output.contains("Past question."));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detail_of_future_question_exits_not_found(views: TestViews) {
    let (question, _) = add_question(&views, "Future question.", 30, &["Yes"]).await;

    let (code, output) = run(&views, &PollCommand::Detail { question }).await;

    assert_eq!(code, EXIT_NOT_FOUND);
    assert_eq!(output.trim_end(), "Not Found");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn vote_prints_redirect_to_results(views: TestViews) {
    let (question, choices) = add_question(&views, "Colour?", -1, &["Red", "Blue"]).await;
    let red = choices.first().copied().expect("first choice");

    let (code, output) = run(
        &views,
        &PollCommand::Vote {
            question,
            choice: Some(red.to_string()),
        },
    )
    .await;
    assert_eq!(code, EXIT_OK);
    assert_eq!(output.trim_end(), format!("Redirect: /polls/{question}/results/"));

    let (results_code, page) = run(&views, &PollCommand::Results { question }).await;
    assert_eq!(results_code, EXIT_OK);
    assert!(page.contains("Red -- 1 vote<"));
    assert!(page.contains("Blue -- 0 votes"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn vote_without_choice_exits_with_form_error(views: TestViews) {
    let (question, _) = add_question(&views, "Colour?", -1, &["Red"]).await;

    let (code, output) = run(
        &views,
        &PollCommand::Vote {
            question,
            choice: None,
        },
    )
    .await;

    assert_eq!(code, EXIT_FORM_ERROR);
    assert!(output.contains("select a choice"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_choice_to_unknown_question_exits_not_found(views: TestViews) {
    let (code, output) = run(
        &views,
        &PollCommand::AddChoice {
            question: QuestionId::new(),
            text: "Maybe".to_owned(),
        },
    )
    .await;

    assert_eq!(code, EXIT_NOT_FOUND);
    assert_eq!(output.trim_end(), "Not Found");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_choice_makes_question_listable(views: TestViews) {
    let (question, _) = add_question(&views, "Choiceless?", -1, &[]).await;
    let (empty_code, empty_index) = run(&views, &PollCommand::Index).await;
    assert_eq!(empty_code, EXIT_OK);
    assert!(empty_index.contains("No polls are available."));

    let (code, _) = run(
        &views,
        &PollCommand::AddChoice {
            question,
            text: "Now it has one".to_owned(),
        },
    )
    .await;
    assert_eq!(code, EXIT_OK);

    let (_, index) = run(&views, &PollCommand::Index).await;
    assert!(index.contains("Choiceless?"));
}
