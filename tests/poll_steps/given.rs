//! Given steps for poll BDD scenarios.

use super::world::{PollWorld, run_async};
use chrono::{DateTime, TimeDelta, Utc};
use eyre::WrapErr;
use polls::poll::services::CreateQuestionRequest;
use rstest_bdd_macros::given;

fn create_question(
    world: &mut PollWorld,
    text: String,
    pub_date: DateTime<Utc>,
    choices: Vec<String>,
) -> Result<(), eyre::Report> {
    let request = CreateQuestionRequest::new(text.clone(), pub_date).with_choices(choices);
    let question = run_async(world.views.service().create_question(request))
        .wrap_err("create question for scenario")?;
    world.questions.insert(text, question);
    Ok(())
}

fn offset(days: u64) -> Result<TimeDelta, eyre::Report> {
    let days = i64::try_from(days).wrap_err("day offset out of range")?;
    TimeDelta::try_days(days).ok_or_else(|| eyre::eyre!("day offset out of range"))
}

#[given("an empty poll store")]
fn empty_poll_store(world: &mut PollWorld) {
    world.questions.clear();
}

#[given(r#"a question "{text}" published {days:u64} days ago with choice "{choice}""#)]
fn past_question_with_choice(
    world: &mut PollWorld,
    text: String,
    days: u64,
    choice: String,
) -> Result<(), eyre::Report> {
    let pub_date = world.now - offset(days)?;
    create_question(world, text, pub_date, vec![choice])
}

#[given(r#"a question "{text}" published {days:u64} days from now with choice "{choice}""#)]
fn future_question_with_choice(
    world: &mut PollWorld,
    text: String,
    days: u64,
    choice: String,
) -> Result<(), eyre::Report> {
    let pub_date = world.now + offset(days)?;
    create_question(world, text, pub_date, vec![choice])
}

#[given(r#"a question "{text}" published {days:u64} days ago without choices"#)]
fn past_question_without_choices(
    world: &mut PollWorld,
    text: String,
    days: u64,
) -> Result<(), eyre::Report> {
    let pub_date = world.now - offset(days)?;
    create_question(world, text, pub_date, Vec::new())
}
