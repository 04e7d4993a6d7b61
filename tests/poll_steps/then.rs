//! Then steps for poll BDD scenarios.

use super::world::{PollWorld, run_async};
use eyre::WrapErr;
use polls::poll::{ports::PollRepository, services::VoteResult};
use rstest_bdd_macros::then;

#[then(r#"the page says "{text}""#)]
fn page_says(world: &PollWorld, text: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing view outcome"))?;
    let body = outcome
        .body()
        .ok_or_else(|| eyre::eyre!("expected a rendered page, got {outcome:?}"))?;
    if !body.contains(&text) {
        return Err(eyre::eyre!("page does not contain {text:?}:\n{body}"));
    }
    Ok(())
}

#[then("no questions are listed")]
fn no_questions_listed(world: &PollWorld) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing"))?;
    if !listing.is_empty() {
        return Err(eyre::eyre!("expected empty listing, got {listing:?}"));
    }
    Ok(())
}

#[then(r#"the listed questions are "{text}""#)]
fn listed_questions_are(world: &PollWorld, text: String) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing"))?;
    let texts: Vec<&str> = listing
        .iter()
        .map(|question| question.text().as_str())
        .collect();
    if texts != vec![text.as_str()] {
        return Err(eyre::eyre!("expected [{text:?}], got {texts:?}"));
    }
    Ok(())
}

#[then("the response status is {status:u16}")]
fn response_status_is(world: &PollWorld, status: u16) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing view outcome"))?;
    if outcome.status_code() != status {
        return Err(eyre::eyre!(
            "expected status {status}, got {} for {outcome:?}",
            outcome.status_code()
        ));
    }
    Ok(())
}

#[then(r#"the vote is rejected with "{message}""#)]
fn vote_rejected_with(world: &PollWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_vote
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing vote result"))?;
    match result {
        Ok(VoteResult::FormError {
            message: actual, ..
        }) if *actual == message => Ok(()),
        other => Err(eyre::eyre!(
            "expected form error {message:?}, got {other:?}"
        )),
    }
}

#[then(r#"the vote redirects to the results of "{text}""#)]
fn vote_redirects_to_results(world: &PollWorld, text: String) -> Result<(), eyre::Report> {
    let expected = world.question(&text)?.id();
    let result = world
        .last_vote
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing vote result"))?;
    match result {
        Ok(VoteResult::Redirect(id)) if *id == expected => Ok(()),
        other => Err(eyre::eyre!("expected redirect to {expected}, got {other:?}")),
    }
}

#[then(r#"choice "{choice}" of "{text}" has {votes:u32} votes"#)]
fn choice_has_votes(
    world: &PollWorld,
    choice: String,
    text: String,
    votes: u32,
) -> Result<(), eyre::Report> {
    let question_id = world.question(&text)?.id();
    let choice_id = world.choice(&text, &choice)?.id();
    let stored = run_async(world.repository.find_question(question_id))
        .wrap_err("reload question")?
        .ok_or_else(|| eyre::eyre!("question {text:?} vanished"))?;
    let actual = stored
        .choice(choice_id)
        .map(|stored_choice| stored_choice.votes())
        .ok_or_else(|| eyre::eyre!("choice {choice:?} vanished"))?;
    if actual != votes {
        return Err(eyre::eyre!("expected {votes} votes, got {actual}"));
    }
    Ok(())
}
