//! When steps for poll BDD scenarios.

use super::world::{PollWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the index page is requested")]
fn index_requested(world: &mut PollWorld) -> Result<(), eyre::Report> {
    let outcome = run_async(world.views.index()).wrap_err("render index")?;
    let listing = run_async(world.views.service().list_recent_questions())
        .wrap_err("list recent questions")?;
    world.last_outcome = Some(outcome);
    world.last_listing = Some(listing);
    Ok(())
}

#[when(r#"the detail page of "{text}" is requested"#)]
fn detail_requested(world: &mut PollWorld, text: String) -> Result<(), eyre::Report> {
    let id = world.question(&text)?.id();
    let outcome = run_async(world.views.detail(id)).wrap_err("render detail")?;
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"the results page of "{text}" is requested"#)]
fn results_requested(world: &mut PollWorld, text: String) -> Result<(), eyre::Report> {
    let id = world.question(&text)?.id();
    let outcome = run_async(world.views.results(id)).wrap_err("render results")?;
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"a vote for "{text}" is submitted without a choice"#)]
fn vote_without_choice(world: &mut PollWorld, text: String) -> Result<(), eyre::Report> {
    let id = world.question(&text)?.id();
    let result = run_async(world.views.service().record_vote(id, None));
    world.last_vote = Some(result);
    Ok(())
}

#[when(r#"a vote for "{text}" is submitted for choice "{choice}" of "{owner}""#)]
fn vote_for_choice(
    world: &mut PollWorld,
    text: String,
    choice: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let id = world.question(&text)?.id();
    let choice_id = world.choice(&owner, &choice)?.id().to_string();
    let result = run_async(world.views.service().record_vote(id, Some(&choice_id)));
    world.last_vote = Some(result);
    Ok(())
}
