//! Application services for polls.

mod clock;
mod polling;

pub use clock::FixedClock;
pub use polling::{
    CreateQuestionRequest, NO_CHOICE_SELECTED, PollService, PollServiceError, PollServiceResult,
    VoteResult,
};
