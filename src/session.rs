//! Round/retry state machine.
//!
//! A session starts with the full question pool. Each round presents the
//! current pool once in shuffled order; a retry narrows the pool to the items
//! missed in the round just played.
//!
//! # State Machine
//! - `Running` → `AwaitingRetryDecision` → `Running` (next round)
//! - Terminal: `Finished(reason)`

use crate::input::{Prompted, classify, parse_answer, parse_retry};
use crate::questions::{QuestionItem, QuestionPool};
use crate::{debug_log, info_log};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Line-based I/O the engine talks to.
pub trait InteractionPort {
    /// Shows `prompt` and blocks for one line. `None` means the input stream is closed.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
    fn write_line(&mut self, text: &str);
}

/// Orders the pool at the start of each round.
pub trait Shuffle {
    fn shuffle(&mut self, items: &mut [QuestionItem]);
}

/// Uniformly random order from any `rand` generator.
pub struct RandomOrder<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomOrder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOrder<StdRng> {
    /// Entropy-seeded, so order differs from run to run.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Shuffle for RandomOrder<R> {
    fn shuffle(&mut self, items: &mut [QuestionItem]) {
        items.shuffle(&mut self.rng);
    }
}

/// Leaves the pool in its current order.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepOrder;

impl Shuffle for KeepOrder {
    fn shuffle(&mut self, _items: &mut [QuestionItem]) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    AllCorrect,
    UserDeclinedRetry,
    UserQuitMidRound,
    NoQuestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    AwaitingRetryDecision,
    Finished(FinishReason),
}

/// Tags answered in one pass over the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundResult {
    pub correct_tags: Vec<String>,
    pub incorrect_tags: Vec<String>,
    /// Set when a quit token ended the round early.
    pub aborted: bool,
}

impl RoundResult {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.correct_tags.len() + self.incorrect_tags.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: FinishReason,
    pub rounds: u32,
    pub total_correct: usize,
    pub total_attempted: usize,
}

impl SessionSummary {
    /// `Final score` line, absent when nothing was attempted.
    #[must_use]
    pub fn final_score_line(&self) -> Option<String> {
        (self.total_attempted > 0).then(|| {
            format!(
                "\nFinal score: {}/{} correct",
                self.total_correct, self.total_attempted
            )
        })
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    original_pool: QuestionPool,
    current_pool: Vec<QuestionItem>,
    round_number: u32,
    total_correct: usize,
    total_attempted: usize,
    status: SessionStatus,
}

impl SessionState {
    pub fn new(pool: QuestionPool) -> Self {
        let status = if pool.is_empty() {
            SessionStatus::Finished(FinishReason::NoQuestions)
        } else {
            SessionStatus::Running
        };
        Self {
            current_pool: pool.items().to_vec(),
            original_pool: pool,
            round_number: 1,
            total_correct: 0,
            total_attempted: 0,
            status,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn current_pool(&self) -> &[QuestionItem] {
        &self.current_pool
    }

    #[must_use]
    pub fn total_correct(&self) -> usize {
        self.total_correct
    }

    #[must_use]
    pub fn total_attempted(&self) -> usize {
        self.total_attempted
    }

    /// Adds a round to the running totals and picks the next status.
    pub fn record_round(&mut self, round: &RoundResult) {
        self.total_attempted += round.attempted();
        self.total_correct += round.correct_tags.len();
        self.status = if round.aborted {
            SessionStatus::Finished(FinishReason::UserQuitMidRound)
        } else if round.incorrect_tags.is_empty() {
            SessionStatus::Finished(FinishReason::AllCorrect)
        } else {
            SessionStatus::AwaitingRetryDecision
        };
    }

    /// Narrows the pool to the missed items of `round`, in miss order.
    pub fn begin_retry(&mut self, round: &RoundResult) {
        self.current_pool = self.original_pool.select(&round.incorrect_tags);
        self.round_number += 1;
        self.status = SessionStatus::Running;
    }

    pub fn decline_retry(&mut self) {
        self.status = SessionStatus::Finished(FinishReason::UserDeclinedRetry);
    }

    #[must_use]
    pub fn summary(&self, reason: FinishReason) -> SessionSummary {
        SessionSummary {
            reason,
            rounds: self.round_number,
            total_correct: self.total_correct,
            total_attempted: self.total_attempted,
        }
    }
}

/// Asks every item once. Stops early on a quit token or closed input.
pub fn play_round<P: InteractionPort + ?Sized>(
    port: &mut P,
    items: &[QuestionItem],
) -> RoundResult {
    let mut result = RoundResult::default();

    for item in items {
        let guess = loop {
            let line = port.read_line(&format!("{} ", item.prompt));
            match classify(line, parse_answer) {
                Prompted::Answered(guess) => break guess,
                Prompted::Cancelled => {
                    port.write_line("Exiting quiz…");
                    result.aborted = true;
                    return result;
                }
                Prompted::Invalid(e) => port.write_line(&e.to_string()),
            }
        };

        if guess.matches(item.answer) {
            debug_log!("{} answered correctly", item.tag);
            port.write_line("Correct!");
            result.correct_tags.push(item.tag.clone());
        } else {
            debug_log!("{} answered {:?} (expected {})", item.tag, guess, item.answer);
            port.write_line(&format!("Incorrect. The answer is {}.", item.answer));
            result.incorrect_tags.push(item.tag.clone());
        }
    }

    result
}

/// Runs rounds until everything is correct, the user declines a retry, or quits.
pub fn run_session<P, S>(pool: QuestionPool, port: &mut P, shuffler: &mut S) -> SessionSummary
where
    P: InteractionPort + ?Sized,
    S: Shuffle + ?Sized,
{
    let mut state = SessionState::new(pool);
    let mut last_round = RoundResult::default();

    let reason = loop {
        match state.status() {
            SessionStatus::Running => {
                let mut items = state.current_pool().to_vec();
                info_log!("Round {} starting with {} item(s)", state.round_number(), items.len());
                port.write_line(&format!(
                    "\nRound {}: {} question(s)",
                    state.round_number(),
                    items.len()
                ));
                shuffler.shuffle(&mut items);

                last_round = play_round(port, &items);
                state.record_round(&last_round);
                if !last_round.aborted {
                    port.write_line(&format!(
                        "Round {} score: {}/{}",
                        state.round_number(),
                        last_round.correct_tags.len(),
                        last_round.attempted()
                    ));
                }
            }
            SessionStatus::AwaitingRetryDecision => {
                let retry = port
                    .read_line("Do you want to retry only the incorrect ones? (y/n) ")
                    .is_some_and(|raw| parse_retry(&raw));
                if retry {
                    info_log!("Retrying {} missed item(s)", last_round.incorrect_tags.len());
                    state.begin_retry(&last_round);
                } else {
                    state.decline_retry();
                }
            }
            SessionStatus::Finished(reason) => break reason,
        }
    };

    info_log!(
        "Session finished: {:?} after {} round(s), {}/{}",
        reason,
        state.round_number(),
        state.total_correct(),
        state.total_attempted()
    );
    let summary = state.summary(reason);
    if let Some(line) = summary.final_score_line() {
        port.write_line(&line);
    }
    summary
}
