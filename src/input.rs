//! Classification of raw prompt input.
//!
//! Every prompt reads one line and turns it into a [`Prompted`] value so that
//! callers match on the outcome instead of unwinding on a quit.

use crate::error::InputError;
use crate::mode::Mode;
use std::num::IntErrorKind;

const QUIT_TOKENS: [&str; 3] = ["q", "quit", "exit"];

/// Outcome of reading one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    Answered(T),
    Cancelled,
    Invalid(InputError),
}

/// True for `q`, `quit` or `exit` in any case, ignoring surrounding whitespace.
#[must_use]
pub fn is_quit_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    QUIT_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Maps a line read from an `InteractionPort` (`None` = input closed) through `parse`.
pub fn classify<T>(line: Option<String>, parse: impl FnOnce(&str) -> Prompted<T>) -> Prompted<T> {
    match line {
        None => Prompted::Cancelled,
        Some(raw) => parse(&raw),
    }
}

/// A whole-number answer to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    Value(i64),
    /// Parsed as an integer but outside `i64`; never equal to an answer.
    OutOfRange,
}

impl Guess {
    #[must_use]
    pub fn matches(self, answer: i64) -> bool {
        self == Guess::Value(answer)
    }
}

pub fn parse_answer(raw: &str) -> Prompted<Guess> {
    if is_quit_token(raw) {
        return Prompted::Cancelled;
    }
    match raw.trim().parse::<i64>() {
        Ok(value) => Prompted::Answered(Guess::Value(value)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Prompted::Answered(Guess::OutOfRange)
        }
        Err(_) => Prompted::Invalid(InputError::InvalidNumericInput),
    }
}

/// Parses a lower bound; a blank line selects `default`.
pub fn parse_lower_bound(raw: &str, default: u32) -> Prompted<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Prompted::Answered(default);
    }
    if is_quit_token(trimmed) {
        return Prompted::Cancelled;
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Prompted::Invalid(InputError::NegativeBound),
        Ok(n) => u32::try_from(n)
            .map_or(Prompted::Invalid(InputError::InvalidBound), Prompted::Answered),
        Err(_) => Prompted::Invalid(InputError::InvalidBound),
    }
}

pub fn parse_mode(raw: &str) -> Prompted<Mode> {
    if is_quit_token(raw) {
        return Prompted::Cancelled;
    }
    match raw.parse::<Mode>() {
        Ok(mode) => Prompted::Answered(mode),
        Err(e) => Prompted::Invalid(e),
    }
}

/// Only `y` (any case) accepts a retry.
#[must_use]
pub fn parse_retry(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("y")
}
