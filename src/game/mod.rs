//! Guess checking module
//!
//! Ties the word list, the day-index resolver and the letter scorer together:
//! a guess is first validated against the dictionary, then scored against the
//! word of the day.

pub mod day;
pub mod dictionary;
pub mod scorer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use day::{DayError, DayResolver};
pub use dictionary::{Dictionary, DictionaryError};
pub use scorer::LetterResult;

/// Body of a guess request.
///
/// `guess` is kept loosely typed: a missing or non-string value, or a body
/// that is not a JSON object, is treated as an unknown word rather than a
/// malformed request.
#[derive(Debug, Default)]
pub struct GuessRequest {
    pub guess: Option<serde_json::Value>,
}

impl GuessRequest {
    /// Take the `guess` member of a parsed body; only objects have one
    pub fn from_json(mut body: serde_json::Value) -> Self {
        Self {
            guess: body.get_mut("guess").map(serde_json::Value::take),
        }
    }

    pub fn guess(&self) -> Option<&str> {
        self.guess.as_ref().and_then(serde_json::Value::as_str)
    }
}

/// Body of a guess response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<LetterResult>>,
}

impl GuessResponse {
    pub const fn invalid() -> Self {
        Self {
            valid: false,
            result: None,
        }
    }

    pub const fn scored(result: Vec<LetterResult>) -> Self {
        Self {
            valid: true,
            result: Some(result),
        }
    }
}

/// Errors raised while picking the word of the day
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no word scheduled: current time is before the start date")]
    BeforeStart,
    #[error("no word scheduled for day {day} (word list has {available} words)")]
    OutOfWords { day: usize, available: usize },
}

/// Daily puzzle rules: which day it is and how that maps onto the word list
#[derive(Debug, Clone, Copy)]
pub struct Puzzle {
    resolver: DayResolver,
    wrap_around: bool,
}

impl Puzzle {
    pub const fn new(resolver: DayResolver, wrap_around: bool) -> Self {
        Self {
            resolver,
            wrap_around,
        }
    }

    pub const fn resolver(&self) -> &DayResolver {
        &self.resolver
    }

    /// Word of the day at `now`
    pub fn answer<'d>(
        &self,
        dictionary: &'d Dictionary,
        now: DateTime<Utc>,
    ) -> Result<&'d str, GameError> {
        let day = self.resolver.day_index(now).ok_or(GameError::BeforeStart)?;
        dictionary
            .word_for_day(day, self.wrap_around)
            .ok_or(GameError::OutOfWords {
                day,
                available: dictionary.word_count(),
            })
    }

    /// Validate and score a guess at `now`.
    ///
    /// Unknown words short-circuit to the invalid shape before the answer is
    /// looked up.
    pub fn check_guess(
        &self,
        dictionary: &Dictionary,
        guess: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<GuessResponse, GameError> {
        let Some(guess) = guess.filter(|g| dictionary.contains(g)) else {
            return Ok(GuessResponse::invalid());
        };

        let answer = self.answer(dictionary, now)?;
        Ok(GuessResponse::scored(scorer::score(guess, answer)))
    }
}
