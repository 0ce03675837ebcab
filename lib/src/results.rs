#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// The result of scoring a single letter of a guess.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LetterOutcome {
    /// Not yet scored. Never produced by [`Puzzle::guess`](crate::Puzzle::guess).
    Unknown,
    /// The letter does not appear in the solution any more times than it was already credited.
    Black,
    /// The letter is in the solution, but not at this location.
    Yellow,
    /// The letter is in the solution at this location.
    Green,
}

impl LetterOutcome {
    /// Parses a single outcome character: `b`, `y` or `g`.
    pub fn from_char(c: char) -> Result<LetterOutcome, WordleError> {
        match c {
            'b' => Ok(LetterOutcome::Black),
            'y' => Ok(LetterOutcome::Yellow),
            'g' => Ok(LetterOutcome::Green),
            _ => Err(WordleError::UnknownOutcome(c)),
        }
    }

    /// The compact character for this outcome. `Unknown` is written as `?`.
    pub fn as_char(&self) -> char {
        match self {
            LetterOutcome::Unknown => '?',
            LetterOutcome::Black => 'b',
            LetterOutcome::Yellow => 'y',
            LetterOutcome::Green => 'g',
        }
    }
}

/// What is known about one letter at one location in the solution.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PositionFact {
    #[default]
    NoInfo,
    Here,
    NotHere,
}

/// The per-letter outcomes of one guess, in the same letter order as the guess.
///
/// A score is built either by [`Puzzle::guess`](crate::Puzzle::guess) or parsed from a compact
/// string with one `b`/`y`/`g` character per letter:
///
/// ```
/// use wordle_sim::LetterOutcome;
/// use wordle_sim::WordScore;
///
/// let score: WordScore = "bbybg".parse().unwrap();
///
/// assert_eq!(score.len(), 5);
/// assert_eq!(score.get(2).unwrap(), LetterOutcome::Yellow);
/// assert_eq!(score.to_string(), "bbybg");
/// ```
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordScore {
    outcomes: Vec<LetterOutcome>,
}

impl WordScore {
    /// Creates an unscored result for a word of the given length.
    pub(crate) fn unscored(length: usize) -> WordScore {
        WordScore {
            outcomes: vec![LetterOutcome::Unknown; length],
        }
    }

    /// Creates a score where every letter has the given outcome.
    pub(crate) fn uniform(length: usize, outcome: LetterOutcome) -> WordScore {
        WordScore {
            outcomes: vec![outcome; length],
        }
    }

    /// Builds a score from the given outcomes.
    pub fn from_outcomes(outcomes: &[LetterOutcome]) -> WordScore {
        WordScore {
            outcomes: outcomes.to_vec(),
        }
    }

    /// Returns the outcome for the letter at `index`.
    pub fn get(&self, index: usize) -> Result<LetterOutcome, WordleError> {
        self.outcomes
            .get(index)
            .copied()
            .ok_or(WordleError::IndexOutOfRange {
                index,
                length: self.outcomes.len(),
            })
    }

    pub(crate) fn set(&mut self, index: usize, outcome: LetterOutcome) {
        self.outcomes[index] = outcome;
    }

    /// The number of letters in the scored word.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns true iff every letter was scored [`LetterOutcome::Green`].
    pub fn is_all_green(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| *outcome == LetterOutcome::Green)
    }

    /// Returns true iff at least one letter was scored [`LetterOutcome::Yellow`].
    pub fn has_yellow(&self) -> bool {
        self.outcomes.contains(&LetterOutcome::Yellow)
    }
}

impl Deref for WordScore {
    type Target = [LetterOutcome];

    fn deref(&self) -> &Self::Target {
        &self.outcomes
    }
}

impl FromStr for WordScore {
    type Err = WordleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WordScore {
            outcomes: s
                .chars()
                .map(LetterOutcome::from_char)
                .collect::<Result<Vec<LetterOutcome>, WordleError>>()?,
        })
    }
}

impl fmt::Display for WordScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            write!(f, "{}", outcome.as_char())?;
        }
        Ok(())
    }
}

/// One round of a solve: the guess that was made and how it scored.
#[derive(Debug, Eq, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GuessRecord {
    pub guess: Arc<str>,
    /// Whether the guess was the solution.
    pub is_exact_match: bool,
    pub score: WordScore,
}

/// The outcome of [`Robot::solve`](crate::Robot::solve).
#[derive(Debug, Eq, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveReport {
    pub solved: bool,
    /// Every guess made, in the order it was made.
    pub history: Vec<GuessRecord>,
}

impl SolveReport {
    pub fn num_guesses(&self) -> usize {
        self.history.len()
    }

    /// Returns true iff no guess in the history had a yellow letter.
    pub fn is_all_greens(&self) -> bool {
        self.history.iter().all(|record| !record.score.has_yellow())
    }
}

/// Indicates that an error occurred while scoring, learning from, or playing a puzzle.
#[derive(Debug, Error)]
pub enum WordleError {
    /// A word, score or knowledge did not have the expected length. The expected length is given.
    #[error("words must have length {0}")]
    WordLength(usize),
    /// A score was indexed outside of its letters.
    #[error("index {index} is out of range for a score of length {length}")]
    IndexOutOfRange { index: usize, length: usize },
    /// A score string contained something other than `b`, `y` or `g`.
    #[error("unknown outcome '{0}', expected one of 'b', 'y' or 'g'")]
    UnknownOutcome(char),
    /// A fact was added for a letter that was never scored.
    #[error("the letter at position {0} has not been scored")]
    UnscoredLetter(usize),
    /// A fact about a letter contradicts what was already known about it.
    #[error("conflicting facts for '{letter}' at position {position}")]
    ConflictingFacts { letter: char, position: usize },
    /// The solution was not found within the allowed number of guesses.
    #[error("made {0} guesses without finding the solution")]
    GuessLimitExceeded(u32),
    /// A word was requested from a pool that has no words.
    #[error("cannot pick from an empty word pool")]
    EmptyPool,
    /// A weighted word list had a line without a usable weight.
    #[error("invalid weight on line {line}")]
    InvalidWeight { line: usize },
    #[error("failed to read words: {0}")]
    Io(#[from] io::Error),
}
