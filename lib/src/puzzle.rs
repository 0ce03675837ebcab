use crate::results::*;
use std::collections::HashMap;
use std::sync::Arc;

/// A hidden word that guesses are scored against.
///
/// ```
/// use wordle_sim::Puzzle;
///
/// let puzzle = Puzzle::new("alone");
/// let (is_exact_match, score) = puzzle.guess("alloy").unwrap();
///
/// assert!(!is_exact_match);
/// assert_eq!(score.to_string(), "ggbyb");
/// ```
#[derive(Debug, Clone)]
pub struct Puzzle {
    solution: Arc<str>,
    letters: Vec<char>,
    letter_counts: HashMap<char, u32>,
}

impl Puzzle {
    /// Creates a puzzle with the given solution.
    pub fn new(solution: &str) -> Puzzle {
        let letters: Vec<char> = solution.chars().collect();
        Puzzle {
            solution: Arc::from(solution),
            letter_counts: count_letters(&letters),
            letters,
        }
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// The number of letters in the solution.
    pub fn word_length(&self) -> usize {
        self.letters.len()
    }

    /// Scores `word` against the solution.
    ///
    /// Returns whether the word is the solution, along with the outcome for each letter. Fails
    /// with [`WordleError::WordLength`] if the word is not as long as the solution.
    pub fn guess(&self, word: &str) -> Result<(bool, WordScore), WordleError> {
        let guess: Vec<char> = word.chars().collect();
        if guess.len() != self.letters.len() {
            return Err(WordleError::WordLength(self.letters.len()));
        }
        if guess == self.letters {
            return Ok((
                true,
                WordScore::uniform(self.letters.len(), LetterOutcome::Green),
            ));
        }
        Ok((false, self.score(&guess)))
    }

    fn score(&self, guess: &[char]) -> WordScore {
        let mut score = WordScore::unscored(guess.len());
        let mut used: HashMap<char, u32> = HashMap::new();
        // Greens are credited first so that a misplaced copy of a letter can't use up an exact
        // match later in the word.
        for (index, (letter, expected)) in guess.iter().zip(self.letters.iter()).enumerate() {
            if letter == expected {
                score.set(index, LetterOutcome::Green);
                *used.entry(*letter).or_insert(0) += 1;
            }
        }
        for (index, letter) in guess.iter().enumerate() {
            if score[index] != LetterOutcome::Unknown {
                continue;
            }
            let num_used = used.entry(*letter).or_insert(0);
            *num_used += 1;
            let available = self.letter_counts.get(letter).copied().unwrap_or(0);
            if *num_used > available {
                score.set(index, LetterOutcome::Black);
            } else {
                score.set(index, LetterOutcome::Yellow);
            }
        }
        score
    }
}

fn count_letters(letters: &[char]) -> HashMap<char, u32> {
    let mut counts = HashMap::new();
    for letter in letters {
        *counts.entry(*letter).or_insert(0) += 1;
    }
    counts
}
