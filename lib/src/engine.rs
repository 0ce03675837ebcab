use crate::data::WordPool;
use crate::knowledge::KnowledgeBank;
use crate::puzzle::Puzzle;
use crate::results::*;
use rand::Rng;
use std::result::Result;

/// The default number of guesses a [`Robot`] makes before giving up on a puzzle.
pub const DEFAULT_MAX_GUESSES: u32 = 100;

/// Controls how a [`Robot`] plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotConfig {
    /// The robot fails with [`WordleError::GuessLimitExceeded`] after this many incorrect
    /// guesses.
    pub max_guesses: u32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        RobotConfig {
            max_guesses: DEFAULT_MAX_GUESSES,
        }
    }
}

/// Plays puzzles by guessing from a word pool, learning from each score and narrowing the pool to
/// the words that are still possible.
///
/// Which word is guessed from the remaining pool is up to the pool, e.g.
/// [`SimpleWordPool`](crate::SimpleWordPool) picks uniformly while
/// [`WeightedWordPool`](crate::WeightedWordPool) favors heavier words.
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use wordle_sim::{Puzzle, Robot, SimpleWordPool};
///
/// let pool = SimpleWordPool::from_iterator(&["abide", "apple", "crane", "lapse"]).unwrap();
/// let robot = Robot::new(pool);
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let report = robot.solve(&Puzzle::new("lapse"), &mut rng).unwrap();
///
/// assert!(report.solved);
/// assert_eq!(&*report.history.last().unwrap().guess, "lapse");
/// ```
#[derive(Debug, Clone)]
pub struct Robot<P: WordPool> {
    pool: P,
    config: RobotConfig,
}

impl<P: WordPool> Robot<P> {
    /// Creates a robot that guesses from the given pool, with the default config.
    pub fn new(pool: P) -> Robot<P> {
        Robot::with_config(pool, RobotConfig::default())
    }

    pub fn with_config(pool: P, config: RobotConfig) -> Robot<P> {
        Robot { pool, config }
    }

    /// The pool every solve starts from.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Guesses until the puzzle is solved, returning every guess made.
    ///
    /// Each round picks a guess from the remaining words, scores it, and keeps only the words that
    /// agree with everything learned so far. Neither the puzzle nor this robot's pool is modified.
    ///
    /// Fails with [`WordleError::GuessLimitExceeded`] if the puzzle isn't solved within the
    /// configured number of guesses, and with [`WordleError::EmptyPool`] if no candidates remain.
    pub fn solve<R: Rng + ?Sized>(
        &self,
        puzzle: &Puzzle,
        rng: &mut R,
    ) -> Result<SolveReport, WordleError> {
        let mut bank = KnowledgeBank::new(self.pool.word_length());
        let mut remaining: Option<P> = None;
        let mut history: Vec<GuessRecord> = Vec::new();
        loop {
            let pool = remaining.as_ref().unwrap_or(&self.pool);
            let guess = pool.pick(rng)?;
            let (is_exact_match, score) = puzzle.guess(&guess)?;
            log::debug!(
                "guess {}: '{}' from {} words scored {}",
                history.len() + 1,
                guess,
                pool.size(),
                score
            );
            history.push(GuessRecord {
                guess: guess.clone(),
                is_exact_match,
                score: score.clone(),
            });
            if is_exact_match {
                return Ok(SolveReport {
                    solved: true,
                    history,
                });
            }
            if history.len() >= self.config.max_guesses as usize {
                return Err(WordleError::GuessLimitExceeded(self.config.max_guesses));
            }
            bank.absorb(&guess, &score)?;
            let filter = bank.build_filter();
            remaining = Some(pool.apply_filter(filter.as_predicate()));
        }
    }
}

/// Gets the words in `pool` that are consistent with a single scored guess.
///
/// `score` holds one `b`, `y` or `g` per letter of `guess`.
///
/// ```
/// use wordle_sim::{possible_words, SimpleWordPool};
///
/// let pool = SimpleWordPool::from_iterator(&["abide", "apple", "image", "shake"]).unwrap();
///
/// let possible = possible_words(&pool, "crane", "bbybg").unwrap();
///
/// assert_eq!(possible.len(), 2);
/// ```
pub fn possible_words<P: WordPool>(pool: &P, guess: &str, score: &str) -> Result<P, WordleError> {
    let score: WordScore = score.parse()?;
    let mut bank = KnowledgeBank::new(pool.word_length());
    bank.absorb(guess, &score)?;
    Ok(pool.apply_filter(bank.build_filter().as_predicate()))
}
