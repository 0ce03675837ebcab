use crate::results::WordleError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// A set of candidate words that guesses and solutions are drawn from.
///
/// Pools are never modified once built: filtering returns a new pool, which shares word storage
/// with the original.
pub trait WordPool: Sized {
    /// The length of every word in the pool.
    fn word_length(&self) -> usize;

    /// The number of words in the pool.
    fn size(&self) -> usize;

    /// Selects one word from the pool.
    ///
    /// Fails with [`WordleError::EmptyPool`] if the pool has no words.
    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Arc<str>, WordleError>;

    /// Selects up to `n` distinct entries from the pool.
    ///
    /// If the pool holds fewer than `n` words, all of them are returned in random order.
    fn pick_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Arc<str>>;

    /// Returns a new pool holding only the words accepted by `filter`.
    fn apply_filter<F>(&self, filter: F) -> Self
    where
        F: Fn(&str) -> bool;
}

/// A word pool that picks each word with equal likelihood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleWordPool {
    words: Vec<Arc<str>>,
    word_length: usize,
}

impl SimpleWordPool {
    /// Constructs a new `SimpleWordPool` by reading words from the given reader.
    ///
    /// Only the first whitespace-separated token on each line is used, so word frequency files can
    /// be read too. Blank lines are skipped and each word is converted to lower case. All words
    /// must have the same length.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let mut words = Vec::new();
        for line in word_reader.lines() {
            let line = line?;
            if let Some(word) = line.split_whitespace().next() {
                words.push(word.to_string());
            }
        }
        SimpleWordPool::from_iterator(words)
    }

    /// Constructs a new `SimpleWordPool` using the words from the given iterator.
    ///
    /// Each word is trimmed and converted to lower case, and empty words are skipped. All words
    /// must have the same length.
    ///
    /// ```
    /// use wordle_sim::SimpleWordPool;
    /// use wordle_sim::WordPool;
    ///
    /// let pool = SimpleWordPool::from_iterator(&["Crane", "", " slate"]).unwrap();
    ///
    /// assert_eq!(pool.size(), 2);
    /// assert_eq!(pool.word_length(), 5);
    /// assert_eq!(&*pool[1], "slate");
    /// ```
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut word_length = 0;
        let mut all_words = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            check_word_length(&word, &mut word_length)?;
            all_words.push(Arc::from(word.as_str()));
        }
        Ok(SimpleWordPool {
            words: all_words,
            word_length,
        })
    }
}

impl WordPool for SimpleWordPool {
    fn word_length(&self) -> usize {
        self.word_length
    }

    fn size(&self) -> usize {
        self.words.len()
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Arc<str>, WordleError> {
        self.words
            .choose(rng)
            .map(Arc::clone)
            .ok_or(WordleError::EmptyPool)
    }

    fn pick_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Arc<str>> {
        self.words.choose_multiple(rng, n).map(Arc::clone).collect()
    }

    fn apply_filter<F>(&self, filter: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        SimpleWordPool {
            words: self
                .words
                .iter()
                .filter(|word| filter(word))
                .map(Arc::clone)
                .collect(),
            word_length: self.word_length,
        }
    }
}

impl Deref for SimpleWordPool {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

/// A word pool that picks words in proportion to their weights, such as how common each word is.
///
/// If every weight is zero, words are picked with equal likelihood.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedWordPool {
    words: Vec<Arc<str>>,
    weights: Vec<f64>,
    /// Running totals of `weights`, used to look up a word from a point in `[0, total)`.
    cumulative_weights: Vec<f64>,
    word_length: usize,
}

impl WeightedWordPool {
    /// Constructs a new `WeightedWordPool` by reading `word weight` lines from the given reader.
    ///
    /// Blank lines are skipped and each word is converted to lower case. Fails with
    /// [`WordleError::InvalidWeight`] if a line's weight is missing, negative or not a number.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let mut entries = Vec::new();
        for (index, line) in word_reader.lines().enumerate() {
            let line = line?;
            let mut tokens = line.split_whitespace();
            let word = match tokens.next() {
                Some(word) => word.to_string(),
                None => continue,
            };
            let weight = tokens
                .next()
                .and_then(|weight| weight.parse::<f64>().ok())
                .ok_or(WordleError::InvalidWeight { line: index + 1 })?;
            entries.push((word, weight, index + 1));
        }
        WeightedWordPool::from_entries(entries)
    }

    /// Constructs a new `WeightedWordPool` from `(word, weight)` pairs.
    ///
    /// Each word is trimmed and converted to lower case, and empty words are skipped. All words
    /// must have the same length and every weight must be a non-negative number.
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, f64)>,
    {
        WeightedWordPool::from_entries(
            words
                .into_iter()
                .enumerate()
                .map(|(index, (word, weight))| (word, weight, index + 1)),
        )
    }

    /// The weight of each word, in the same order as the words.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn from_entries<S, I>(entries: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, f64, usize)>,
    {
        let mut word_length = 0;
        let mut words = Vec::new();
        let mut weights = Vec::new();
        for (word, weight, line) in entries {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(WordleError::InvalidWeight { line });
            }
            check_word_length(&word, &mut word_length)?;
            words.push(Arc::from(word.as_str()));
            weights.push(weight);
        }
        Ok(WeightedWordPool::from_parts(words, weights, word_length))
    }

    fn from_parts(words: Vec<Arc<str>>, weights: Vec<f64>, word_length: usize) -> Self {
        let cumulative_weights = weights
            .iter()
            .scan(0.0, |total, weight| {
                *total += weight;
                Some(*total)
            })
            .collect();
        WeightedWordPool {
            words,
            weights,
            cumulative_weights,
            word_length,
        }
    }

    fn total_weight(&self) -> f64 {
        self.cumulative_weights.last().copied().unwrap_or(0.0)
    }
}

impl WordPool for WeightedWordPool {
    fn word_length(&self) -> usize {
        self.word_length
    }

    fn size(&self) -> usize {
        self.words.len()
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Arc<str>, WordleError> {
        if self.words.is_empty() {
            return Err(WordleError::EmptyPool);
        }
        let total = self.total_weight();
        if total <= 0.0 {
            return Ok(Arc::clone(&self.words[rng.gen_range(0..self.words.len())]));
        }
        let target = rng.gen_range(0.0..total);
        let index = self
            .cumulative_weights
            .partition_point(|cumulative| *cumulative <= target)
            .min(self.words.len() - 1);
        Ok(Arc::clone(&self.words[index]))
    }

    fn pick_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Arc<str>> {
        let mut remaining: Vec<usize> = (0..self.words.len()).collect();
        let mut picked = Vec::with_capacity(n.min(remaining.len()));
        while picked.len() < n && !remaining.is_empty() {
            let total: f64 = remaining.iter().map(|index| self.weights[*index]).sum();
            let position = if total > 0.0 {
                let mut target = rng.gen_range(0.0..total);
                remaining
                    .iter()
                    .position(|index| {
                        let weight = self.weights[*index];
                        if target < weight {
                            return true;
                        }
                        target -= weight;
                        false
                    })
                    .unwrap_or(remaining.len() - 1)
            } else {
                rng.gen_range(0..remaining.len())
            };
            picked.push(Arc::clone(&self.words[remaining.swap_remove(position)]));
        }
        picked
    }

    fn apply_filter<F>(&self, filter: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let (words, weights): (Vec<Arc<str>>, Vec<f64>) = self
            .words
            .iter()
            .zip(self.weights.iter())
            .filter(|(word, _)| filter(word))
            .map(|(word, weight)| (Arc::clone(word), *weight))
            .unzip();
        WeightedWordPool::from_parts(words, weights, self.word_length)
    }
}

impl Deref for WeightedWordPool {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

fn check_word_length(word: &str, word_length: &mut usize) -> Result<(), WordleError> {
    let length = word.chars().count();
    if *word_length == 0 {
        *word_length = length;
    } else if length != *word_length {
        return Err(WordleError::WordLength(*word_length));
    }
    Ok(())
}
