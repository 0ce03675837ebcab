use crate::results::LetterOutcome;
use crate::results::PositionFact;
use crate::results::WordScore;
use crate::results::WordleError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::zip;
use std::result::Result;

/// Everything learned so far about a single letter.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Knowledge {
    /// The minimum number of times this letter must appear in the word.
    minimum_count: u32,
    /// Whether `minimum_count` is known to be the exact number of times this letter appears.
    exact: bool,
    /// The status of the letter at each location.
    positions: Vec<PositionFact>,
}

impl Knowledge {
    /// Constructs a `Knowledge` with no facts, for use with words of the given length.
    pub fn new(word_length: usize) -> Knowledge {
        Knowledge {
            minimum_count: 0,
            exact: false,
            positions: vec![PositionFact::NoInfo; word_length],
        }
    }

    pub fn minimum_count(&self) -> u32 {
        self.minimum_count
    }

    /// Returns true once a black outcome has shown that `minimum_count` is the exact count.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn word_length(&self) -> usize {
        self.positions.len()
    }

    /// Returns whether the letter is known to be, or not be, at the given location.
    ///
    /// Fails with [`WordleError::IndexOutOfRange`] if `index` is not a location in the word.
    pub fn position(&self, index: usize) -> Result<PositionFact, WordleError> {
        self.positions
            .get(index)
            .copied()
            .ok_or(WordleError::IndexOutOfRange {
                index,
                length: self.positions.len(),
            })
    }

    /// Records the outcome this letter received at `position` in one guess.
    ///
    /// `letter` is only used to describe any error.
    pub fn add_fact(
        &mut self,
        letter: char,
        position: usize,
        outcome: LetterOutcome,
    ) -> Result<(), WordleError> {
        if position >= self.positions.len() {
            return Err(WordleError::IndexOutOfRange {
                index: position,
                length: self.positions.len(),
            });
        }
        let fact = match outcome {
            LetterOutcome::Black | LetterOutcome::Yellow => PositionFact::NotHere,
            LetterOutcome::Green => PositionFact::Here,
            LetterOutcome::Unknown => return Err(WordleError::UnscoredLetter(position)),
        };
        self.check_position(letter, position, fact)?;
        match outcome {
            LetterOutcome::Black => self.exact = true,
            _ => self.minimum_count += 1,
        }
        self.positions[position] = fact;
        Ok(())
    }

    /// Merges what is known in `other` into this knowledge.
    ///
    /// Counts only ever grow and exactness is never lost. If `other` asserts a different fact
    /// for a location that is already known, this fails with [`WordleError::ConflictingFacts`]
    /// and leaves `self` unchanged.
    pub fn merge(&mut self, letter: char, other: &Knowledge) -> Result<(), WordleError> {
        self.check_merge(letter, other)?;
        self.minimum_count = self.minimum_count.max(other.minimum_count);
        self.exact |= other.exact;
        for (known, new) in zip(self.positions.iter_mut(), other.positions.iter()) {
            if *known == PositionFact::NoInfo {
                *known = *new;
            }
        }
        Ok(())
    }

    /// Returns `true` iff `word` is consistent with what is known about `letter`.
    pub fn is_consistent(&self, letter: char, word: &str) -> bool {
        let count = word.chars().filter(|c| *c == letter).count() as u32;
        if (self.exact && count != self.minimum_count) || count < self.minimum_count {
            return false;
        }
        zip(word.chars(), self.positions.iter()).all(|(word_letter, fact)| match fact {
            PositionFact::Here => word_letter == letter,
            PositionFact::NotHere => word_letter != letter,
            PositionFact::NoInfo => true,
        })
    }

    fn check_merge(&self, letter: char, other: &Knowledge) -> Result<(), WordleError> {
        if self.positions.len() != other.positions.len() {
            return Err(WordleError::WordLength(self.positions.len()));
        }
        for (position, fact) in other.positions.iter().enumerate() {
            self.check_position(letter, position, *fact)?;
        }
        Ok(())
    }

    fn check_position(
        &self,
        letter: char,
        position: usize,
        fact: PositionFact,
    ) -> Result<(), WordleError> {
        let known = self.positions[position];
        if known == PositionFact::NoInfo || fact == PositionFact::NoInfo || known == fact {
            return Ok(());
        }
        Err(WordleError::ConflictingFacts { letter, position })
    }
}

/// All knowledge gathered about a puzzle, by letter.
///
/// Knowledge only ever accumulates: absorbing another scored guess can add or tighten
/// constraints, but never relaxes them.
///
/// ```
/// use wordle_sim::KnowledgeBank;
///
/// let mut bank = KnowledgeBank::new(5);
/// bank.absorb("crane", &"bbybg".parse().unwrap()).unwrap();
/// let filter = bank.build_filter();
///
/// assert!(filter.accepts("abide"));
/// assert!(!filter.accepts("shake"));
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnowledgeBank {
    word_length: usize,
    letters: BTreeMap<char, Knowledge>,
}

impl KnowledgeBank {
    /// Creates an empty `KnowledgeBank` for words of the given length.
    pub fn new(word_length: usize) -> KnowledgeBank {
        KnowledgeBank {
            word_length,
            letters: BTreeMap::new(),
        }
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Returns what is known about `letter`, if it has been seen in any guess.
    pub fn knowledge(&self, letter: char) -> Option<&Knowledge> {
        self.letters.get(&letter)
    }

    /// Learns from the given scored guess.
    ///
    /// If the guess contradicts what is already known, this returns an error and the bank is left
    /// unchanged.
    pub fn absorb(&mut self, guess: &str, score: &WordScore) -> Result<(), WordleError> {
        if guess.chars().count() != self.word_length || score.len() != self.word_length {
            return Err(WordleError::WordLength(self.word_length));
        }
        let learned = self.knowledge_from_guess(guess, score)?;
        for (letter, new_knowledge) in &learned {
            if let Some(known) = self.letters.get(letter) {
                known.check_merge(*letter, new_knowledge)?;
            }
        }
        for (letter, new_knowledge) in learned {
            match self.letters.get_mut(&letter) {
                Some(known) => known.merge(letter, &new_knowledge)?,
                None => {
                    self.letters.insert(letter, new_knowledge);
                }
            }
        }
        log::trace!("absorbed {} ({}): {:?}", guess, score, self.letters);
        Ok(())
    }

    /// Builds a filter over what is currently known.
    ///
    /// The filter owns a snapshot of the bank, so the bank may keep learning while the filter is
    /// in use.
    pub fn build_filter(&self) -> KnowledgeFilter {
        KnowledgeFilter {
            bank: self.clone(),
        }
    }

    /// Returns `true` iff `word` is consistent with everything in this bank.
    pub fn is_consistent(&self, word: &str) -> bool {
        word.chars().count() == self.word_length
            && self
                .letters
                .iter()
                .all(|(letter, knowledge)| knowledge.is_consistent(*letter, word))
    }

    fn knowledge_from_guess(
        &self,
        guess: &str,
        score: &WordScore,
    ) -> Result<BTreeMap<char, Knowledge>, WordleError> {
        let mut learned: BTreeMap<char, Knowledge> = BTreeMap::new();
        for ((position, letter), outcome) in zip(guess.chars().enumerate(), score.iter()) {
            learned
                .entry(letter)
                .or_insert_with(|| Knowledge::new(self.word_length))
                .add_fact(letter, position, *outcome)?;
        }
        Ok(learned)
    }
}

/// A read-only snapshot of a [`KnowledgeBank`], used to test candidate words.
#[derive(Debug, Clone)]
pub struct KnowledgeFilter {
    bank: KnowledgeBank,
}

impl KnowledgeFilter {
    /// Returns `true` iff `word` is consistent with everything known when the filter was built.
    ///
    /// Words of the wrong length are never accepted. Letters that have never been guessed impose
    /// no constraint.
    pub fn accepts(&self, word: &str) -> bool {
        self.bank.is_consistent(word)
    }

    /// Borrows this filter as a plain predicate.
    pub fn as_predicate(&self) -> impl Fn(&str) -> bool + '_ {
        move |word| self.accepts(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(s: &str) -> WordScore {
        s.parse().unwrap()
    }

    #[test]
    fn knowledge_constructor() -> Result<(), WordleError> {
        let knowledge = Knowledge::new(3);

        assert_eq!(knowledge.minimum_count(), 0);
        assert!(!knowledge.is_exact());
        assert_eq!(knowledge.position(0)?, PositionFact::NoInfo);
        assert_eq!(knowledge.position(1)?, PositionFact::NoInfo);
        assert_eq!(knowledge.position(2)?, PositionFact::NoInfo);
        Ok(())
    }

    #[test]
    fn knowledge_position_out_of_range_errors() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(3);
        knowledge.add_fact('a', 2, LetterOutcome::Green)?;

        assert!(matches!(
            knowledge.position(3),
            Err(WordleError::IndexOutOfRange {
                index: 3,
                length: 3
            })
        ));
        assert_eq!(knowledge.position(2)?, PositionFact::Here);
        Ok(())
    }

    #[test]
    fn knowledge_add_fact_green() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(3);

        knowledge.add_fact('a', 1, LetterOutcome::Green)?;

        assert_eq!(knowledge.minimum_count(), 1);
        assert!(!knowledge.is_exact());
        assert_eq!(knowledge.position(0)?, PositionFact::NoInfo);
        assert_eq!(knowledge.position(1)?, PositionFact::Here);
        assert_eq!(knowledge.position(2)?, PositionFact::NoInfo);
        Ok(())
    }

    #[test]
    fn knowledge_add_fact_yellow() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(3);

        knowledge.add_fact('a', 2, LetterOutcome::Yellow)?;

        assert_eq!(knowledge.minimum_count(), 1);
        assert!(!knowledge.is_exact());
        assert_eq!(knowledge.position(2)?, PositionFact::NotHere);
        Ok(())
    }

    #[test]
    fn knowledge_add_fact_black_keeps_count() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(3);

        knowledge.add_fact('a', 0, LetterOutcome::Green)?;
        knowledge.add_fact('a', 2, LetterOutcome::Black)?;

        assert_eq!(knowledge.minimum_count(), 1);
        assert!(knowledge.is_exact());
        assert_eq!(knowledge.position(0)?, PositionFact::Here);
        assert_eq!(knowledge.position(1)?, PositionFact::NoInfo);
        assert_eq!(knowledge.position(2)?, PositionFact::NotHere);
        Ok(())
    }

    #[test]
    fn knowledge_add_fact_unknown_errors() {
        let mut knowledge = Knowledge::new(3);

        assert!(matches!(
            knowledge.add_fact('a', 0, LetterOutcome::Unknown),
            Err(WordleError::UnscoredLetter(0))
        ));
        assert_eq!(knowledge, Knowledge::new(3));
    }

    #[test]
    fn knowledge_add_fact_out_of_range_errors() {
        let mut knowledge = Knowledge::new(3);

        assert!(matches!(
            knowledge.add_fact('a', 3, LetterOutcome::Green),
            Err(WordleError::IndexOutOfRange {
                index: 3,
                length: 3
            })
        ));
    }

    #[test]
    fn knowledge_merge_takes_max_count_and_exactness() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(4);
        knowledge.add_fact('a', 0, LetterOutcome::Yellow)?;
        knowledge.add_fact('a', 1, LetterOutcome::Yellow)?;
        let mut other = Knowledge::new(4);
        other.add_fact('a', 2, LetterOutcome::Green)?;
        other.add_fact('a', 3, LetterOutcome::Black)?;

        knowledge.merge('a', &other)?;

        assert_eq!(knowledge.minimum_count(), 2);
        assert!(knowledge.is_exact());
        assert_eq!(knowledge.position(0)?, PositionFact::NotHere);
        assert_eq!(knowledge.position(1)?, PositionFact::NotHere);
        assert_eq!(knowledge.position(2)?, PositionFact::Here);
        assert_eq!(knowledge.position(3)?, PositionFact::NotHere);
        Ok(())
    }

    #[test]
    fn knowledge_merge_same_facts_is_ok() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(3);
        knowledge.add_fact('a', 1, LetterOutcome::Green)?;
        let copy = knowledge.clone();

        knowledge.merge('a', &copy)?;

        assert_eq!(knowledge, copy);
        Ok(())
    }

    #[test]
    fn knowledge_merge_conflict_errors_and_leaves_knowledge_unchanged() -> Result<(), WordleError>
    {
        let mut knowledge = Knowledge::new(3);
        knowledge.add_fact('a', 1, LetterOutcome::Green)?;
        let before = knowledge.clone();
        let mut other = Knowledge::new(3);
        other.add_fact('a', 0, LetterOutcome::Green)?;
        other.add_fact('a', 1, LetterOutcome::Yellow)?;

        assert!(matches!(
            knowledge.merge('a', &other),
            Err(WordleError::ConflictingFacts {
                letter: 'a',
                position: 1
            })
        ));
        assert_eq!(knowledge, before);
        Ok(())
    }

    #[test]
    fn knowledge_merge_wrong_length_errors() {
        let mut knowledge = Knowledge::new(3);

        assert!(matches!(
            knowledge.merge('a', &Knowledge::new(4)),
            Err(WordleError::WordLength(3))
        ));
    }

    #[test]
    fn knowledge_is_consistent_with_min_count() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(4);
        knowledge.add_fact('a', 0, LetterOutcome::Yellow)?;
        knowledge.add_fact('a', 1, LetterOutcome::Yellow)?;

        assert!(knowledge.is_consistent('a', "bbaa"));
        assert!(knowledge.is_consistent('a', "cdaa"));

        assert_eq!(knowledge.is_consistent('a', "bcda"), false);
        assert_eq!(knowledge.is_consistent('a', "abca"), false);
        assert_eq!(knowledge.is_consistent('a', "zzzz"), false);
        Ok(())
    }

    #[test]
    fn knowledge_is_consistent_with_exact_count() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(4);
        knowledge.add_fact('a', 0, LetterOutcome::Yellow)?;
        knowledge.add_fact('a', 1, LetterOutcome::Black)?;

        assert!(knowledge.is_consistent('a', "bbab"));
        assert!(knowledge.is_consistent('a', "bbba"));

        assert_eq!(knowledge.is_consistent('a', "bbaa"), false);
        assert_eq!(knowledge.is_consistent('a', "bbbb"), false);
        Ok(())
    }

    #[test]
    fn knowledge_is_consistent_with_black_only() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(4);
        knowledge.add_fact('a', 2, LetterOutcome::Black)?;

        assert!(knowledge.is_consistent('a', "bcde"));

        assert_eq!(knowledge.is_consistent('a', "abcd"), false);
        Ok(())
    }

    #[test]
    fn knowledge_is_consistent_with_here() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(4);
        knowledge.add_fact('a', 3, LetterOutcome::Green)?;

        assert!(knowledge.is_consistent('a', "bcda"));
        assert!(knowledge.is_consistent('a', "acda"));

        assert_eq!(knowledge.is_consistent('a', "bcad"), false);
        Ok(())
    }

    #[test]
    fn knowledge_bank_absorb_doubled_letter() -> Result<(), WordleError> {
        let mut bank = KnowledgeBank::new(5);

        // Scored against "mesas".
        bank.absorb("sassy", &score("yygbb"))?;

        let s = bank.knowledge('s').unwrap();
        assert_eq!(s.minimum_count(), 2);
        assert!(s.is_exact());
        assert_eq!(s.position(0)?, PositionFact::NotHere);
        assert_eq!(s.position(1)?, PositionFact::NoInfo);
        assert_eq!(s.position(2)?, PositionFact::Here);
        assert_eq!(s.position(3)?, PositionFact::NotHere);
        assert_eq!(s.position(4)?, PositionFact::NoInfo);
        assert!(bank.is_consistent("mesas"));
        Ok(())
    }

    #[test]
    fn knowledge_bank_absorb_conflict_leaves_bank_unchanged() -> Result<(), WordleError> {
        let mut bank = KnowledgeBank::new(4);
        bank.absorb("abcd", &score("gbbb"))?;
        let before = bank.clone();

        assert!(matches!(
            bank.absorb("aefb", &score("ybbb")),
            Err(WordleError::ConflictingFacts {
                letter: 'a',
                position: 0
            })
        ));
        assert_eq!(bank, before);
        Ok(())
    }

    #[test]
    fn knowledge_bank_filter_is_a_snapshot() -> Result<(), WordleError> {
        let mut bank = KnowledgeBank::new(4);
        bank.absorb("abcd", &score("gbbb"))?;
        let filter = bank.build_filter();

        bank.absorb("aefg", &score("gbbb"))?;

        assert!(filter.accepts("aefg"));
        assert_eq!(bank.build_filter().accepts("aefg"), false);
        Ok(())
    }
}
