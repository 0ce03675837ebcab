#[cfg(test)]
mod tests {

    use std::error::Error;

    use ron;
    use wordle_sim::*;

    #[test]
    fn knowledge_bank_serde() -> Result<(), Box<dyn Error>> {
        let mut bank = KnowledgeBank::new(5);
        bank.absorb("crane", &"bbybg".parse()?)?;
        bank.absorb("abide", &"gbbbg".parse()?)?;

        let ser = ron::to_string(&bank);
        assert!(ser.is_ok());

        let deser = ron::from_str::<KnowledgeBank>(&ser.unwrap());
        assert!(deser.is_ok());
        let deser = deser.unwrap();
        assert_eq!(deser, bank);
        for word in ["apple", "lapse", "abide", "adobe"] {
            assert_eq!(
                deser.build_filter().accepts(word),
                bank.build_filter().accepts(word)
            );
        }
        Ok(())
    }

    #[test]
    fn solve_report_serde() -> Result<(), Box<dyn Error>> {
        let puzzle = Puzzle::new("alone");
        let mut history = Vec::new();
        for guess in ["alloy", "alone"] {
            let (is_exact_match, score) = puzzle.guess(guess)?;
            history.push(GuessRecord {
                guess: guess.into(),
                is_exact_match,
                score,
            });
        }
        let report = SolveReport {
            solved: true,
            history,
        };

        let ser = ron::to_string(&report)?;
        let deser = ron::from_str::<SolveReport>(&ser)?;

        assert_eq!(deser, report);
        assert_eq!(deser.history[0].score.to_string(), "ggbyb");
        Ok(())
    }
}
