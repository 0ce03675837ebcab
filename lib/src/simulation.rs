use crate::data::WordPool;
use crate::engine::Robot;
use crate::puzzle::Puzzle;
use crate::results::WordleError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::result::Result;
use std::sync::Arc;

/// Controls a batch of simulated games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// How many distinct solutions to draw from the pool.
    pub num_puzzles: usize,
    /// How many times to solve each puzzle.
    pub num_attempts: u32,
    /// Seeds every random choice made during the simulation.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_puzzles: 10,
            num_attempts: 10,
            seed: 0,
        }
    }
}

/// How a robot fared against one puzzle across all attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleTally {
    pub solution: Arc<str>,
    pub num_attempts: u32,
    /// Attempts that were solved without ever seeing a yellow letter.
    pub num_all_greens: u32,
    /// Attempts abandoned after reaching the robot's guess limit.
    pub num_aborted: u32,
    /// Total guesses across all solved attempts.
    pub total_guesses: u64,
}

impl PuzzleTally {
    fn new(solution: Arc<str>) -> PuzzleTally {
        PuzzleTally {
            solution,
            num_attempts: 0,
            num_all_greens: 0,
            num_aborted: 0,
            total_guesses: 0,
        }
    }

    pub fn num_solved(&self) -> u32 {
        self.num_attempts - self.num_aborted
    }

    /// The average number of guesses per solved attempt, if any were solved.
    pub fn average_guesses(&self) -> Option<f64> {
        match self.num_solved() {
            0 => None,
            solved => Some(self.total_guesses as f64 / solved as f64),
        }
    }
}

/// Draws `config.num_puzzles` solutions from `pool` and has `robot` solve each one
/// `config.num_attempts` times.
///
/// Puzzles are solved in parallel. Each puzzle gets its own random generator derived from
/// `config.seed`, so the results only depend on the inputs. Attempts that exceed the robot's guess
/// limit are counted and skipped; any other error ends the simulation.
pub fn run_simulation<P, Q>(
    robot: &Robot<P>,
    pool: &Q,
    config: &SimulationConfig,
) -> Result<Vec<PuzzleTally>, WordleError>
where
    P: WordPool + Sync,
    Q: WordPool,
{
    let mut rng = StdRng::seed_from_u64(config.seed);
    let solutions = pool.pick_n(config.num_puzzles, &mut rng);
    let num_puzzles = solutions.len();
    solutions
        .into_par_iter()
        .enumerate()
        .map(|(index, solution)| {
            let mut rng = StdRng::seed_from_u64(puzzle_seed(config.seed, index));
            let tally = solve_repeatedly(robot, solution, config.num_attempts, &mut rng)?;
            log::info!(
                "sim {}/{}: {} solved {}/{} times, {} all greens",
                index + 1,
                num_puzzles,
                tally.solution,
                tally.num_solved(),
                tally.num_attempts,
                tally.num_all_greens
            );
            Ok(tally)
        })
        .collect()
}

fn solve_repeatedly<P: WordPool>(
    robot: &Robot<P>,
    solution: Arc<str>,
    num_attempts: u32,
    rng: &mut StdRng,
) -> Result<PuzzleTally, WordleError> {
    let puzzle = Puzzle::new(&solution);
    let mut tally = PuzzleTally::new(solution);
    for _ in 0..num_attempts {
        tally.num_attempts += 1;
        match robot.solve(&puzzle, rng) {
            Ok(report) => {
                tally.total_guesses += report.num_guesses() as u64;
                if report.is_all_greens() {
                    tally.num_all_greens += 1;
                }
            }
            Err(WordleError::GuessLimitExceeded(limit)) => {
                log::warn!(
                    "gave up on '{}' after {} guesses",
                    puzzle.solution(),
                    limit
                );
                tally.num_aborted += 1;
            }
            Err(error) => return Err(error),
        }
    }
    Ok(tally)
}

fn puzzle_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
