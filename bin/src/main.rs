use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Instant;
use wordle_sim::*;

/// Simulates a robot playing Wordle: it guesses from a word list and narrows the list with
/// everything each score reveals.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file with one word per line. With `--weighted`, each line is "word weight".
    #[clap(short = 'f', long)]
    words_file: String,

    /// Pick guesses in proportion to each word's weight instead of uniformly.
    #[clap(short, long)]
    weighted: bool,

    /// The number of guesses after which the robot gives up on a puzzle.
    #[clap(long, default_value_t = DEFAULT_MAX_GUESSES)]
    max_guesses: u32,

    /// Seeds every random choice, so runs can be repeated.
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Log every guess the robot makes.
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve randomly chosen words from the words file several times each.
    Simulate {
        #[clap(long, default_value_t = 10)]
        puzzles: usize,
        #[clap(long, default_value_t = 10)]
        attempts: u32,
    },
    /// Solve a single game with the given word.
    Single { word: String },
    /// List the words still possible after a guess, given its score as one b/y/g per letter.
    Possible { guess: String, score: String },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let start_time = Instant::now();
    println!("File: {}", args.words_file);
    let words_reader = io::BufReader::new(
        File::open(&args.words_file)
            .with_context(|| format!("could not open {}", args.words_file))?,
    );
    let config = RobotConfig {
        max_guesses: args.max_guesses,
    };

    if args.weighted {
        let pool = WeightedWordPool::from_reader(words_reader)?;
        run_command(&args, pool, config)?;
    } else {
        let pool = SimpleWordPool::from_reader(words_reader)?;
        run_command(&args, pool, config)?;
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_command<P>(args: &Args, pool: P, config: RobotConfig) -> anyhow::Result<()>
where
    P: WordPool + Clone + Sync + Deref<Target = [Arc<str>]>,
{
    println!("There are {} possible words.", pool.size());
    match &args.command {
        Command::Simulate { puzzles, attempts } => {
            let robot = Robot::with_config(pool.clone(), config);
            let config = SimulationConfig {
                num_puzzles: *puzzles,
                num_attempts: *attempts,
                seed: args.seed,
            };
            run_simulation_command(&robot, &pool, &config)
        }
        Command::Single { word } => {
            let robot = Robot::with_config(pool, config);
            play_single_game(&robot, &word.to_lowercase(), args.seed)
        }
        Command::Possible { guess, score } => {
            let possible = possible_words(&pool, &guess.to_lowercase(), score)?;
            println!("{} words are still possible.", possible.size());
            for word in possible.iter() {
                println!("\t{}", word);
            }
            Ok(())
        }
    }
}

fn run_simulation_command<P>(
    robot: &Robot<P>,
    pool: &P,
    config: &SimulationConfig,
) -> anyhow::Result<()>
where
    P: WordPool + Sync,
{
    let tallies = run_simulation(robot, pool, config)?;
    println!("Simulated {} words. Results:", tallies.len());

    println!("|Word|Attempts|All greens|Aborted|Average guesses|");
    println!("|----|--------|----------|-------|---------------|");
    for tally in &tallies {
        let average = tally
            .average_guesses()
            .map_or_else(|| "-".to_string(), |average| format!("{:.2}", average));
        println!(
            "|{}|{}|{}|{}|{}|",
            tally.solution, tally.num_attempts, tally.num_all_greens, tally.num_aborted, average
        );
    }

    let num_attempts: u32 = tallies.iter().map(|tally| tally.num_attempts).sum();
    let num_all_greens: u32 = tallies.iter().map(|tally| tally.num_all_greens).sum();
    if num_attempts > 0 {
        println!(
            "\n**All-green games:** {}/{} ({:.1}%)",
            num_all_greens,
            num_attempts,
            100.0 * num_all_greens as f64 / num_attempts as f64
        );
    }
    Ok(())
}

fn play_single_game<P: WordPool>(robot: &Robot<P>, word: &str, seed: u64) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    match robot.solve(&Puzzle::new(word), &mut rng) {
        Ok(report) => {
            println!("Solved it! It took me {} guesses.", report.num_guesses());
            for record in &report.history {
                println!("\t{} {}", record.guess, record.score);
            }
            Ok(())
        }
        Err(WordleError::GuessLimitExceeded(limit)) => {
            println!("I still couldn't solve it after {} guesses :(", limit);
            Ok(())
        }
        Err(WordleError::EmptyPool) => {
            log::error!("{} is not in the word list.", word);
            std::process::exit(1);
        }
        Err(error) => Err(error.into()),
    }
}
