//! # 命令行入口
//!
//! - `generate`：按难度出题，打印题目和生成时的解法；
//! - `solve`：列出 4 个数字得到目标值的全部解法；
//! - `verify`：用求解器重新检查备用题库和闯关关卡。
//!
//! 每次运行的结果都会带时间戳追加到日志文件（默认 `log/36_game_log.txt`）。

mod journal;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use game_of_36::fallback::fallback_entries;
use game_of_36::solver::uses_only;
use game_of_36::{
    campaign, find_solutions_with, format_trace, Difficulty, Generator, OperatorSet, Puzzle,
    TARGET,
};

const SEPARATOR: &str = "--------------------";

#[derive(Parser)]
#[command(name = "game-of-36")]
#[command(about = "Puzzle generator and exhaustive solver for the Game of 36")]
#[command(version)]
struct Cli {
    /// Journal file that every run is appended to
    #[arg(long, global = true, default_value = "log/36_game_log.txt")]
    log_file: PathBuf,

    /// Also journal per-attempt generator details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate puzzles for a difficulty tier
    Generate {
        /// easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Number of puzzles to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Seed for a reproducible sequence of puzzles
        #[arg(long)]
        seed: Option<u64>,

        /// Print the puzzles as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every way four numbers reach the target
    Solve {
        #[arg(value_name = "N", num_args = 4, required = true)]
        numbers: Vec<i64>,

        #[arg(long, default_value_t = TARGET)]
        target: i64,

        /// Only use the operators of this tier
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Re-check the fallback table and campaign levels
    Verify,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    if let Err(e) = journal::init(&cli.log_file, level) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Generate {
            difficulty,
            count,
            seed,
            json,
        } => generate(difficulty, count, seed, json),
        Commands::Solve {
            numbers,
            target,
            difficulty,
        } => solve(&numbers, target, difficulty),
        Commands::Verify => Ok(verify()),
    }
}

fn generate(difficulty: Difficulty, count: usize, seed: Option<u64>, json: bool) -> Result<bool> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generator = Generator::new(difficulty);
    let operators = difficulty.operators();

    let mut puzzles: Vec<Puzzle> = Vec::with_capacity(count);
    for _ in 0..count {
        let puzzle = generator.generate(&mut rng);
        let solutions = find_solutions_with(puzzle.numbers, TARGET, operators);

        info!("Puzzle: {}", puzzle);
        if !puzzle.solution_trace.is_empty() {
            info!("Generated by: {}", format_trace(&puzzle.solution_trace));
        }
        info!("Solutions with {}: {}", operators, solutions.len());
        info!("{}", SEPARATOR);

        if !json {
            println!(
                "Puzzle: {:3?}.\t Solution count {:6}.\t {}",
                puzzle.numbers,
                solutions.len(),
                format_trace(&puzzle.solution_trace)
            );
        }
        puzzles.push(puzzle);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&puzzles)?);
    }
    Ok(true)
}

fn solve(numbers: &[i64], target: i64, difficulty: Option<Difficulty>) -> Result<bool> {
    let numbers: [i64; 4] = numbers
        .try_into()
        .map_err(|_| anyhow!("expected exactly 4 numbers, got {}", numbers.len()))?;
    let operators = difficulty.map_or_else(OperatorSet::all, Difficulty::operators);
    let solutions = find_solutions_with(numbers, target, operators);

    info!("Numbers: {:?} -> {} using {}", numbers, target, operators);
    if solutions.is_empty() {
        info!("No solution found.");
        println!("No solution found.");
    } else {
        info!("Solutions: {}", solutions.len());
        for trace in &solutions {
            let line = format_trace(trace);
            info!("{}", line);
            println!("{}", line);
        }
    }
    info!("{}", SEPARATOR);
    Ok(!solutions.is_empty())
}

fn verify() -> bool {
    let mut ok = true;
    for difficulty in Difficulty::ALL {
        let operators = difficulty.operators();
        let range = difficulty.number_range();

        for entry in fallback_entries(difficulty) {
            let in_range = entry.numbers.iter().all(|&n| range.contains(n));
            let solutions = find_solutions_with(entry.numbers, TARGET, operators);
            let tier_only = solutions.iter().all(|trace| uses_only(trace, operators));
            if !in_range || solutions.is_empty() || !tier_only {
                warn!("fallback {:?} for {} failed verification", entry.numbers, difficulty);
                println!("FAIL fallback {} {:?}", difficulty, entry.numbers);
                ok = false;
            }
        }

        for level in campaign::levels(difficulty) {
            if find_solutions_with(level.numbers, TARGET, operators).is_empty() {
                warn!("campaign {} level {} is unsolvable", difficulty, level.level);
                println!("FAIL campaign {} level {} {:?}", difficulty, level.level, level.numbers);
                ok = false;
            }
        }

        println!(
            "{:<6} fallback {:2} entries, campaign {:2} levels checked",
            difficulty.name(),
            fallback_entries(difficulty).len(),
            campaign::total_levels(difficulty)
        );
    }
    info!("Verification {}", if ok { "passed" } else { "failed" });
    info!("{}", SEPARATOR);
    ok
}
