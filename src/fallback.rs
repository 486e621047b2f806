//! 备用题库：反向合成失败时使用的固定题目。
//!
//! 每一条都在对应难度的数字范围内，并且只用该难度允许的运算符就能得到 36，
//! 这一点由本模块的测试逐条验证。

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::difficulty::{Difficulty, DifficultyConfig};
use crate::puzzle::{Puzzle, PuzzleSource};
use crate::solver::{is_solvable, minimum_moves};
use crate::{LEAF_COUNT, TARGET};

/// 题库数据的版本号，修改下面任何一张表时递增。
pub const FALLBACK_TABLE_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackEntry {
    pub numbers: [i64; 4],
}

const fn entry(numbers: [i64; 4]) -> FallbackEntry {
    FallbackEntry { numbers }
}

static EASY: [FallbackEntry; 4] = [
    entry([12, 11, 7, 6]),
    entry([9, 9, 9, 9]),
    entry([12, 10, 8, 6]),
    entry([11, 10, 8, 7]),
];

static MEDIUM: [FallbackEntry; 4] = [
    entry([14, 5, 4, 3]),
    entry([8, 6, 3, 4]),
    entry([9, 2, 2, 1]),
    entry([15, 3, 7, 2]),
];

static HARD: [FallbackEntry; 4] = [
    entry([8, 2, 9, 1]),
    entry([12, 3, 9, 1]),
    entry([20, 5, 9, 1]),
    entry([18, 3, 12, 2]),
];

pub fn fallback_entries(difficulty: Difficulty) -> &'static [FallbackEntry] {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

/// `difficulty` 题库中符合 `config` 的条目：数字都在范围内，且只用配置里的运算符就能解出。
pub fn fallback_candidates(difficulty: Difficulty, config: &DifficultyConfig) -> Vec<FallbackEntry> {
    fallback_entries(difficulty)
        .iter()
        .filter(|e| e.numbers.iter().all(|&n| config.number_range.contains(n)))
        .filter(|e| is_solvable(e.numbers, TARGET, config.operators))
        .copied()
        .collect()
}

/// 从符合 `config` 的备用题中随机取一道并打乱数字顺序。
///
/// 不重建解题步骤；最优步数用求解器算出，找不到解时按 3 步处理。
pub fn fallback_puzzle<R: Rng + ?Sized>(
    difficulty: Difficulty,
    config: &DifficultyConfig,
    rng: &mut R,
) -> Puzzle {
    let candidates = fallback_candidates(difficulty, config);
    let picked = candidates
        .choose(rng)
        .or_else(|| fallback_entries(difficulty).first())
        .copied()
        .unwrap_or(entry([9, 9, 9, 9]));
    let mut numbers = picked.numbers;
    numbers.shuffle(rng);

    let optimal_move_count =
        minimum_moves(numbers, TARGET, config.operators).unwrap_or(LEAF_COUNT - 1);
    info!(
        "using fallback puzzle {:?} for {} (table v{})",
        numbers, difficulty, FALLBACK_TABLE_VERSION
    );

    Puzzle {
        numbers,
        solution_trace: Vec::new(),
        optimal_move_count,
        difficulty,
        source: PuzzleSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{find_solutions_with, uses_only};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_entry_is_in_range() {
        for difficulty in Difficulty::ALL {
            let range = difficulty.number_range();
            for e in fallback_entries(difficulty) {
                assert!(
                    e.numbers.iter().all(|&n| range.contains(n)),
                    "{:?} outside {} for {}",
                    e.numbers,
                    range,
                    difficulty
                );
            }
        }
    }

    #[test]
    fn every_entry_is_solvable_with_tier_operators() {
        for difficulty in Difficulty::ALL {
            let operators = difficulty.operators();
            for e in fallback_entries(difficulty) {
                let solutions = find_solutions_with(e.numbers, TARGET, operators);
                assert!(!solutions.is_empty(), "{:?} has no {} solution", e.numbers, difficulty);
                assert!(solutions.iter().all(|trace| uses_only(trace, operators)));
                assert_eq!(minimum_moves(e.numbers, TARGET, operators), Some(3));
            }
        }
    }

    #[test]
    fn tables_have_a_few_entries_each() {
        for difficulty in Difficulty::ALL {
            let len = fallback_entries(difficulty).len();
            assert!((3..=5).contains(&len));
        }
    }

    #[test]
    fn fallback_puzzle_comes_from_table() {
        let mut rng = StdRng::seed_from_u64(36);
        for difficulty in Difficulty::ALL {
            let puzzle = fallback_puzzle(difficulty, &difficulty.config(), &mut rng);
            let mut drawn = puzzle.numbers;
            drawn.sort_unstable();
            let known = fallback_entries(difficulty).iter().any(|e| {
                let mut sorted = e.numbers;
                sorted.sort_unstable();
                sorted == drawn
            });
            assert!(known);
            assert!(puzzle.solution_trace.is_empty());
            assert_eq!(puzzle.optimal_move_count, 3);
            assert_eq!(puzzle.source, PuzzleSource::Fallback);
            assert_eq!(puzzle.difficulty, difficulty);
        }
    }

    #[test]
    fn builtin_config_keeps_every_entry() {
        for difficulty in Difficulty::ALL {
            assert_eq!(
                fallback_candidates(difficulty, &difficulty.config()),
                fallback_entries(difficulty).to_vec()
            );
        }
    }

    #[test]
    fn custom_config_filters_entries() {
        use crate::difficulty::NumberRange;
        use crate::operator::{Operator, OperatorSet};

        let add_mul = OperatorSet::empty().with(Operator::Add).with(Operator::Mul);
        let config = DifficultyConfig::new(add_mul, NumberRange::new(1, 9).unwrap()).unwrap();
        // 只有 [9, 2, 2, 1] 既在 1..=9 内又能只用 + 和 * 解出
        assert_eq!(
            fallback_candidates(Difficulty::Medium, &config),
            vec![entry([9, 2, 2, 1])]
        );

        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            let puzzle = fallback_puzzle(Difficulty::Medium, &config, &mut rng);
            assert!(puzzle.numbers.iter().all(|&n| config.number_range.contains(n)));
            assert!(is_solvable(puzzle.numbers, TARGET, add_mul));
        }
    }
}
