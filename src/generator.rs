//! # 反向合成出题
//!
//! 从目标值 36 出发倒推：把目标拆成 `a op b`，再把 `a`、`b` 继续拆，
//! 直到用完 3 次合并、得到 4 个叶子数字为止。
//!
//! ## 算法说明
//! - 每个节点带着"剩余合并次数"。为 0 时就是叶子，只要数值在范围内即可接受；
//! - 否则随机打乱允许的运算符，对每个运算符列出所有满足 `a op b == target`
//!   且 `a`、`b` 都在范围内的整数对，再随机打乱；
//! - 对每个整数对，把剩余次数随机分给左右子树，分别递归；
//!   两边都成功才算成功，否则换下一种拆法、下一个整数对、下一个运算符；
//! - 顶层最多尝试 [`MAX_ATTEMPTS`] 次，全部失败则改用备用题库。
//!
//! 随机数源由调用方传入，固定种子即可复现同一道题。

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::difficulty::{Difficulty, DifficultyConfig, NumberRange};
use crate::error::{ConfigError, GenerateError};
use crate::fallback::{fallback_candidates, fallback_puzzle};
use crate::operator::Operator;
use crate::puzzle::{ExpressionStep, Puzzle, PuzzleSource, Trace};
use crate::{LEAF_COUNT, TARGET};

/// 顶层合成的最大尝试次数，也是生成器唯一的终止保证。
pub const MAX_ATTEMPTS: usize = 100;

/// 自定义配置允许的最大数字；单次合成的枚举量随它增长。
pub const MAX_NUMBER: i64 = 999;

/// 列出所有满足 `a op b == target`、且 `a`、`b` 都在 `range` 内的整数对 `(a, b)`。
pub fn operand_pairs(target: i64, op: Operator, range: NumberRange) -> Vec<(i64, i64)> {
    let NumberRange { min, max } = range;
    let mut pairs = Vec::new();
    match op {
        Operator::Add => {
            for a in min..=max.min(target - min) {
                let b = target - a;
                if range.contains(b) {
                    pairs.push((a, b));
                }
            }
        }
        Operator::Sub => {
            // a 随 b 单调递增，超过 max 之后不必再试
            for b in min..=max {
                match target.checked_add(b) {
                    Some(a) if a <= max => {
                        if range.contains(a) {
                            pairs.push((a, b));
                        }
                    }
                    _ => break,
                }
            }
        }
        Operator::Mul => {
            for a in min..=max.min(target) {
                if target % a == 0 && range.contains(target / a) {
                    pairs.push((a, target / a));
                }
            }
        }
        Operator::Div => {
            for b in min..=max {
                match target.checked_mul(b) {
                    Some(a) if a <= max => {
                        if range.contains(a) {
                            pairs.push((a, b));
                        }
                    }
                    _ => break,
                }
            }
        }
    }
    pairs
}

/// 一棵合成成功的子树：叶子数字，以及按执行顺序排列的步骤。
struct Branch {
    leaves: Vec<i64>,
    trace: Trace,
}

/// 为某个难度出题的生成器。
#[derive(Debug, Clone)]
pub struct Generator {
    difficulty: Difficulty,
    config: DifficultyConfig,
    max_attempts: usize,
}

impl Generator {
    pub fn new(difficulty: Difficulty) -> Self {
        Generator {
            difficulty,
            config: difficulty.config(),
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// 使用自定义配置。
    ///
    /// 合成失败时从 `difficulty` 的备用题库里挑选符合这份配置的题目，
    /// 因此要求至少有一条备用题在范围内、且只用配置里的运算符就能解出；
    /// 范围上限不能超过 [`MAX_NUMBER`]。
    pub fn with_config(difficulty: Difficulty, config: DifficultyConfig) -> Result<Self, ConfigError> {
        let config = DifficultyConfig::new(config.operators, config.number_range)?;
        if config.number_range.max > MAX_NUMBER {
            return Err(ConfigError::RangeTooWide {
                max: config.number_range.max,
                limit: MAX_NUMBER,
            });
        }
        if fallback_candidates(difficulty, &config).is_empty() {
            return Err(ConfigError::NoFallbackFits { difficulty });
        }
        Ok(Generator {
            difficulty,
            config,
            max_attempts: MAX_ATTEMPTS,
        })
    }

    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    /// 出一道题，总能返回结果。
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Puzzle {
        match self.synthesize(rng) {
            Ok(puzzle) => puzzle,
            Err(GenerateError::AttemptsExhausted { .. }) => {
                fallback_puzzle(self.difficulty, &self.config, rng)
            }
        }
    }

    /// 只做反向合成，不使用备用题库。
    pub fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Puzzle, GenerateError> {
        for attempt in 1..=self.max_attempts {
            let Some(branch) = self.node(TARGET, LEAF_COUNT - 1, rng) else {
                trace!("attempt {} for {}: no split reaches {}", attempt, self.difficulty, TARGET);
                continue;
            };
            let Ok(mut numbers) = <[i64; LEAF_COUNT]>::try_from(branch.leaves) else {
                continue;
            };
            if !numbers.iter().all(|&n| self.config.number_range.contains(n)) {
                continue;
            }

            numbers.shuffle(rng);
            debug!(
                "synthesized {:?} for {} after {} attempt(s)",
                numbers, self.difficulty, attempt
            );
            return Ok(Puzzle {
                numbers,
                optimal_move_count: branch.trace.len(),
                solution_trace: branch.trace,
                difficulty: self.difficulty,
                source: PuzzleSource::Synthesized,
            });
        }
        Err(GenerateError::AttemptsExhausted {
            attempts: self.max_attempts,
        })
    }

    /// 合成一个值为 `target`、内部还剩 `merges` 次合并的子树。
    fn node<R: Rng + ?Sized>(&self, target: i64, merges: usize, rng: &mut R) -> Option<Branch> {
        let range = self.config.number_range;
        if merges == 0 {
            return range.contains(target).then(|| Branch {
                leaves: vec![target],
                trace: Vec::new(),
            });
        }

        let mut operators: Vec<Operator> = self.config.operators.iter().collect();
        operators.shuffle(rng);

        for op in operators {
            let mut pairs = operand_pairs(target, op, range);
            pairs.shuffle(rng);

            for (a, b) in pairs {
                // 左子树分到 left 次合并，本节点自己占一次
                let mut splits: Vec<usize> = (0..merges).collect();
                splits.shuffle(rng);

                for left in splits {
                    let Some(lhs) = self.node(a, left, rng) else {
                        continue;
                    };
                    let Some(rhs) = self.node(b, merges - 1 - left, rng) else {
                        continue;
                    };

                    let mut leaves = lhs.leaves;
                    leaves.extend(rhs.leaves);
                    let mut trace = lhs.trace;
                    trace.extend(rhs.trace);
                    trace.push(ExpressionStep {
                        operator: op,
                        left: a,
                        right: b,
                        result: target,
                    });
                    return Some(Branch { leaves, trace });
                }
            }
        }
        None
    }
}

/// 用线程随机数源为 `difficulty` 出一道题。
pub fn generate_puzzle(difficulty: Difficulty) -> Puzzle {
    generate_puzzle_with_rng(difficulty, &mut rand::thread_rng())
}

pub fn generate_puzzle_with_rng<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Puzzle {
    Generator::new(difficulty).generate(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::OperatorSet;
    use crate::puzzle::replay;
    use crate::solver::{find_solutions_with, uses_only};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn range(min: i64, max: i64) -> NumberRange {
        NumberRange::new(min, max).unwrap()
    }

    #[test]
    fn addition_pairs() {
        assert_eq!(
            operand_pairs(10, Operator::Add, range(3, 7)),
            vec![(3, 7), (4, 6), (5, 5), (6, 4), (7, 3)]
        );
        assert!(operand_pairs(36, Operator::Add, range(1, 12)).is_empty());
    }

    #[test]
    fn subtraction_pairs() {
        assert_eq!(
            operand_pairs(4, Operator::Sub, range(1, 7)),
            vec![(5, 1), (6, 2), (7, 3)]
        );
    }

    #[test]
    fn multiplication_pairs_need_exact_quotient() {
        assert_eq!(
            operand_pairs(36, Operator::Mul, range(1, 15)),
            vec![(3, 12), (4, 9), (6, 6), (9, 4), (12, 3)]
        );
        assert!(operand_pairs(7, Operator::Mul, range(2, 6)).is_empty());
    }

    #[test]
    fn division_pairs_come_from_inverse() {
        assert_eq!(
            operand_pairs(4, Operator::Div, range(1, 20)),
            vec![(4, 1), (8, 2), (12, 3), (16, 4), (20, 5)]
        );
        assert!(operand_pairs(36, Operator::Div, range(1, 20)).is_empty());
    }

    #[test]
    fn synthesized_puzzles_hold_invariants() {
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            for seed in 0..20 {
                let mut rng = StdRng::seed_from_u64(seed);
                let puzzle = generate_puzzle_with_rng(difficulty, &mut rng);
                let config = difficulty.config();

                assert_eq!(puzzle.source, PuzzleSource::Synthesized);
                assert!(puzzle.numbers.iter().all(|&n| config.number_range.contains(n)));
                assert_eq!(puzzle.solution_trace.len(), 3);
                assert_eq!(puzzle.optimal_move_count, puzzle.solution_trace.len());
                assert_eq!(replay(&puzzle.numbers, &puzzle.solution_trace), Ok(TARGET));
                assert!(uses_only(&puzzle.solution_trace, config.operators));
                assert!(!find_solutions_with(puzzle.numbers, TARGET, config.operators).is_empty());
            }
        }
    }

    #[test]
    fn easy_always_falls_back() {
        // 12 + 12 < 36，1..=12 内根节点没有任何拆分
        let mut rng = StdRng::seed_from_u64(1);
        let generator = Generator::new(Difficulty::Easy);
        assert_eq!(
            generator.synthesize(&mut rng),
            Err(GenerateError::AttemptsExhausted { attempts: MAX_ATTEMPTS })
        );

        let puzzle = generator.generate(&mut rng);
        let operators = Difficulty::Easy.operators();
        assert_eq!(puzzle.source, PuzzleSource::Fallback);
        assert!(puzzle.solution_trace.is_empty());
        assert_eq!(puzzle.optimal_move_count, 3);
        assert!(puzzle.numbers.iter().all(|&n| (1..=12).contains(&n)));
        assert!(find_solutions_with(puzzle.numbers, TARGET, operators)
            .iter()
            .all(|trace| uses_only(trace, operators)));
        assert!(!find_solutions_with(puzzle.numbers, TARGET, operators).is_empty());
    }

    #[test]
    fn same_seed_same_puzzle() {
        for difficulty in Difficulty::ALL {
            let a = generate_puzzle_with_rng(difficulty, &mut StdRng::seed_from_u64(42));
            let b = generate_puzzle_with_rng(difficulty, &mut StdRng::seed_from_u64(42));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn unreachable_config_is_bounded() {
        let only_add = OperatorSet::empty().with(Operator::Add);
        let config = DifficultyConfig::new(only_add, range(1, 12)).unwrap();
        let generator = Generator::with_config(Difficulty::Easy, config).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        assert!(matches!(
            generator.synthesize(&mut rng),
            Err(GenerateError::AttemptsExhausted { attempts: 100 })
        ));
        for _ in 0..10 {
            let puzzle = generator.generate(&mut rng);
            assert_eq!(puzzle.source, PuzzleSource::Fallback);
            assert_eq!(puzzle.difficulty, Difficulty::Easy);
            assert!(puzzle.numbers.iter().all(|&n| config.number_range.contains(n)));
            assert!(!find_solutions_with(puzzle.numbers, TARGET, only_add).is_empty());
        }
    }

    #[test]
    fn custom_config_needs_a_fitting_fallback() {
        // 1..=5 内没有任何困难备用题
        let only_div = OperatorSet::empty().with(Operator::Div);
        let config = DifficultyConfig::new(only_div, range(1, 5)).unwrap();
        assert_eq!(
            Generator::with_config(Difficulty::Hard, config).unwrap_err(),
            ConfigError::NoFallbackFits {
                difficulty: Difficulty::Hard
            }
        );
    }

    #[test]
    fn custom_range_is_capped() {
        let config = DifficultyConfig::new(OperatorSet::all(), range(1, i64::MAX)).unwrap();
        assert_eq!(
            Generator::with_config(Difficulty::Hard, config).unwrap_err(),
            ConfigError::RangeTooWide {
                max: i64::MAX,
                limit: MAX_NUMBER
            }
        );

        let widest = DifficultyConfig::new(OperatorSet::all(), range(1, MAX_NUMBER)).unwrap();
        let generator = Generator::with_config(Difficulty::Hard, widest).unwrap();
        let puzzle = generator.generate(&mut StdRng::seed_from_u64(3));
        assert!(puzzle.numbers.iter().all(|&n| (1..=MAX_NUMBER).contains(&n)));
        assert_eq!(replay(&puzzle.numbers, &puzzle.solution_trace), Ok(TARGET));
    }

    #[test]
    fn pair_enumeration_stops_past_max() {
        // 目标很大时减法和除法的候选直接为空
        assert!(operand_pairs(990, Operator::Sub, range(1, MAX_NUMBER))
            .iter()
            .all(|&(a, b)| a - b == 990 && a <= MAX_NUMBER));
        assert!(operand_pairs(500, Operator::Div, range(1, MAX_NUMBER)).contains(&(500, 1)));
        assert_eq!(operand_pairs(500, Operator::Div, range(1, MAX_NUMBER)).len(), 1);
        assert!(operand_pairs(i64::MAX, Operator::Sub, range(1, 10)).is_empty());
    }

    #[test]
    fn custom_attempt_bound() {
        let generator = Generator::new(Difficulty::Easy).max_attempts(3);
        assert_eq!(
            generator.synthesize(&mut StdRng::seed_from_u64(0)),
            Err(GenerateError::AttemptsExhausted { attempts: 3 })
        );
    }

    #[test]
    fn rejects_invalid_custom_config() {
        let config = DifficultyConfig {
            operators: OperatorSet::empty(),
            number_range: NumberRange { min: 1, max: 9 },
        };
        assert_eq!(
            Generator::with_config(Difficulty::Medium, config).unwrap_err(),
            ConfigError::EmptyOperators
        );
    }

    #[test]
    fn thread_rng_entry_point() {
        let puzzle = generate_puzzle(Difficulty::Hard);
        assert!(puzzle.numbers.iter().all(|&n| (1..=20).contains(&n)));
    }
}
