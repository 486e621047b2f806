//! # 36 点游戏核心
//!
//! 给出 4 个整数，每次选两个数用 `+ - * /` 合并成一个，三步之后恰好得到 36。
//!
//! 这个库只包含两部分算法：
//! - [`generator`]：从 36 出发反向合成一道保证有解的题目，失败时退回备用题库；
//! - [`solver`]：对任意 4 个数字正向穷举，列出所有能得到目标值的步骤序列。
//!
//! 两者都是纯计算，没有 I/O，也不共享可变状态；唯一的不确定性来自调用方传入的随机数源。

pub mod campaign;
pub mod difficulty;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod operator;
pub mod puzzle;
pub mod solver;

/// 所有题目的目标值。
pub const TARGET: i64 = 36;

/// 每道题的数字个数；合并次数为 `LEAF_COUNT - 1`。
pub const LEAF_COUNT: usize = 4;

pub use difficulty::{Difficulty, DifficultyConfig, NumberRange};
pub use error::{ConfigError, GenerateError, TraceError};
pub use generator::{generate_puzzle, generate_puzzle_with_rng, Generator, MAX_ATTEMPTS, MAX_NUMBER};
pub use operator::{Operator, OperatorSet};
pub use puzzle::{format_trace, replay, ExpressionStep, Puzzle, PuzzleSource, Trace};
pub use solver::{find_solutions, find_solutions_with, is_solvable, minimum_moves};
