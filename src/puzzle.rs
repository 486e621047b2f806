//! 题目与解题步骤。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::TraceError;
use crate::operator::Operator;

/// 一次二元合并：`left operator right = result`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionStep {
    pub operator: Operator,
    pub left: i64,
    pub right: i64,
    pub result: i64,
}

impl ExpressionStep {
    /// 计算并构造一步，运算非法时返回 `None`。
    pub fn evaluate(operator: Operator, left: i64, right: i64) -> Option<Self> {
        operator.apply(left, right).map(|result| ExpressionStep {
            operator,
            left,
            right,
            result,
        })
    }
}

impl fmt::Display for ExpressionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = {}", self.left, self.operator, self.right, self.result)
    }
}

/// 按顺序执行的若干步；4 个数字对应 3 步。
pub type Trace = Vec<ExpressionStep>;

/// 把一串步骤格式化成 `8 / 2 = 4, 4 * 9 = 36, 36 * 1 = 36`。
pub fn format_trace(trace: &[ExpressionStep]) -> String {
    trace
        .iter()
        .map(|step| step.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 题目的来源：反向合成，或合成失败后取自备用题库。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleSource {
    Synthesized,
    Fallback,
}

/// 一道生成好的题目。返回后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub numbers: [i64; 4],
    /// 备用题目的步骤为空。
    pub solution_trace: Trace,
    pub optimal_move_count: usize,
    pub difficulty: Difficulty,
    pub source: PuzzleSource,
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} [{}, {} moves, {:?}]",
            self.numbers, self.difficulty, self.optimal_move_count, self.source
        )
    }
}

/// 把 `trace` 依次作用在 `numbers` 这个多重集合上，返回最后剩下的那个数。
///
/// 每一步都要求两个操作数当前可用（同值的数字各只能用一次），
/// 并且 `left operator right` 确实等于记录的 `result`；
/// 计算结果放回集合，供后续步骤使用。
pub fn replay(numbers: &[i64], trace: &[ExpressionStep]) -> Result<i64, TraceError> {
    let mut pool = numbers.to_vec();
    for (index, step) in trace.iter().enumerate() {
        let computed = step.operator.apply(step.left, step.right);
        if computed != Some(step.result) {
            return Err(TraceError::WrongResult {
                step: index,
                operator: step.operator.symbol(),
                left: step.left,
                right: step.right,
                claimed: step.result,
            });
        }
        take(&mut pool, step.left, index)?;
        take(&mut pool, step.right, index)?;
        pool.push(step.result);
    }
    match pool.as_slice() {
        [last] => Ok(*last),
        rest => Err(TraceError::Unfinished {
            remaining: rest.len(),
        }),
    }
}

fn take(pool: &mut Vec<i64>, operand: i64, step: usize) -> Result<(), TraceError> {
    let position = pool
        .iter()
        .position(|&n| n == operand)
        .ok_or(TraceError::MissingOperand { step, operand })?;
    pool.swap_remove(position);
    Ok(())
}
