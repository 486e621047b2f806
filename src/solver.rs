//! # 正向穷举求解
//!
//! 给定 4 个数字和目标值，找出所有"每次取两个数合并成一个"、
//! 三步之后恰好剩下目标值的步骤序列。
//!
//! ## 完整性与正确性
//! - **完整性**：每一层都尝试所有未被消耗的两两组合 C(n,2)，
//!   对每个组合尝试全部运算符；`-` 与 `/` 不满足交换律，两种操作数顺序都会计算。
//!   搜索不会提前结束，因此任何合法的步骤序列都会被枚举到。
//! - **正确性**：除法只接受除数非零且整除的情况；
//!   中间结果必须为正数（卡牌上不会出现 0 或负数），不满足的分支直接剪掉。
//!   同一条步骤序列可能从不同的槽位顺序得到，结果中只保留一次。

use std::collections::HashSet;

use crate::operator::{Operator, OperatorSet};
use crate::puzzle::{ExpressionStep, Trace};

const SLOTS: usize = 4;

/// 搜索过程中的状态：固定 4 个槽位，加一个"已消耗"位掩码。
///
/// 合并槽位 `i` 和 `j` 时，结果写回 `i`，`j` 标记为已消耗；
/// 回溯时恢复这两个字段即可，不需要复制数组。
struct SearchState {
    slots: [i64; SLOTS],
    consumed: u8,
    steps: Trace,
}

impl SearchState {
    fn new(numbers: [i64; SLOTS]) -> Self {
        SearchState {
            slots: numbers,
            consumed: 0,
            steps: Vec::with_capacity(SLOTS - 1),
        }
    }

    fn is_live(&self, slot: usize) -> bool {
        self.consumed & (1 << slot) == 0
    }

    fn live_count(&self) -> usize {
        SLOTS - self.consumed.count_ones() as usize
    }

    fn last_value(&self) -> Option<i64> {
        (0..SLOTS).find(|&slot| self.is_live(slot)).map(|slot| self.slots[slot])
    }
}

struct Collector {
    target: i64,
    operators: OperatorSet,
    seen: HashSet<Trace>,
    solutions: Vec<Trace>,
}

impl Collector {
    fn search(&mut self, state: &mut SearchState) {
        if state.live_count() == 1 {
            if state.last_value() == Some(self.target) && self.seen.insert(state.steps.clone()) {
                self.solutions.push(state.steps.clone());
            }
            return;
        }

        for i in 0..SLOTS {
            if !state.is_live(i) {
                continue;
            }
            for j in (i + 1)..SLOTS {
                if !state.is_live(j) {
                    continue;
                }
                let (a, b) = (state.slots[i], state.slots[j]);
                for step in candidate_steps(a, b, self.operators) {
                    if step.result <= 0 {
                        continue;
                    }
                    state.slots[i] = step.result;
                    state.consumed |= 1 << j;
                    state.steps.push(step);

                    self.search(state);

                    state.steps.pop();
                    state.consumed &= !(1 << j);
                    state.slots[i] = a;
                }
            }
        }
    }
}

/// 对一对数字 `(a, b)` 列出所有候选步骤。
///
/// 不满足交换律的运算会额外给出 `b op a`；
/// 非整除或除以零的除法不会出现在结果里，但负数和零会保留，
/// 由调用方决定是否剪枝。
pub fn candidate_steps(a: i64, b: i64, operators: OperatorSet) -> Vec<ExpressionStep> {
    let mut steps = Vec::with_capacity(operators.len() * 2);
    for op in operators.iter() {
        steps.extend(ExpressionStep::evaluate(op, a, b));
        if !op.is_commutative() {
            steps.extend(ExpressionStep::evaluate(op, b, a));
        }
    }
    steps
}

/// 用全部四种运算符，找出把 `numbers` 化为 `target` 的所有步骤序列。
pub fn find_solutions(numbers: [i64; 4], target: i64) -> Vec<Trace> {
    find_solutions_with(numbers, target, OperatorSet::all())
}

/// 与 [`find_solutions`] 相同，但只允许使用 `operators` 中的运算。
pub fn find_solutions_with(numbers: [i64; 4], target: i64, operators: OperatorSet) -> Vec<Trace> {
    let mut collector = Collector {
        target,
        operators,
        seen: HashSet::new(),
        solutions: Vec::new(),
    };
    collector.search(&mut SearchState::new(numbers));
    collector.solutions
}

pub fn is_solvable(numbers: [i64; 4], target: i64, operators: OperatorSet) -> bool {
    !find_solutions_with(numbers, target, operators).is_empty()
}

/// 最短解的步数；无解时为 `None`。
pub fn minimum_moves(numbers: [i64; 4], target: i64, operators: OperatorSet) -> Option<usize> {
    find_solutions_with(numbers, target, operators)
        .iter()
        .map(|trace| trace.len())
        .min()
}

/// 判断一条步骤序列是否只用到了 `operators` 中的运算。
pub fn uses_only(trace: &[ExpressionStep], operators: OperatorSet) -> bool {
    trace.iter().all(|step| operators.contains(step.operator))
}
