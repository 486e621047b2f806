//! 库对外暴露的错误类型。
//!
//! 搜索内部的失败（某个目标值没有合法的拆分、除法不整除等）不会出现在这里，
//! 它们在递归中以 `None` 或剪枝的形式被消化掉。

use thiserror::Error;

/// 难度配置不满足前置条件。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("operator set is empty")]
    EmptyOperators,
    #[error("number range must be positive, got min = {min}")]
    NonPositiveRange { min: i64 },
    #[error("number range is inverted: min = {min} > max = {max}")]
    InvertedRange { min: i64, max: i64 },
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),
    #[error("number range max {max} exceeds the generator limit {limit}")]
    RangeTooWide { max: i64, limit: i64 },
    #[error("no {difficulty} fallback puzzle fits the custom configuration")]
    NoFallbackFits { difficulty: crate::Difficulty },
}

/// 反向合成在限定次数内没有成功。
///
/// 只有 [`Generator::synthesize`](crate::Generator::synthesize) 会返回它，
/// [`Generator::generate`](crate::Generator::generate) 会改用备用题库。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("synthesis failed after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
}

/// 按顺序重放解题步骤时出现的问题。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("step {step}: operand {operand} is not available")]
    MissingOperand { step: usize, operand: i64 },
    #[error("step {step}: {left} {operator} {right} does not give {claimed}")]
    WrongResult {
        step: usize,
        operator: char,
        left: i64,
        right: i64,
        claimed: i64,
    },
    #[error("trace leaves {remaining} numbers instead of one")]
    Unfinished { remaining: usize },
}
