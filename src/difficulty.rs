//! 难度分级：每一级绑定一组运算符和一个数字范围。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::operator::{Operator, OperatorSet};

/// 闭区间 `[min, max]`，题目中的数字以及反向合成时的中间值都必须落在其中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: i64,
    pub max: i64,
}

impl NumberRange {
    pub fn new(min: i64, max: i64) -> Result<Self, ConfigError> {
        if min < 1 {
            return Err(ConfigError::NonPositiveRange { min });
        }
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(NumberRange { min, max })
    }

    pub fn contains(&self, n: i64) -> bool {
        self.min <= n && n <= self.max
    }
}

impl fmt::Display for NumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// 生成器读取、但从不修改的配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub operators: OperatorSet,
    pub number_range: NumberRange,
}

impl DifficultyConfig {
    /// 构造自定义配置，并检查运算符集合非空、范围为正且不颠倒。
    pub fn new(operators: OperatorSet, number_range: NumberRange) -> Result<Self, ConfigError> {
        if operators.is_empty() {
            return Err(ConfigError::EmptyOperators);
        }
        let number_range = NumberRange::new(number_range.min, number_range.max)?;
        Ok(DifficultyConfig {
            operators,
            number_range,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 内置的三档配置。高一档的运算符集合总是包含低一档的。
    pub fn config(self) -> DifficultyConfig {
        static EASY: [Operator; 2] = [Operator::Add, Operator::Sub];
        static MEDIUM: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];

        let (operators, min, max): (&[Operator], i64, i64) = match self {
            Difficulty::Easy => (&EASY, 1, 12),
            Difficulty::Medium => (&MEDIUM, 1, 15),
            Difficulty::Hard => (&Operator::ALL, 1, 20),
        };
        DifficultyConfig {
            operators: operators.iter().copied().collect(),
            number_range: NumberRange { min, max },
        }
    }

    pub fn operators(self) -> OperatorSet {
        self.config().operators
    }

    pub fn number_range(self) -> NumberRange {
        self.config().number_range
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// 解锁这一档需要在上一档完成的关卡数。
    pub fn unlock_requirement(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium | Difficulty::Hard => 16,
        }
    }

    pub fn previous(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(Difficulty::Easy),
            Difficulty::Hard => Some(Difficulty::Medium),
        }
    }

    pub fn next(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(tag)
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}
