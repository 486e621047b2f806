//! 四则运算符与运算符集合。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 游戏中允许的二元运算。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    /// 规范顺序：`+ - * /`。
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// `-` 与 `/` 交换操作数后结果不同，搜索时两种顺序都要尝试。
    pub fn is_commutative(self) -> bool {
        matches!(self, Operator::Add | Operator::Mul)
    }

    /// 计算 `left op right`，非法运算返回 `None`。
    ///
    /// - 加、减、乘只在溢出时失败；
    /// - 除法要求除数非零且能整除，不做取整。
    pub fn apply(self, left: i64, right: i64) -> Option<i64> {
        match self {
            Operator::Add => left.checked_add(right),
            Operator::Sub => left.checked_sub(right),
            Operator::Mul => left.checked_mul(right),
            Operator::Div if right != 0 && left.checked_rem(right) == Some(0) => {
                left.checked_div(right)
            }
            Operator::Div => None,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" | "x" | "×" => Ok(Operator::Mul),
            "/" | "÷" => Ok(Operator::Div),
            other => Err(ConfigError::UnknownOperator(other.to_string())),
        }
    }
}

/// 运算符集合，用位掩码保存，遍历时总是按 `+ - * /` 的顺序。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OperatorSet(u8);

impl OperatorSet {
    pub const fn empty() -> Self {
        OperatorSet(0)
    }

    pub fn all() -> Self {
        Operator::ALL.into_iter().collect()
    }

    pub fn with(mut self, op: Operator) -> Self {
        self.insert(op);
        self
    }

    pub fn insert(&mut self, op: Operator) {
        self.0 |= op.bit();
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.0 & op.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_subset(&self, other: &OperatorSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Operator> + '_ {
        Operator::ALL.into_iter().filter(move |op| self.contains(*op))
    }
}

impl FromIterator<Operator> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
        let mut set = OperatorSet::empty();
        for op in iter {
            set.insert(op);
        }
        set
    }
}

impl fmt::Display for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<String> = self.iter().map(|op| op.to_string()).collect();
        write!(f, "{{{}}}", symbols.join(", "))
    }
}
