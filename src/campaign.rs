//! 闯关模式的固定关卡。
//!
//! 关卡数字不受难度数字范围的限制（例如 `[144, 4, 1, 1]`），
//! 但都只用该难度允许的运算符就能得到 36。

use serde::Serialize;

use crate::difficulty::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignLevel {
    pub level: usize,
    pub numbers: [i64; 4],
    pub optimal_move_count: usize,
}

const fn lv(level: usize, numbers: [i64; 4]) -> CampaignLevel {
    CampaignLevel {
        level,
        numbers,
        optimal_move_count: 3,
    }
}

static EASY: [CampaignLevel; 20] = [
    lv(1, [9, 9, 9, 9]),
    lv(2, [6, 6, 12, 12]),
    lv(3, [10, 10, 8, 8]),
    lv(4, [15, 15, 3, 3]),
    lv(5, [18, 12, 4, 2]),
    lv(6, [20, 10, 5, 1]),
    lv(7, [7, 7, 11, 11]),
    lv(8, [5, 5, 13, 13]),
    lv(9, [14, 14, 4, 4]),
    lv(10, [16, 16, 2, 2]),
    lv(11, [20, 20, 2, 2]),
    lv(12, [25, 15, 3, 1]),
    lv(13, [30, 10, 2, 2]),
    lv(14, [24, 18, 3, 3]),
    lv(15, [40, 4, 5, 3]),
    lv(16, [50, 10, 2, 2]),
    lv(17, [45, 5, 2, 2]),
    lv(18, [22, 22, 4, 4]),
    lv(19, [35, 5, 2, 2]),
    lv(20, [100, 60, 2, 2]),
];

static MEDIUM: [CampaignLevel; 20] = [
    lv(1, [2, 3, 4, 6]),
    lv(2, [6, 6, 1, 1]),
    lv(3, [4, 9, 1, 1]),
    lv(4, [3, 12, 1, 1]),
    lv(5, [2, 18, 1, 1]),
    lv(6, [2, 2, 9, 1]),
    lv(7, [3, 3, 4, 1]),
    lv(8, [2, 3, 6, 1]),
    lv(9, [4, 5, 2, 2]),
    lv(10, [5, 7, 1, 1]),
    lv(11, [8, 4, 2, 2]),
    lv(12, [7, 5, 2, 1]),
    lv(13, [5, 6, 3, 3]),
    lv(14, [10, 4, 2, 2]),
    lv(15, [9, 3, 6, 3]),
    lv(16, [8, 5, 2, 2]),
    lv(17, [11, 3, 2, 1]),
    lv(18, [6, 5, 3, 3]),
    lv(19, [4, 8, 2, 2]),
    lv(20, [7, 4, 5, 3]),
];

static HARD: [CampaignLevel; 15] = [
    lv(1, [72, 2, 1, 1]),
    lv(2, [108, 3, 1, 1]),
    lv(3, [144, 4, 1, 1]),
    lv(4, [8, 2, 9, 1]),
    lv(5, [12, 3, 9, 1]),
    lv(6, [3, 4, 6, 8]),
    lv(7, [2, 4, 6, 8]),
    lv(8, [12, 3, 9, 9]),
    lv(9, [2, 3, 6, 7]),
    lv(10, [1, 4, 5, 8]),
    lv(11, [3, 4, 5, 6]),
    lv(12, [1, 2, 4, 9]),
    lv(13, [2, 6, 8, 9]),
    lv(14, [2, 4, 6, 9]),
    lv(15, [1, 3, 4, 12]),
];

pub fn levels(difficulty: Difficulty) -> &'static [CampaignLevel] {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

/// 按 1 起始的关卡号查找。
pub fn level(difficulty: Difficulty, number: usize) -> Option<&'static CampaignLevel> {
    levels(difficulty).iter().find(|l| l.level == number)
}

pub fn total_levels(difficulty: Difficulty) -> usize {
    levels(difficulty).len()
}

/// 通关 `number` 之后的下一关：同一难度的下一关，或下一难度的第 1 关。
/// 最后一关之后返回 `None`。
pub fn next_level(difficulty: Difficulty, number: usize) -> Option<(Difficulty, usize)> {
    if number < total_levels(difficulty) {
        return Some((difficulty, number + 1));
    }
    difficulty.next().map(|next| (next, 1))
}

/// 上一难度完成的关卡数是否达到解锁条件。
pub fn is_unlocked(difficulty: Difficulty, completed_in_previous: usize) -> bool {
    completed_in_previous >= difficulty.unlock_requirement()
}
