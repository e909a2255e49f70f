// ==========================================
// 救援站勤务排班系统 - 班制序列 (Pattern Sequence)
// ==========================================
// 班制序列是带生效日期的固定长度循环数组：
// 从 start_date 起，每个日期偏移对应一个类别码
// （部门编号或 ITW 标记），按序列长度循环。
// 同一范围内可存在多条序列，按 start_date 版本化。
// ==========================================

use crate::domain::types::PatternScope;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 班制序列固定长度（21 天循环）
pub const PATTERN_LENGTH: usize = 21;

/// ITW 班制序列的规范类别码
pub const ITW_CATEGORY: &str = "ITW";

// ==========================================
// PatternSequence - 班制序列
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSequence {
    /// 生效日期（当日起生效）
    pub start_date: NaiveDate,

    /// 循环数组（固定长度 21，空槽允许）
    pub pattern: Vec<String>,
}

impl PatternSequence {
    /// 创建并归一化班制序列
    ///
    /// 长度不足 21 补空槽，超出截断；非法类别码一律置空。
    /// 宽容处理，绝不因配置脏数据报错。
    pub fn new(start_date: NaiveDate, cells: Vec<String>, scope: PatternScope) -> Self {
        Self {
            start_date,
            pattern: Self::normalize_cells(cells, scope),
        }
    }

    /// 归一化单元格列表（截断/补空 + 类别码校验）
    pub fn normalize_cells(cells: Vec<String>, scope: PatternScope) -> Vec<String> {
        let mut normalized: Vec<String> = cells
            .into_iter()
            .take(PATTERN_LENGTH)
            .map(|cell| normalize_cell(&cell, scope))
            .collect();
        normalized.resize(PATTERN_LENGTH, String::new());
        normalized
    }

    /// 序列是否全空
    pub fn is_blank(&self) -> bool {
        self.pattern.iter().all(|cell| cell.is_empty())
    }
}

/// 归一化单个类别码
///
/// - 部门班制: 1~2 位纯数字（部门编号），其余置空
/// - ITW 班制: 统一归一化为 "ITW"，其余置空
fn normalize_cell(cell: &str, scope: PatternScope) -> String {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match scope {
        PatternScope::Department => {
            if trimmed.len() <= 2 && trimmed.chars().all(|c| c.is_ascii_digit()) {
                trimmed.to_string()
            } else {
                String::new()
            }
        }
        PatternScope::Itw => {
            if trimmed.eq_ignore_ascii_case(ITW_CATEGORY) {
                ITW_CATEGORY.to_string()
            } else {
                String::new()
            }
        }
    }
}
