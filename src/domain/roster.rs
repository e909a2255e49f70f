// ==========================================
// 救援站勤务排班系统 - 排班条目 (Roster Entry)
// ==========================================
// 每个 (人员, 日期) 至多一条记录 —— upsert 键。
// value 承载值班代码 (如 "FD")，entry_type 承载
// 输入方式标记或班位标签，两者独立更新：
// - 班位写入只改 entry_type，保留 value
// - 值班代码写入只改 value，保留 entry_type
// ==========================================

use crate::domain::slot::SlotTag;
use crate::domain::types::{EvaluationMode, PersonKind};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 输入方式标记: 自由文本
pub const ENTRY_TYPE_TEXT: &str = "text";

/// 输入方式标记: 下拉选择
pub const ENTRY_TYPE_DROPDOWN: &str = "dropdown";

// ==========================================
// PersonRef - 人员身份引用
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: i64,
    pub kind: PersonKind,
}

impl PersonRef {
    pub fn person(id: i64) -> Self {
        Self {
            id,
            kind: PersonKind::Person,
        }
    }

    pub fn apprentice(id: i64) -> Self {
        Self {
            id,
            kind: PersonKind::Apprentice,
        }
    }
}

// ==========================================
// RosterEntry - 排班条目
// ==========================================
// 对齐: duty_roster 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub person_id: i64,
    pub person_kind: PersonKind,
    pub date: NaiveDate,

    /// 值班代码（自由文本或枚举代码，空串表示无）
    pub value: String,

    /// 输入方式标记 (text/dropdown) 或班位标签（原始字符串存储，
    /// 班位语义通过 SlotTag::parse 在边界解析）
    pub entry_type: String,
}

impl RosterEntry {
    pub fn person_ref(&self) -> PersonRef {
        PersonRef {
            id: self.person_id,
            kind: self.person_kind,
        }
    }

    /// 解析 entry_type 为班位标签（非班位返回 None）
    pub fn slot_tag(&self) -> Option<SlotTag> {
        SlotTag::parse(&self.entry_type)
    }

    /// 查询该条目值班代码的统计口径
    ///
    /// 空代码或未配置代码一律 off。
    pub fn evaluation_mode(&self, modes: &HashMap<String, EvaluationMode>) -> EvaluationMode {
        if self.value.is_empty() {
            return EvaluationMode::Off;
        }
        modes.get(&self.value).copied().unwrap_or(EvaluationMode::Off)
    }

    /// 条目所在月份下标 (0 = 一月)
    pub fn month0(&self) -> usize {
        self.date.month0() as usize
    }
}
