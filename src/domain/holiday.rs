// ==========================================
// 救援站勤务排班系统 - 节假日
// ==========================================
// 对齐: holidays 表（日历标注，纯 CRUD）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}
