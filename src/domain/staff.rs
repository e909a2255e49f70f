// ==========================================
// 救援站勤务排班系统 - 人员领域模型
// ==========================================
// 人员/学员/值班类型为核心计算的只读输入，
// 增删改由外围 CRUD 层负责。
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Personnel - 正式人员
// ==========================================
// 对齐: personnel 表
// 能力标记决定可占用的班位（司机位/NEF 位）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personnel {
    pub id: i64,
    pub name: String,

    /// 稳定排序键（显示顺序与统计行顺序）
    pub sort_key: i64,

    /// 是否可驾驶（司机班位门槛）
    pub can_drive: bool,

    /// 是否具备 NEF 资质（nef_assist 班位门槛）
    pub nef_qualified: bool,

    /// 是否在岗
    pub active: bool,
}

// ==========================================
// Apprentice - 学员
// ==========================================
// 对齐: apprentices 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apprentice {
    pub id: i64,
    pub name: String,
    pub sort_key: i64,

    /// 学年（可选，仅显示用）
    pub training_year: Option<i32>,
}

// ==========================================
// ShiftType - 值班类型
// ==========================================
// 对齐: shift_types 表
// 统计口径单独存储（shift_evaluation 表），按代码关联
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftType {
    pub code: String,
    pub description: String,
}
