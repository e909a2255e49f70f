// ==========================================
// 救援站勤务排班系统 - 领域类型定义
// ==========================================
// 序列化格式: 小写字符串 (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 人员类别 (Person Kind)
// ==========================================
// 排班条目的身份键由 (person_id, person_kind) 组成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    Person,     // 正式人员
    Apprentice, // 学员
}

impl fmt::Display for PersonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonKind::Person => write!(f, "person"),
            PersonKind::Apprentice => write!(f, "apprentice"),
        }
    }
}

impl PersonKind {
    /// 从字符串解析人员类别
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "apprentice" => PersonKind::Apprentice,
            _ => PersonKind::Person, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PersonKind::Person => "person",
            PersonKind::Apprentice => "apprentice",
        }
    }
}

// ==========================================
// 统计口径 (Evaluation Mode)
// ==========================================
// 每个值班代码一个口径，控制该代码是否/如何计入统计
// 未配置的代码一律视为 off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    Off,   // 不计入统计
    Tag,   // 白班
    Nacht, // 夜班
    #[serde(rename = "24h")]
    H24,   // 24小时班 (同时覆盖白班与夜班班位)
    Itw,   // 重症转运班 (无白夜区分)
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl EvaluationMode {
    /// 从字符串解析统计口径（未知值一律 off）
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "tag" => EvaluationMode::Tag,
            "nacht" => EvaluationMode::Nacht,
            "24h" => EvaluationMode::H24,
            "itw" => EvaluationMode::Itw,
            _ => EvaluationMode::Off, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EvaluationMode::Off => "off",
            EvaluationMode::Tag => "tag",
            EvaluationMode::Nacht => "nacht",
            EvaluationMode::H24 => "24h",
            EvaluationMode::Itw => "itw",
        }
    }
}

// ==========================================
// 班次时段 (Shift Half)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftHalf {
    Tag,   // 白班
    Nacht, // 夜班
}

impl fmt::Display for ShiftHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftHalf::Tag => write!(f, "tag"),
            ShiftHalf::Nacht => write!(f, "nacht"),
        }
    }
}

// ==========================================
// 车辆类别 (Vehicle Kind)
// ==========================================
// RTW: 救护车 (每值勤日 4 个岗位)
// NEF: 急救指挥车 (每值勤日 2 个岗位)
// ITW: 重症转运车 (岗位由排班条目直接产生)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Rtw,
    Nef,
    Itw,
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleKind::Rtw => write!(f, "rtw"),
            VehicleKind::Nef => write!(f, "nef"),
            VehicleKind::Itw => write!(f, "itw"),
        }
    }
}

impl VehicleKind {
    /// 从字符串解析车辆类别
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rtw" => Some(VehicleKind::Rtw),
            "nef" => Some(VehicleKind::Nef),
            "itw" => Some(VehicleKind::Itw),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            VehicleKind::Rtw => "rtw",
            VehicleKind::Nef => "nef",
            VehicleKind::Itw => "itw",
        }
    }
}

// ==========================================
// 班制范围 (Pattern Scope)
// ==========================================
// 部门班制与 ITW 班制各自维护独立的序列集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternScope {
    #[serde(rename = "dept")]
    Department,
    Itw,
}

impl fmt::Display for PatternScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl PatternScope {
    /// 从字符串解析班制范围
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dept" => Some(PatternScope::Department),
            "itw" => Some(PatternScope::Itw),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PatternScope::Department => "dept",
            PatternScope::Itw => "itw",
        }
    }
}

// ==========================================
// 人员统计过滤器 (Breakdown Filter)
// ==========================================
// 同一份排班条目按三种口径分别重聚合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownFilter {
    /// 24小时当量班 (正式人员, value 口径 = 24h)
    H24,
    /// ITW 班 (正式人员, ITW 班位或 value 口径 = itw)
    Itw,
    /// 学员机械师班位 (学员, 车辆机械师岗位)
    ApprenticeOperator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_mode_roundtrip() {
        for mode in [
            EvaluationMode::Off,
            EvaluationMode::Tag,
            EvaluationMode::Nacht,
            EvaluationMode::H24,
            EvaluationMode::Itw,
        ] {
            assert_eq!(EvaluationMode::from_str(mode.to_db_str()), mode);
        }
    }

    #[test]
    fn test_evaluation_mode_unknown_is_off() {
        assert_eq!(EvaluationMode::from_str("unbekannt"), EvaluationMode::Off);
        assert_eq!(EvaluationMode::from_str(""), EvaluationMode::Off);
    }

    #[test]
    fn test_person_kind_parse() {
        assert_eq!(PersonKind::from_str("apprentice"), PersonKind::Apprentice);
        assert_eq!(PersonKind::from_str("person"), PersonKind::Person);
        assert_eq!(PersonKind::from_str("PERSON"), PersonKind::Person);
    }
}
