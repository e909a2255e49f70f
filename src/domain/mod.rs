// ==========================================
// 救援站勤务排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、班位文法
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod holiday;
pub mod pattern;
pub mod roster;
pub mod slot;
pub mod staff;
pub mod stats;
pub mod types;
pub mod vehicle;

// 重导出核心类型
pub use holiday::Holiday;
pub use pattern::{PatternSequence, ITW_CATEGORY, PATTERN_LENGTH};
pub use roster::{PersonRef, RosterEntry, ENTRY_TYPE_DROPDOWN, ENTRY_TYPE_TEXT};
pub use slot::{SlotTag, DRIVER_POSITION, MASCHINIST_POSITION};
pub use staff::{Apprentice, Personnel, ShiftType};
pub use stats::{DutyDay, MonthlySeries, PersonMonthly};
pub use types::{BreakdownFilter, EvaluationMode, PatternScope, PersonKind, ShiftHalf, VehicleKind};
pub use vehicle::{Vehicle, VehicleActivation};
