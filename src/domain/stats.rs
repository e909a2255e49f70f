// ==========================================
// 救援站勤务排班系统 - 统计结果模型
// ==========================================
// 所有月度序列固定 12 个元素，下标 0 = 一月。
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DutyDay - 值勤日
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyDay {
    /// 当月日号 (1..=31)
    pub day: u32,

    /// 星期（chrono 短名, 如 "Mon"）
    pub weekday: String,
}

// ==========================================
// MonthlySeries - 月度统计序列
// ==========================================
// 各序列相互独立，由聚合引擎的多个只读遍历分别产出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    /// 部门值勤日数（纯班制推导，与排班条目无关）
    pub department_shifts: [u32; 12],

    /// 毛需求岗位数 = 值勤日 × (RTW×4 + NEF×2) + ITW 班数
    pub positions_gross: [u32; 12],

    /// 净需求岗位数 = max(0, 毛需求 - 学员机械师班数)
    pub positions_net: [u32; 12],

    /// 当月活跃正式人员数（至少一条口径 ≠ off 的条目）
    pub active_personnel: [u32; 12],

    /// 学员机械师班数
    pub apprentice_operator_shifts: [u32; 12],

    /// ITW 班数
    pub itw_shifts: [u32; 12],

    /// 人均综合负荷（24h 当量 + ITW，仅统计当月 > 0 者，四舍五入取整）
    pub avg_combined_load: [u32; 12],

    /// 人均班数 = 净岗位 / 活跃人员（保留 2 位小数，无人员时为 0）
    pub shifts_per_person: [f64; 12],
}

impl Default for MonthlySeries {
    fn default() -> Self {
        Self {
            department_shifts: [0; 12],
            positions_gross: [0; 12],
            positions_net: [0; 12],
            active_personnel: [0; 12],
            apprentice_operator_shifts: [0; 12],
            itw_shifts: [0; 12],
            avg_combined_load: [0; 12],
            shifts_per_person: [0.0; 12],
        }
    }
}

// ==========================================
// PersonMonthly - 人员月度统计行
// ==========================================
// 每个配置的实体都出现（全零行不省略），顺序为实体表的
// 规范顺序（sort_key）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonMonthly {
    pub entity_id: i64,
    pub name: String,
    pub counts: [u32; 12],
}

impl PersonMonthly {
    pub fn zero(entity_id: i64, name: String) -> Self {
        Self {
            entity_id,
            name,
            counts: [0; 12],
        }
    }

    /// 全年合计
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}
