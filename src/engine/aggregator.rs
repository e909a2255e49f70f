// ==========================================
// 救援站勤务排班系统 - 月度统计聚合引擎
// ==========================================
// 职责: 由全年排班条目 + 配置快照产出各月度序列
// ==========================================
// 口径约定:
// - 各序列由相互独立的只读遍历产出，遍历顺序无关
// - 所有除零情形输出 0，绝不 panic / NaN
// - 计数一律非负整数，比率按约定精度舍入
// ==========================================

use crate::domain::pattern::PatternSequence;
use crate::domain::roster::RosterEntry;
use crate::domain::staff::{Apprentice, Personnel};
use crate::domain::stats::MonthlySeries;
use crate::domain::types::{EvaluationMode, PersonKind};
use crate::domain::vehicle::{Vehicle, VehicleActivation};
use crate::engine::breakdown::BreakdownEngine;
use crate::engine::duty_days::DutyDayCalculator;
use chrono::Datelike;
use std::collections::{HashMap, HashSet};
use tracing::instrument;

/// RTW 每值勤日岗位权重
pub const RTW_POSITIONS_PER_DUTY_DAY: u32 = 4;

/// NEF 每值勤日岗位权重
pub const NEF_POSITIONS_PER_DUTY_DAY: u32 = 2;

// ==========================================
// RosterStatsConfig - 聚合配置快照
// ==========================================
// 聚合调用前取一次快照并显式传入，核心不读全局缓存；
// 计算期间的并发配置变更不做同步（可接受的陈旧读）。
#[derive(Debug, Clone, Default)]
pub struct RosterStatsConfig {
    pub personnel: Vec<Personnel>,
    pub apprentices: Vec<Apprentice>,

    pub rtw_vehicles: Vec<Vehicle>,
    pub nef_vehicles: Vec<Vehicle>,
    pub rtw_activations: Vec<VehicleActivation>,
    pub nef_activations: Vec<VehicleActivation>,

    /// 值班代码 → 统计口径（未配置 = off）
    pub evaluation_modes: HashMap<String, EvaluationMode>,

    /// 当前部门编号（空串 = 无部门班制贡献）
    pub department_code: String,

    /// 部门班制序列集合
    pub department_sequences: Vec<PatternSequence>,
}

// ==========================================
// RosterAggregator - 月度统计聚合引擎
// ==========================================
pub struct RosterAggregator {
    calculator: DutyDayCalculator,
    breakdown: BreakdownEngine,
}

impl RosterAggregator {
    /// 创建新的聚合引擎
    pub fn new() -> Self {
        Self {
            calculator: DutyDayCalculator::new(),
            breakdown: BreakdownEngine::new(),
        }
    }

    /// 计算指定年份的全部月度序列
    #[instrument(skip(self, entries, config), fields(entry_count = entries.len()))]
    pub fn compute_monthly_series(
        &self,
        year: i32,
        entries: &[RosterEntry],
        config: &RosterStatsConfig,
    ) -> MonthlySeries {
        let mut series = MonthlySeries::default();

        // 遍历 1: ITW 班数（ITW 班位标签 或 值班代码口径 = itw）
        series.itw_shifts = self.itw_shifts_per_month(year, entries, &config.evaluation_modes);

        // 遍历 2: 部门值勤日数（纯班制推导，与排班条目无关）
        let duty_days = self.calculator.duty_days_for_year(
            year,
            &config.department_code,
            &config.department_sequences,
        );
        series.department_shifts = DutyDayCalculator::duty_day_counts(&duty_days);

        // 遍历 3: 毛需求岗位数 = 值勤日 × (RTW×4 + NEF×2) + ITW 班数
        let rtw_active = Self::active_vehicle_counts(year, &config.rtw_vehicles, &config.rtw_activations);
        let nef_active = Self::active_vehicle_counts(year, &config.nef_vehicles, &config.nef_activations);
        for m in 0..12 {
            let weight = rtw_active[m] * RTW_POSITIONS_PER_DUTY_DAY
                + nef_active[m] * NEF_POSITIONS_PER_DUTY_DAY;
            series.positions_gross[m] = series.department_shifts[m] * weight + series.itw_shifts[m];
        }

        // 遍历 4: 当月活跃正式人员数
        series.active_personnel =
            self.active_personnel_per_month(year, entries, &config.evaluation_modes);

        // 遍历 5: 学员机械师班数
        series.apprentice_operator_shifts = self.apprentice_operator_per_month(year, entries);

        // 规则 6: 净需求岗位 = max(0, 毛需求 - 学员机械师班数)
        for m in 0..12 {
            series.positions_net[m] =
                series.positions_gross[m].saturating_sub(series.apprentice_operator_shifts[m]);
        }

        // 规则 7: 人均班数（无活跃人员时为 0，保留 2 位小数）
        for m in 0..12 {
            series.shifts_per_person[m] = if series.active_personnel[m] > 0 {
                let ratio = series.positions_net[m] as f64 / series.active_personnel[m] as f64;
                (ratio * 100.0).round() / 100.0
            } else {
                0.0
            };
        }

        // 规则 8: 人均综合负荷（由人员明细推导，不在此重复计数）
        series.avg_combined_load = self.avg_combined_load_per_month(entries, config);

        series
    }

    // ==========================================
    // 单项遍历（只读，顺序无关）
    // ==========================================

    /// ITW 班数: ITW 班位标签 或 值班代码口径 = itw
    fn itw_shifts_per_month(
        &self,
        year: i32,
        entries: &[RosterEntry],
        modes: &HashMap<String, EvaluationMode>,
    ) -> [u32; 12] {
        let mut counts = [0u32; 12];
        for entry in entries {
            if entry.date.year() != year {
                continue;
            }
            let is_itw_slot = entry.slot_tag().map_or(false, |tag| tag.is_itw());
            if is_itw_slot || entry.evaluation_mode(modes) == EvaluationMode::Itw {
                counts[entry.month0()] += 1;
            }
        }
        counts
    }

    /// 各月参与岗位计算的车辆数（归档/停用月不计，未配置默认启用）
    fn active_vehicle_counts(
        year: i32,
        vehicles: &[Vehicle],
        activations: &[VehicleActivation],
    ) -> [u32; 12] {
        let mut counts = [0u32; 12];
        for m in 0..12u32 {
            counts[m as usize] = vehicles
                .iter()
                .filter(|v| v.is_active_in(year, m + 1, activations))
                .count() as u32;
        }
        counts
    }

    /// 当月活跃正式人员数: 至少一条口径 ≠ off 的条目
    fn active_personnel_per_month(
        &self,
        year: i32,
        entries: &[RosterEntry],
        modes: &HashMap<String, EvaluationMode>,
    ) -> [u32; 12] {
        let mut seen: Vec<HashSet<i64>> = vec![HashSet::new(); 12];
        for entry in entries {
            if entry.date.year() != year || entry.person_kind != PersonKind::Person {
                continue;
            }
            if entry.evaluation_mode(modes) != EvaluationMode::Off {
                seen[entry.month0()].insert(entry.person_id);
            }
        }
        let mut counts = [0u32; 12];
        for m in 0..12 {
            counts[m] = seen[m].len() as u32;
        }
        counts
    }

    /// 学员机械师班数: 学员条目的班位为车辆机械师岗位（白夜均计，
    /// 司机岗与见习岗不计）
    fn apprentice_operator_per_month(&self, year: i32, entries: &[RosterEntry]) -> [u32; 12] {
        let mut counts = [0u32; 12];
        for entry in entries {
            if entry.date.year() != year || entry.person_kind != PersonKind::Apprentice {
                continue;
            }
            if entry.slot_tag().map_or(false, |tag| tag.is_operator()) {
                counts[entry.month0()] += 1;
            }
        }
        counts
    }

    /// 人均综合负荷: 24h 当量 + ITW 按人合并后，仅对当月 > 0 的人员
    /// 取均值，四舍五入取整
    fn avg_combined_load_per_month(
        &self,
        entries: &[RosterEntry],
        config: &RosterStatsConfig,
    ) -> [u32; 12] {
        let combined = self.breakdown.combined_breakdown(
            entries,
            &config.personnel,
            &config.evaluation_modes,
        );

        let mut averages = [0u32; 12];
        for m in 0..12 {
            let loads: Vec<u32> = combined
                .iter()
                .map(|row| row.counts[m])
                .filter(|&c| c > 0)
                .collect();
            if !loads.is_empty() {
                let sum: u32 = loads.iter().sum();
                averages[m] = (sum as f64 / loads.len() as f64).round() as u32;
            }
        }
        averages
    }
}

impl Default for RosterAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
// 完整业务场景见 tests/aggregator_engine_test.rs
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::roster::RosterEntry;
    use chrono::NaiveDate;

    fn entry(kind: PersonKind, id: i64, date: &str, value: &str, entry_type: &str) -> RosterEntry {
        RosterEntry {
            person_id: id,
            person_kind: kind,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            value: value.to_string(),
            entry_type: entry_type.to_string(),
        }
    }

    #[test]
    fn test_empty_roster_yields_all_zero_series() {
        let aggregator = RosterAggregator::new();
        let series = aggregator.compute_monthly_series(2025, &[], &RosterStatsConfig::default());

        assert_eq!(series.positions_gross, [0; 12]);
        assert_eq!(series.positions_net, [0; 12]);
        assert_eq!(series.active_personnel, [0; 12]);
        assert_eq!(series.apprentice_operator_shifts, [0; 12]);
        assert_eq!(series.itw_shifts, [0; 12]);
        assert_eq!(series.avg_combined_load, [0; 12]);
        assert_eq!(series.shifts_per_person, [0.0; 12]);
    }

    #[test]
    fn test_itw_shift_counting_both_paths() {
        let aggregator = RosterAggregator::new();
        let mut modes = HashMap::new();
        modes.insert("IT".to_string(), EvaluationMode::Itw);

        let entries = vec![
            // ITW 班位标签
            entry(PersonKind::Person, 1, "2025-02-03", "", "itw_tag_1"),
            // 值班代码口径 = itw
            entry(PersonKind::Person, 2, "2025-02-04", "IT", "text"),
            // 两者皆非
            entry(PersonKind::Person, 3, "2025-02-05", "FD", "text"),
            // 非目标年份
            entry(PersonKind::Person, 1, "2024-02-03", "", "itw_tag_1"),
        ];

        let counts = aggregator.itw_shifts_per_month(2025, &entries, &modes);
        assert_eq!(counts[1], 2);
        assert_eq!(counts.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_apprentice_operator_only_counts_maschinist_position() {
        let aggregator = RosterAggregator::new();
        let entries = vec![
            entry(PersonKind::Apprentice, 1, "2025-05-01", "", "rtw1_tag_2"),
            entry(PersonKind::Apprentice, 1, "2025-05-02", "", "rtw1_nacht_2"),
            // 司机岗不计
            entry(PersonKind::Apprentice, 2, "2025-05-03", "", "rtw1_tag_1"),
            // 见习岗不计
            entry(PersonKind::Apprentice, 2, "2025-05-04", "", "rtw1_tag_3"),
            // 正式人员的机械师岗不计入学员口径
            entry(PersonKind::Person, 3, "2025-05-05", "", "rtw1_tag_2"),
        ];

        let counts = aggregator.apprentice_operator_per_month(2025, &entries);
        assert_eq!(counts[4], 2);
        assert_eq!(counts.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_active_personnel_distinct_per_month() {
        let aggregator = RosterAggregator::new();
        let mut modes = HashMap::new();
        modes.insert("FD".to_string(), EvaluationMode::H24);

        let entries = vec![
            entry(PersonKind::Person, 1, "2025-03-01", "FD", "text"),
            entry(PersonKind::Person, 1, "2025-03-15", "FD", "text"), // 同人同月只计一次
            entry(PersonKind::Person, 2, "2025-03-02", "XX", "text"), // off 口径不计
            entry(PersonKind::Apprentice, 3, "2025-03-03", "FD", "text"), // 学员不计
        ];

        let counts = aggregator.active_personnel_per_month(2025, &entries, &modes);
        assert_eq!(counts[2], 1);
    }
}
