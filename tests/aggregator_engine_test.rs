// ==========================================
// 月度统计聚合引擎测试
// ==========================================
// 测试目标: 验证岗位/人员/负荷各序列的业务口径
// 与相互独立的遍历语义
// ==========================================


use chrono::NaiveDate;
use rescue_duty_roster::domain::pattern::{PatternSequence, PATTERN_LENGTH};
use rescue_duty_roster::domain::roster::RosterEntry;
use rescue_duty_roster::domain::types::{EvaluationMode, PatternScope, PersonKind, VehicleKind};
use rescue_duty_roster::domain::vehicle::VehicleActivation;
use rescue_duty_roster::engine::{RosterAggregator, RosterStatsConfig};
use std::collections::HashMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(kind: PersonKind, id: i64, d: NaiveDate, value: &str, entry_type: &str) -> RosterEntry {
    RosterEntry {
        person_id: id,
        person_kind: kind,
        date: d,
        value: value.to_string(),
        entry_type: entry_type.to_string(),
    }
}

/// 每日都是部门 "2" 的班制序列
fn daily_dept2_sequence() -> PatternSequence {
    PatternSequence::new(
        date(1970, 1, 1),
        vec!["2".to_string(); PATTERN_LENGTH],
        PatternScope::Department,
    )
}

/// 标准配置: 1 RTW + 1 NEF, 部门 "2" 每日值勤,
/// FD=24h, IT=itw, 两名正式人员一名学员
fn base_config() -> RosterStatsConfig {
    let mut evaluation_modes = HashMap::new();
    evaluation_modes.insert("FD".to_string(), EvaluationMode::H24);
    evaluation_modes.insert("IT".to_string(), EvaluationMode::Itw);

    RosterStatsConfig {
        personnel: vec![
            test_helpers::personnel(1, "Krause"),
            test_helpers::personnel(2, "Weber"),
        ],
        apprentices: vec![test_helpers::apprentice(10, "Lehmann")],
        rtw_vehicles: vec![test_helpers::vehicle(1, VehicleKind::Rtw, "RTW 1")],
        nef_vehicles: vec![test_helpers::vehicle(2, VehicleKind::Nef, "NEF 1")],
        rtw_activations: Vec::new(),
        nef_activations: Vec::new(),
        evaluation_modes,
        department_code: "2".to_string(),
        department_sequences: vec![daily_dept2_sequence()],
    }
}

#[test]
fn test_empty_roster_with_empty_config_is_all_zero() {
    let aggregator = RosterAggregator::new();
    let series = aggregator.compute_monthly_series(2025, &[], &RosterStatsConfig::default());

    assert_eq!(series.department_shifts, [0; 12]);
    assert_eq!(series.positions_gross, [0; 12]);
    assert_eq!(series.positions_net, [0; 12]);
    assert_eq!(series.shifts_per_person, [0.0; 12]);
}

#[test]
fn test_gross_positions_formula() {
    // 毛需求 = 值勤日 × (RTW×4 + NEF×2) + ITW 班数
    let aggregator = RosterAggregator::new();
    let config = base_config();

    let entries = vec![entry(PersonKind::Person, 1, date(2025, 1, 20), "", "itw_tag_1")];
    let series = aggregator.compute_monthly_series(2025, &entries, &config);

    // 1 月 31 个值勤日, 权重 1×4 + 1×2 = 6
    assert_eq!(series.department_shifts[0], 31);
    assert_eq!(series.itw_shifts[0], 1);
    assert_eq!(series.positions_gross[0], 31 * 6 + 1);
    // 2 月 28 天
    assert_eq!(series.positions_gross[1], 28 * 6);
}

#[test]
fn test_vehicle_deactivated_for_march_only() {
    // 场景: RTW 1 在 3 月停用 → 3 月失去 4 权重，其余月份不受影响
    let aggregator = RosterAggregator::new();
    let mut config = base_config();
    config.rtw_activations = vec![VehicleActivation {
        vehicle_id: 1,
        year: 2025,
        month: 3,
        enabled: false,
    }];

    let series = aggregator.compute_monthly_series(2025, &[], &config);

    // 3 月只剩 NEF 权重 2
    assert_eq!(series.positions_gross[2], 31 * 2);
    // 2 月与 4 月保持全权重 6
    assert_eq!(series.positions_gross[1], 28 * 6);
    assert_eq!(series.positions_gross[3], 30 * 6);
}

#[test]
fn test_archived_vehicle_contributes_nothing() {
    let aggregator = RosterAggregator::new();
    let mut config = base_config();
    config.rtw_vehicles[0].archived = true;

    let series = aggregator.compute_monthly_series(2025, &[], &config);
    // 全年只剩 NEF 权重
    for m in 0..12 {
        assert_eq!(series.positions_gross[m], series.department_shifts[m] * 2);
    }
}

#[test]
fn test_net_positions_offset_by_apprentice_operators() {
    let aggregator = RosterAggregator::new();
    let config = base_config();

    let entries = vec![
        entry(PersonKind::Apprentice, 10, date(2025, 1, 5), "", "rtw1_tag_2"),
        entry(PersonKind::Apprentice, 10, date(2025, 1, 6), "", "rtw1_nacht_2"),
    ];
    let series = aggregator.compute_monthly_series(2025, &entries, &config);

    assert_eq!(series.apprentice_operator_shifts[0], 2);
    assert_eq!(series.positions_net[0], series.positions_gross[0] - 2);
}

#[test]
fn test_net_positions_never_negative() {
    // 无车辆无 ITW → 毛需求 0；学员机械师班数不把净值打到负数
    let aggregator = RosterAggregator::new();
    let mut config = base_config();
    config.rtw_vehicles.clear();
    config.nef_vehicles.clear();
    config.department_sequences.clear();

    let entries = vec![entry(PersonKind::Apprentice, 10, date(2025, 1, 5), "", "rtw1_tag_2")];
    let series = aggregator.compute_monthly_series(2025, &entries, &config);

    assert_eq!(series.positions_gross[0], 0);
    assert_eq!(series.positions_net[0], 0);
}

#[test]
fn test_shifts_per_person_rounded_two_decimals() {
    let aggregator = RosterAggregator::new();
    let mut config = base_config();
    // 只留 NEF，缩小数值便于核对: 1 月毛需求 = 31 × 2 = 62
    config.rtw_vehicles.clear();

    let entries = vec![
        entry(PersonKind::Person, 1, date(2025, 1, 10), "FD", "text"),
        entry(PersonKind::Person, 2, date(2025, 1, 11), "FD", "text"),
        // off 口径的人员不算活跃
        entry(PersonKind::Person, 3, date(2025, 1, 12), "XX", "text"),
    ];
    let series = aggregator.compute_monthly_series(2025, &entries, &config);

    assert_eq!(series.active_personnel[0], 2);
    assert_eq!(series.positions_net[0], 62);
    assert_eq!(series.shifts_per_person[0], 31.0);
    // 无活跃人员的月份除零 → 0
    assert_eq!(series.active_personnel[1], 0);
    assert_eq!(series.shifts_per_person[1], 0.0);
}

#[test]
fn test_avg_combined_load_over_active_persons_only() {
    let aggregator = RosterAggregator::new();
    let config = base_config();

    let entries = vec![
        // Krause: 1 月 FD + ITW 班位 → 综合 2
        entry(PersonKind::Person, 1, date(2025, 1, 10), "FD", "text"),
        entry(PersonKind::Person, 1, date(2025, 1, 20), "", "itw_nacht_1"),
        // Weber: 1 月 FD → 综合 1
        entry(PersonKind::Person, 2, date(2025, 1, 11), "FD", "dropdown"),
    ];
    let series = aggregator.compute_monthly_series(2025, &entries, &config);

    // (2 + 1) / 2 = 1.5 → 四舍五入 2
    assert_eq!(series.avg_combined_load[0], 2);
    // 无任何综合负荷的月份为 0（不纳入均值的人不拉低结果）
    assert_eq!(series.avg_combined_load[1], 0);
}

#[test]
fn test_passes_are_independent_of_entry_order() {
    let aggregator = RosterAggregator::new();
    let config = base_config();

    let mut entries = vec![
        entry(PersonKind::Person, 1, date(2025, 1, 10), "FD", "text"),
        entry(PersonKind::Apprentice, 10, date(2025, 1, 5), "", "rtw1_tag_2"),
        entry(PersonKind::Person, 2, date(2025, 3, 2), "IT", "text"),
    ];

    let forward = aggregator.compute_monthly_series(2025, &entries, &config);
    entries.reverse();
    let backward = aggregator.compute_monthly_series(2025, &entries, &config);

    assert_eq!(forward, backward);
}
