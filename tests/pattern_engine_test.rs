// ==========================================
// 班制引擎集成测试
// ==========================================
// 测试目标: 班制序列的整体替换保存、读取归一化、
// 日期类别解析与值勤日推导的端到端行为
// ==========================================


use chrono::NaiveDate;
use rescue_duty_roster::api::pattern_api::{PatternApi, PatternSequenceInput};
use rescue_duty_roster::api::ApiError;
use rescue_duty_roster::config::{ConfigManager, SETTING_ACTIVE_DEPARTMENT};
use rescue_duty_roster::domain::pattern::PATTERN_LENGTH;
use rescue_duty_roster::domain::types::PatternScope;
use rescue_duty_roster::repository::PatternRepository;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (tempfile::NamedTempFile, PatternApi, Arc<ConfigManager>) {
    let (temp_file, db_path) = test_helpers::create_test_db().expect("创建测试数据库失败");
    let pattern_repo = Arc::new(PatternRepository::new(&db_path).expect("创建班制仓储失败"));
    let config_manager = Arc::new(ConfigManager::new(&db_path).expect("创建配置管理器失败"));
    let api = PatternApi::new(pattern_repo, config_manager.clone());
    (temp_file, api, config_manager)
}

/// 21 个单元格: "1","2","3" 循环
fn cyclic_cells() -> Vec<String> {
    (0..PATTERN_LENGTH).map(|i| ((i % 3) + 1).to_string()).collect()
}

#[test]
fn test_save_normalizes_cells_on_persist() {
    let (_temp, api, _config) = setup();

    // 25 个单元格，含非法代码，保存后归一化为 21 槽
    let mut cells: Vec<String> = (0..25).map(|i| ((i % 3) + 1).to_string()).collect();
    cells[1] = "ungueltig".to_string();

    let saved = api
        .save_patterns(
            PatternScope::Department,
            vec![PatternSequenceInput {
                start_date: "2025-01-01".to_string(),
                cells,
            }],
        )
        .unwrap();
    assert_eq!(saved, 1);

    let sequences = api.list_patterns(PatternScope::Department).unwrap();
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].pattern.len(), PATTERN_LENGTH);
    assert_eq!(sequences[0].pattern[0], "1");
    assert_eq!(sequences[0].pattern[1], "", "非法代码应置空");
}

#[test]
fn test_save_is_replace_all() {
    let (_temp, api, _config) = setup();

    for start in ["2024-01-01", "2024-06-01", "2025-01-01"] {
        api.save_patterns(
            PatternScope::Department,
            vec![PatternSequenceInput {
                start_date: start.to_string(),
                cells: cyclic_cells(),
            }],
        )
        .unwrap();
    }

    // 每次保存整体替换，最终只剩最后一次的集合
    let sequences = api.list_patterns(PatternScope::Department).unwrap();
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].start_date, date(2025, 1, 1));
}

#[test]
fn test_save_rejects_duplicate_start_dates() {
    let (_temp, api, _config) = setup();

    let result = api.save_patterns(
        PatternScope::Department,
        vec![
            PatternSequenceInput {
                start_date: "2025-01-01".to_string(),
                cells: cyclic_cells(),
            },
            PatternSequenceInput {
                start_date: "2025-01-01".to_string(),
                cells: cyclic_cells(),
            },
        ],
    );

    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_scopes_are_independent() {
    let (_temp, api, _config) = setup();

    api.save_patterns(
        PatternScope::Department,
        vec![PatternSequenceInput {
            start_date: "2025-01-01".to_string(),
            cells: cyclic_cells(),
        }],
    )
    .unwrap();
    api.save_patterns(
        PatternScope::Itw,
        vec![PatternSequenceInput {
            start_date: "2025-02-01".to_string(),
            cells: vec!["ITW".to_string(); PATTERN_LENGTH],
        }],
    )
    .unwrap();

    assert_eq!(api.list_patterns(PatternScope::Department).unwrap().len(), 1);
    assert_eq!(api.list_patterns(PatternScope::Itw).unwrap().len(), 1);

    // 部门范围的整体替换不影响 ITW 范围
    api.save_patterns(PatternScope::Department, vec![]).unwrap();
    assert!(api.list_patterns(PatternScope::Department).unwrap().is_empty());
    assert_eq!(api.list_patterns(PatternScope::Itw).unwrap().len(), 1);
}

#[test]
fn test_resolve_category_via_api() {
    let (_temp, api, _config) = setup();

    api.save_patterns(
        PatternScope::Department,
        vec![PatternSequenceInput {
            start_date: "2025-01-01".to_string(),
            cells: cyclic_cells(),
        }],
    )
    .unwrap();

    assert_eq!(
        api.resolve_category(PatternScope::Department, date(2025, 1, 2)).unwrap(),
        Some("2".to_string())
    );
    // 生效日之前的日期同样解析（负偏移取模）
    assert!(api
        .resolve_category(PatternScope::Department, date(2024, 12, 31))
        .unwrap()
        .is_some());
    // 无序列的范围返回 None
    assert_eq!(api.resolve_category(PatternScope::Itw, date(2025, 1, 2)).unwrap(), None);
}

#[test]
fn test_duty_days_use_configured_department() {
    let (_temp, api, config) = setup();

    api.save_patterns(
        PatternScope::Department,
        vec![PatternSequenceInput {
            start_date: "1970-01-01".to_string(),
            cells: cyclic_cells(),
        }],
    )
    .unwrap();

    // 未配置部门编号: 全部空桶
    let months = api.duty_days_for_year(2025).unwrap();
    assert!(months.iter().all(|m| m.is_empty()));

    config.set_setting(SETTING_ACTIVE_DEPARTMENT, "2").unwrap();
    let months = api.duty_days_for_year(2025).unwrap();
    let total: usize = months.iter().map(|m| m.len()).sum();
    // 3 类循环覆盖全年约三分之一的日期
    assert!(total > 100 && total < 140, "total={}", total);

    // 划分性质: 各月桶大小之和 = 全年命中数，桶内日号不重复
    for bucket in &months {
        let mut days: Vec<u32> = bucket.iter().map(|d| d.day).collect();
        days.sort_unstable();
        days.dedup();
        assert_eq!(days.len(), bucket.len());
    }
}
