use crate::app::state::AppState;

use super::common::{map_api_error, parse_date, parse_person_kind};

// ==========================================
// 排班相关命令
// ==========================================

/// 查询指定年份的全部排班条目
#[tauri::command(rename_all = "snake_case")]
pub async fn get_duty_roster(
    state: tauri::State<'_, AppState>,
    year: i32,
) -> Result<String, String> {
    let result = state.roster_api.get_duty_roster(year).map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 查询单条排班条目
#[tauri::command(rename_all = "snake_case")]
pub async fn get_roster_entry(
    state: tauri::State<'_, AppState>,
    person_id: i64,
    person_kind: String,
    date: String,
) -> Result<String, String> {
    let date = parse_date(&date)?;
    let result = state
        .roster_api
        .get_entry(person_id, parse_person_kind(&person_kind), date)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 值班代码 upsert（保留班位标签）
#[tauri::command(rename_all = "snake_case")]
pub async fn set_duty_roster_entry(
    state: tauri::State<'_, AppState>,
    person_id: i64,
    person_kind: String,
    date: String,
    value: String,
) -> Result<String, String> {
    let date = parse_date(&date)?;
    state
        .roster_api
        .set_duty_entry(person_id, parse_person_kind(&person_kind), date, &value)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 班位写入（保留值班代码；空串即清除班位）
#[tauri::command(rename_all = "snake_case")]
pub async fn assign_duty_slot(
    state: tauri::State<'_, AppState>,
    person_id: i64,
    person_kind: String,
    date: String,
    slot_type: String,
) -> Result<String, String> {
    let date = parse_date(&date)?;
    state
        .roster_api
        .assign_slot(person_id, parse_person_kind(&person_kind), date, &slot_type)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 按年份/月份区间批量清除排班条目
#[tauri::command(rename_all = "snake_case")]
pub async fn clear_duty_roster_range(
    state: tauri::State<'_, AppState>,
    year: i32,
    month_from: u32,
    month_to: u32,
) -> Result<String, String> {
    let deleted = state
        .roster_api
        .clear_range(year, month_from, month_to)
        .map_err(map_api_error)?;

    serde_json::to_string(&serde_json::json!({ "deleted_count": deleted }))
        .map_err(|e| format!("序列化失败: {}", e))
}

/// 查询指定日期某班位的候选正式人员
#[tauri::command(rename_all = "snake_case")]
pub async fn list_eligible_persons_for_slot(
    state: tauri::State<'_, AppState>,
    date: String,
    slot_type: String,
) -> Result<String, String> {
    let date = parse_date(&date)?;
    let result = state
        .roster_api
        .eligible_persons_for_slot(date, &slot_type)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
