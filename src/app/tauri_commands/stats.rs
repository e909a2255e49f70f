use crate::app::state::AppState;

use super::common::{map_api_error, parse_breakdown_filter};

// ==========================================
// 统计相关命令
// ==========================================

/// 计算指定年份的月度统计序列
#[tauri::command(rename_all = "snake_case")]
pub async fn get_monthly_series(
    state: tauri::State<'_, AppState>,
    year: i32,
) -> Result<String, String> {
    let result = state.stats_api.monthly_series(year).map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 人员明细（口径: "24h" / "itw" / "apprentice_operator"）
#[tauri::command(rename_all = "snake_case")]
pub async fn get_person_breakdown(
    state: tauri::State<'_, AppState>,
    year: i32,
    filter: String,
) -> Result<String, String> {
    let filter = parse_breakdown_filter(&filter)?;
    let result = state
        .stats_api
        .person_breakdown(year, filter)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 正式人员综合明细（24h 当量 + ITW 按人合并）
#[tauri::command(rename_all = "snake_case")]
pub async fn get_combined_breakdown(
    state: tauri::State<'_, AppState>,
    year: i32,
) -> Result<String, String> {
    let result = state
        .stats_api
        .combined_breakdown(year)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 当前部门的全年值勤日（按月份分组）
#[tauri::command(rename_all = "snake_case")]
pub async fn get_duty_days(
    state: tauri::State<'_, AppState>,
    year: i32,
) -> Result<String, String> {
    let result = state
        .pattern_api
        .duty_days_for_year(year)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// ITW 全年值勤日（按月份分组）
#[tauri::command(rename_all = "snake_case")]
pub async fn get_itw_duty_days(
    state: tauri::State<'_, AppState>,
    year: i32,
) -> Result<String, String> {
    let result = state
        .pattern_api
        .itw_duty_days_for_year(year)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
