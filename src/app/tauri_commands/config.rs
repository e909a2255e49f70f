use crate::api::pattern_api::PatternSequenceInput;
use crate::app::state::AppState;

use super::common::{map_api_error, parse_date, parse_scope};

// ==========================================
// 配置与班制相关命令
// ==========================================

/// 读取配置值
#[tauri::command(rename_all = "snake_case")]
pub async fn get_setting(
    state: tauri::State<'_, AppState>,
    key: String,
) -> Result<String, String> {
    let result = state.config_api.get_setting(&key).map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 写入配置值
#[tauri::command(rename_all = "snake_case")]
pub async fn update_setting(
    state: tauri::State<'_, AppState>,
    key: String,
    value: String,
) -> Result<String, String> {
    state
        .config_api
        .update_setting(&key, &value)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 获取配置快照
#[tauri::command(rename_all = "snake_case")]
pub async fn get_config_snapshot(state: tauri::State<'_, AppState>) -> Result<String, String> {
    state.config_api.get_config_snapshot().map_err(map_api_error)
}

/// 查询某范围的全部班制序列（范围: "dept" / "itw"）
#[tauri::command(rename_all = "snake_case")]
pub async fn list_duty_patterns(
    state: tauri::State<'_, AppState>,
    scope: String,
) -> Result<String, String> {
    let scope = parse_scope(&scope)?;
    let result = state.pattern_api.list_patterns(scope).map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 整体替换某范围的班制序列集合
#[tauri::command(rename_all = "snake_case")]
pub async fn save_duty_patterns(
    state: tauri::State<'_, AppState>,
    scope: String,
    patterns: String,
) -> Result<String, String> {
    let scope = parse_scope(&scope)?;
    let inputs: Vec<PatternSequenceInput> =
        serde_json::from_str(&patterns).map_err(|e| format!("解析班制序列失败: {}", e))?;

    let saved = state
        .pattern_api
        .save_patterns(scope, inputs)
        .map_err(map_api_error)?;

    serde_json::to_string(&serde_json::json!({ "saved_count": saved }))
        .map_err(|e| format!("序列化失败: {}", e))
}

/// 解析指定日期的班制类别码
#[tauri::command(rename_all = "snake_case")]
pub async fn resolve_pattern_category(
    state: tauri::State<'_, AppState>,
    scope: String,
    date: String,
) -> Result<String, String> {
    let scope = parse_scope(&scope)?;
    let date = parse_date(&date)?;
    let result = state
        .pattern_api
        .resolve_category(scope, date)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
