use crate::app::state::AppState;
use crate::domain::holiday::Holiday;
use crate::domain::staff::{Apprentice, Personnel, ShiftType};
use crate::domain::types::VehicleKind;
use crate::domain::vehicle::Vehicle;

use super::common::{map_api_error, parse_date};

// ==========================================
// 主数据相关命令
// ==========================================

fn parse_vehicle_kind(kind: &str) -> Result<VehicleKind, String> {
    VehicleKind::from_str(kind).ok_or_else(|| format!("未知车辆类别: {}", kind))
}

// ===== 人员 / 学员 =====

/// 查询全部正式人员
#[tauri::command(rename_all = "snake_case")]
pub async fn list_personnel(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.master_data_api.list_personnel().map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 查询全部学员
#[tauri::command(rename_all = "snake_case")]
pub async fn list_apprentices(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .master_data_api
        .list_apprentices()
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 插入或更新正式人员
#[tauri::command(rename_all = "snake_case")]
pub async fn upsert_personnel(
    state: tauri::State<'_, AppState>,
    person: String,
) -> Result<String, String> {
    let person: Personnel =
        serde_json::from_str(&person).map_err(|e| format!("解析人员数据失败: {}", e))?;
    state
        .master_data_api
        .upsert_personnel(person)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 插入或更新学员
#[tauri::command(rename_all = "snake_case")]
pub async fn upsert_apprentice(
    state: tauri::State<'_, AppState>,
    apprentice: String,
) -> Result<String, String> {
    let apprentice: Apprentice =
        serde_json::from_str(&apprentice).map_err(|e| format!("解析学员数据失败: {}", e))?;
    state
        .master_data_api
        .upsert_apprentice(apprentice)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 删除正式人员
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_personnel(
    state: tauri::State<'_, AppState>,
    id: i64,
) -> Result<String, String> {
    let deleted = state
        .master_data_api
        .delete_personnel(id)
        .map_err(map_api_error)?;

    serde_json::to_string(&serde_json::json!({ "deleted_count": deleted }))
        .map_err(|e| format!("序列化失败: {}", e))
}

/// 删除学员
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_apprentice(
    state: tauri::State<'_, AppState>,
    id: i64,
) -> Result<String, String> {
    let deleted = state
        .master_data_api
        .delete_apprentice(id)
        .map_err(map_api_error)?;

    serde_json::to_string(&serde_json::json!({ "deleted_count": deleted }))
        .map_err(|e| format!("序列化失败: {}", e))
}

// ===== 车辆 =====

/// 按类别查询车辆（类别: "rtw" / "nef" / "itw"）
#[tauri::command(rename_all = "snake_case")]
pub async fn list_vehicles(
    state: tauri::State<'_, AppState>,
    kind: String,
) -> Result<String, String> {
    let kind = parse_vehicle_kind(&kind)?;
    let result = state
        .master_data_api
        .list_vehicles(kind)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 插入或更新车辆
#[tauri::command(rename_all = "snake_case")]
pub async fn upsert_vehicle(
    state: tauri::State<'_, AppState>,
    vehicle: String,
) -> Result<String, String> {
    let vehicle: Vehicle =
        serde_json::from_str(&vehicle).map_err(|e| format!("解析车辆数据失败: {}", e))?;
    state
        .master_data_api
        .upsert_vehicle(vehicle)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 设置车辆归档标记
#[tauri::command(rename_all = "snake_case")]
pub async fn set_vehicle_archived(
    state: tauri::State<'_, AppState>,
    vehicle_id: i64,
    archived: bool,
) -> Result<String, String> {
    state
        .master_data_api
        .set_vehicle_archived(vehicle_id, archived)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 查询某类别车辆的年度启用标记
#[tauri::command(rename_all = "snake_case")]
pub async fn list_vehicle_activations(
    state: tauri::State<'_, AppState>,
    kind: String,
    year: i32,
) -> Result<String, String> {
    let kind = parse_vehicle_kind(&kind)?;
    let result = state
        .master_data_api
        .vehicle_activations(kind, year)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 设置车辆月度启用标记
#[tauri::command(rename_all = "snake_case")]
pub async fn set_vehicle_activation(
    state: tauri::State<'_, AppState>,
    vehicle_id: i64,
    year: i32,
    month: u32,
    enabled: bool,
) -> Result<String, String> {
    state
        .master_data_api
        .set_vehicle_activation(vehicle_id, year, month, enabled)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

// ===== 值班类型与统计口径 =====

/// 查询全部值班类型
#[tauri::command(rename_all = "snake_case")]
pub async fn list_shift_types(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .master_data_api
        .list_shift_types()
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 插入或更新值班类型
#[tauri::command(rename_all = "snake_case")]
pub async fn upsert_shift_type(
    state: tauri::State<'_, AppState>,
    shift_type: String,
) -> Result<String, String> {
    let shift_type: ShiftType =
        serde_json::from_str(&shift_type).map_err(|e| format!("解析值班类型失败: {}", e))?;
    state
        .master_data_api
        .upsert_shift_type(shift_type)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 删除值班类型
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_shift_type(
    state: tauri::State<'_, AppState>,
    code: String,
) -> Result<String, String> {
    let deleted = state
        .master_data_api
        .delete_shift_type(&code)
        .map_err(map_api_error)?;

    serde_json::to_string(&serde_json::json!({ "deleted_count": deleted }))
        .map_err(|e| format!("序列化失败: {}", e))
}

/// 查询全部统计口径配置
#[tauri::command(rename_all = "snake_case")]
pub async fn list_evaluation_modes(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .master_data_api
        .evaluation_modes()
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 设置单个代码的统计口径
#[tauri::command(rename_all = "snake_case")]
pub async fn set_evaluation_mode(
    state: tauri::State<'_, AppState>,
    code: String,
    mode: String,
) -> Result<String, String> {
    state
        .master_data_api
        .set_evaluation_mode(&code, &mode)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

// ===== 节假日 =====

/// 查询指定年份的节假日
#[tauri::command(rename_all = "snake_case")]
pub async fn list_holidays(
    state: tauri::State<'_, AppState>,
    year: i32,
) -> Result<String, String> {
    let result = state
        .master_data_api
        .list_holidays(year)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 插入或更新节假日
#[tauri::command(rename_all = "snake_case")]
pub async fn upsert_holiday(
    state: tauri::State<'_, AppState>,
    holiday: String,
) -> Result<String, String> {
    let holiday: Holiday =
        serde_json::from_str(&holiday).map_err(|e| format!("解析节假日失败: {}", e))?;
    state
        .master_data_api
        .upsert_holiday(holiday)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 删除节假日
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_holiday(
    state: tauri::State<'_, AppState>,
    date: String,
) -> Result<String, String> {
    let date = parse_date(&date)?;
    let deleted = state
        .master_data_api
        .delete_holiday(date)
        .map_err(map_api_error)?;

    serde_json::to_string(&serde_json::json!({ "deleted_count": deleted }))
        .map_err(|e| format!("序列化失败: {}", e))
}
