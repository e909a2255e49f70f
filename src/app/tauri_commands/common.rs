use crate::api::error::ApiError;
use crate::domain::types::{BreakdownFilter, PatternScope, PersonKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 公共工具：错误映射、日期/枚举解析
// ==========================================

/// 错误响应（返回给前端）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,
}

/// 将ApiError转换为JSON字符串（Tauri要求）
pub(super) fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: match &err {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BusinessRuleViolation(_) => "BUSINESS_RULE_VIOLATION",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::DatabaseTransactionError(_) => "DATABASE_TRANSACTION_ERROR",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
        .to_string(),
        message: err.to_string(),
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

/// 解析日期字符串
pub(super) fn parse_date(date_str: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| format!("日期格式错误（应为YYYY-MM-DD）: {}", e))
}

/// 解析人员类别字符串
pub(super) fn parse_person_kind(kind: &str) -> PersonKind {
    PersonKind::from_str(kind)
}

/// 解析班制范围字符串
pub(super) fn parse_scope(scope: &str) -> Result<PatternScope, String> {
    PatternScope::from_str(scope).ok_or_else(|| format!("未知班制范围: {}", scope))
}

/// 解析明细口径字符串
pub(super) fn parse_breakdown_filter(filter: &str) -> Result<BreakdownFilter, String> {
    match filter.to_lowercase().as_str() {
        "24h" => Ok(BreakdownFilter::H24),
        "itw" => Ok(BreakdownFilter::Itw),
        "apprentice_operator" => Ok(BreakdownFilter::ApprenticeOperator),
        other => Err(format!("未知明细口径: {}", other)),
    }
}
