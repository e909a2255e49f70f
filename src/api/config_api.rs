// ==========================================
// 救援站勤务排班系统 - 配置管理 API
// ==========================================
// 职责: 标量配置（部门编号/排班年份/RTW 车辆数）
// 的读写与快照
// ==========================================

use crate::api::error::{map_config_error, ApiError, ApiResult};
use crate::config::{ConfigManager, SETTING_ROSTER_YEAR, SETTING_RTW_COUNT};
use std::sync::Arc;

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    /// 创建新的配置 API 实例
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 读取配置值
    pub fn get_setting(&self, key: &str) -> ApiResult<Option<String>> {
        self.config_manager.get_setting(key).map_err(map_config_error)
    }

    /// 写入配置值
    ///
    /// 对已知的数值型配置键做输入校验，其余键原样存储。
    pub fn update_setting(&self, key: &str, value: &str) -> ApiResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ApiError::InvalidInput("配置键不能为空".to_string()));
        }

        match key {
            SETTING_ROSTER_YEAR => {
                value.trim().parse::<i32>().map_err(|_| {
                    ApiError::InvalidInput(format!("排班年份必须为整数: {}", value))
                })?;
            }
            SETTING_RTW_COUNT => {
                value.trim().parse::<u32>().map_err(|_| {
                    ApiError::InvalidInput(format!("RTW 车辆数必须为非负整数: {}", value))
                })?;
            }
            _ => {}
        }

        self.config_manager
            .set_setting(key, value.trim())
            .map_err(map_config_error)
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ApiResult<String> {
        self.config_manager
            .get_config_snapshot()
            .map_err(map_config_error)
    }
}
