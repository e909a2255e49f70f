// ==========================================
// 救援站勤务排班系统 - 配置层
// ==========================================
// 职责: 标量配置的加载、查询与快照
// 存储: config_kv 表 (key-value + scope)
// ==========================================

pub mod config_manager;

pub use config_manager::{
    ConfigManager, SETTING_ACTIVE_DEPARTMENT, SETTING_ROSTER_YEAR, SETTING_RTW_COUNT,
};
