// ==========================================
// 救援站勤务排班系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ConfigApi, MasterDataApi, PatternApi, RosterApi, StatsApi};
use crate::config::ConfigManager;
use crate::repository::{
    HolidayRepository, PatternRepository, RosterRepository, ShiftTypeRepository, StaffRepository,
    VehicleRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在Tauri应用中作为全局状态管理
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 排班API
    pub roster_api: Arc<RosterApi>,

    /// 统计API
    pub stats_api: Arc<StatsApi>,

    /// 班制API
    pub pattern_api: Arc<PatternApi>,

    /// 主数据API
    pub master_data_api: Arc<MasterDataApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享数据库连接并引导 schema
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;

        // Best-effort: 建表失败不应直接崩溃启动，由后续操作报错定位。
        if let Err(e) = crate::db::ensure_schema(&conn) {
            tracing::warn!("schema 引导失败(将继续启动): {}", e);
        }

        // 旧库提示（不做自动迁移）
        match crate::db::read_schema_version(&conn) {
            Ok(Some(v)) if v != crate::db::CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    "schema_version={} 与期望 {} 不一致，请检查数据库",
                    v,
                    crate::db::CURRENT_SCHEMA_VERSION
                );
            }
            Err(e) => tracing::warn!("读取 schema_version 失败: {}", e),
            _ => {}
        }

        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let roster_repo = Arc::new(RosterRepository::from_connection(conn.clone()));
        let staff_repo = Arc::new(StaffRepository::from_connection(conn.clone()));
        let vehicle_repo = Arc::new(VehicleRepository::from_connection(conn.clone()));
        let pattern_repo = Arc::new(PatternRepository::from_connection(conn.clone()));
        let shift_type_repo = Arc::new(ShiftTypeRepository::from_connection(conn.clone()));
        let holiday_repo = Arc::new(HolidayRepository::from_connection(conn.clone()));

        // 配置管理器
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================

        // 排班API（内部组装班位写入引擎与资格判定引擎）
        let roster_api = Arc::new(RosterApi::new(
            roster_repo.clone(),
            staff_repo.clone(),
            shift_type_repo.clone(),
        ));

        // 统计API
        let stats_api = Arc::new(StatsApi::new(
            roster_repo,
            staff_repo.clone(),
            vehicle_repo.clone(),
            pattern_repo.clone(),
            shift_type_repo.clone(),
            config_manager.clone(),
        ));

        // 班制API
        let pattern_api = Arc::new(PatternApi::new(pattern_repo, config_manager.clone()));

        // 主数据API
        let master_data_api = Arc::new(MasterDataApi::new(
            staff_repo,
            vehicle_repo,
            shift_type_repo,
            holiday_repo,
        ));

        // 配置管理API
        let config_api = Arc::new(ConfigApi::new(config_manager));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            roster_api,
            stats_api,
            pattern_api,
            master_data_api,
            config_api,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/rescue-duty-roster-dev/rescue_duty_roster.db
/// - 生产环境: 用户数据目录/rescue-duty-roster/rescue_duty_roster.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("RESCUE_DUTY_ROSTER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 使用用户数据目录，避免开发期 DB 文件变化触发 `tauri dev` 的文件监控重启。
    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖。
    let mut path = PathBuf::from("./rescue_duty_roster.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("rescue-duty-roster-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("rescue-duty-roster");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("rescue_duty_roster.db");
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    // 注意：AppState::new() 的测试需要真实的数据库文件
    // 这些测试在集成测试中进行
}
