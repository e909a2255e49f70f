// ==========================================
// 救援站勤务排班系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================
// 设计约定: 核心计算不读全局可变缓存，配置在每次
// 聚合调用前取快照并以显式参数传入引擎。
// ==========================================

use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 配置键: 当前部门编号（班制类别码）
pub const SETTING_ACTIVE_DEPARTMENT: &str = "active_department";

/// 配置键: 当前排班年份
pub const SETTING_ROSTER_YEAR: &str = "roster_year";

/// 配置键: RTW 车辆数（表单默认值，实际计算以车辆表为准）
pub const SETTING_RTW_COUNT: &str = "rtw_count";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（scope_id='global'，upsert）
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key)
            DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;

        Ok(())
    }

    /// 读取配置值，带默认值
    pub fn get_setting_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_setting(key)?.unwrap_or_else(|| default.to_string()))
    }

    // ==========================================
    // 类型化配置读取
    // ==========================================

    /// 当前部门编号（未配置返回 None）
    pub fn active_department(&self) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self
            .get_setting(SETTING_ACTIVE_DEPARTMENT)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    /// 当前排班年份（非法值视为未配置）
    pub fn roster_year(&self) -> Result<Option<i32>, Box<dyn Error>> {
        Ok(self
            .get_setting(SETTING_ROSTER_YEAR)?
            .and_then(|v| v.trim().parse::<i32>().ok()))
    }

    /// RTW 车辆数（非法值视为未配置）
    pub fn rtw_count(&self) -> Result<Option<u32>, Box<dyn Error>> {
        Ok(self
            .get_setting(SETTING_RTW_COUNT)?
            .and_then(|v| v.trim().parse::<u32>().ok()))
    }

    // ==========================================
    // 配置快照
    // ==========================================

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 在统计/导出前记录当时配置口径
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn
            .prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}
