// ==========================================
// 救援站勤务排班系统 - 值班类型仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 值班类型（代码 + 描述）与统计口径（shift_evaluation）
// 分表存储，按代码关联；未配置口径视为 off。
// ==========================================

use crate::domain::staff::ShiftType;
use crate::domain::types::EvaluationMode;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ShiftTypeRepository - 值班类型仓储
// ==========================================

/// 值班类型仓储
/// 职责: 管理 shift_types / shift_evaluation 表
pub struct ShiftTypeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShiftTypeRepository {
    /// 创建新的值班类型仓储实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部值班类型（按代码排序）
    pub fn list(&self) -> RepositoryResult<Vec<ShiftType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT code, description FROM shift_types ORDER BY code",
        )?;
        let list = stmt
            .query_map([], |row| {
                Ok(ShiftType {
                    code: row.get(0)?,
                    description: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<ShiftType>>>()?;
        Ok(list)
    }

    /// 插入或更新值班类型
    pub fn upsert(&self, shift_type: &ShiftType) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO shift_types (code, description)
            VALUES (?1, ?2)
            "#,
            params![shift_type.code, shift_type.description],
        )?;
        Ok(())
    }

    /// 删除值班类型（口径配置一并删除）
    pub fn delete(&self, code: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n = conn.execute("DELETE FROM shift_types WHERE code = ?1", params![code])?;
        conn.execute("DELETE FROM shift_evaluation WHERE code = ?1", params![code])?;
        Ok(n)
    }

    /// 查询全部统计口径配置
    ///
    /// # 返回
    /// - Ok(HashMap<代码, 口径>): 未出现的代码语义为 off
    pub fn evaluation_modes(&self) -> RepositoryResult<HashMap<String, EvaluationMode>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT code, mode FROM shift_evaluation")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<SqliteResult<Vec<(String, String)>>>()?;

        let mut modes = HashMap::with_capacity(rows.len());
        for (code, mode_str) in rows {
            modes.insert(code, EvaluationMode::from_str(&mode_str));
        }
        Ok(modes)
    }

    /// 设置单个代码的统计口径（upsert）
    pub fn set_evaluation_mode(&self, code: &str, mode: EvaluationMode) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO shift_evaluation (code, mode)
            VALUES (?1, ?2)
            ON CONFLICT(code) DO UPDATE SET mode = excluded.mode
            "#,
            params![code, mode.to_db_str()],
        )?;
        Ok(())
    }
}
