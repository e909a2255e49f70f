// ==========================================
// 救援站勤务排班系统 - 人员仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::staff::{Apprentice, Personnel};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// StaffRepository - 人员/学员仓储
// ==========================================

/// 人员仓储
/// 职责: 管理 personnel / apprentices 表的 CRUD 操作
pub struct StaffRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StaffRepository {
    /// 创建新的人员仓储实例
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

    fn map_personnel(row: &Row) -> SqliteResult<Personnel> {
        Ok(Personnel {
            id: row.get(0)?,
            name: row.get(1)?,
            sort_key: row.get(2)?,
            can_drive: row.get::<_, i64>(3)? != 0,
            nef_qualified: row.get::<_, i64>(4)? != 0,
            active: row.get::<_, i64>(5)? != 0,
        })
    }

    fn map_apprentice(row: &Row) -> SqliteResult<Apprentice> {
        Ok(Apprentice {
            id: row.get(0)?,
            name: row.get(1)?,
            sort_key: row.get(2)?,
            training_year: row.get(3)?,
        })
    }

    /// 查询全部正式人员（规范顺序: sort_key, id）
    pub fn list_personnel(&self) -> RepositoryResult<Vec<Personnel>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, sort_key, can_drive, nef_qualified, active
            FROM personnel
            ORDER BY sort_key, id
            "#,
        )?;
        let list = stmt
            .query_map([], Self::map_personnel)?
            .collect::<SqliteResult<Vec<Personnel>>>()?;
        Ok(list)
    }

    /// 查询全部学员（规范顺序: sort_key, id）
    pub fn list_apprentices(&self) -> RepositoryResult<Vec<Apprentice>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, sort_key, training_year
            FROM apprentices
            ORDER BY sort_key, id
            "#,
        )?;
        let list = stmt
            .query_map([], Self::map_apprentice)?
            .collect::<SqliteResult<Vec<Apprentice>>>()?;
        Ok(list)
    }

    /// 插入或更新正式人员
    pub fn upsert_personnel(&self, person: &Personnel) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO personnel (id, name, sort_key, can_drive, nef_qualified, active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                person.id,
                person.name,
                person.sort_key,
                person.can_drive as i64,
                person.nef_qualified as i64,
                person.active as i64,
            ],
        )?;
        Ok(())
    }

    /// 插入或更新学员
    pub fn upsert_apprentice(&self, apprentice: &Apprentice) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO apprentices (id, name, sort_key, training_year)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                apprentice.id,
                apprentice.name,
                apprentice.sort_key,
                apprentice.training_year,
            ],
        )?;
        Ok(())
    }

    /// 删除正式人员
    pub fn delete_personnel(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n = conn.execute("DELETE FROM personnel WHERE id = ?1", params![id])?;
        Ok(n)
    }

    /// 删除学员
    pub fn delete_apprentice(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n = conn.execute("DELETE FROM apprentices WHERE id = ?1", params![id])?;
        Ok(n)
    }
}
