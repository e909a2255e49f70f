// ==========================================
// 救援站勤务排班系统 - 节假日仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::holiday::Holiday;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// HolidayRepository - 节假日仓储
// ==========================================

/// 节假日仓储
/// 职责: 管理 holidays 表的 CRUD 操作
pub struct HolidayRepository {
    conn: Arc<Mutex<Connection>>,
}

impl HolidayRepository {
    /// 创建新的节假日仓储实例
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

    /// 查询指定年份的节假日（按日期升序）
    pub fn list_for_year(&self, year: i32) -> RepositoryResult<Vec<Holiday>> {
        let conn = self.get_conn()?;
        let from = format!("{:04}-01-01", year);
        let to = format!("{:04}-12-31", year);

        let mut stmt = conn.prepare(
            r#"
            SELECT holiday_date, name
            FROM holidays
            WHERE holiday_date BETWEEN ?1 AND ?2
            ORDER BY holiday_date
            "#,
        )?;

        let rows = stmt
            .query_map(params![from, to], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<SqliteResult<Vec<(String, String)>>>()?;

        let mut holidays = Vec::with_capacity(rows.len());
        for (date_str, name) in rows {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                RepositoryError::FieldValueError {
                    field: "holiday_date".to_string(),
                    message: e.to_string(),
                }
            })?;
            holidays.push(Holiday { date, name });
        }

        Ok(holidays)
    }

    /// 插入或更新节假日
    pub fn upsert(&self, holiday: &Holiday) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO holidays (holiday_date, name)
            VALUES (?1, ?2)
            "#,
            params![holiday.date.format("%Y-%m-%d").to_string(), holiday.name],
        )?;
        Ok(())
    }

    /// 删除节假日
    pub fn delete(&self, date: NaiveDate) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n = conn.execute(
            "DELETE FROM holidays WHERE holiday_date = ?1",
            params![date.format("%Y-%m-%d").to_string()],
        )?;
        Ok(n)
    }
}
