// ==========================================
// 救援站勤务排班系统 - 排班条目仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 关键约束: (person_id, person_kind, entry_date) 为 upsert 键，
// 值班代码与班位标签分列存储、分路更新互不干扰。
// ==========================================

use crate::domain::roster::{PersonRef, RosterEntry};
use crate::domain::types::PersonKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// RosterRepository - 排班条目仓储
// ==========================================

/// 排班条目仓储
/// 职责: 管理 duty_roster 表的读写
pub struct RosterRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RosterRepository {
    /// 创建新的排班仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> SqliteResult<RosterEntry> {
        Ok(RosterEntry {
            person_id: row.get(0)?,
            person_kind: PersonKind::from_str(&row.get::<_, String>(1)?),
            date: NaiveDate::parse_from_str(&row.get::<_, String>(2)?, "%Y-%m-%d")
                .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
            value: row.get(3)?,
            entry_type: row.get(4)?,
        })
    }

    /// 查询指定年份的全部排班条目
    ///
    /// # 返回
    /// - Ok(Vec<RosterEntry>): 按日期/类别/人员排序的条目列表
    pub fn find_by_year(&self, year: i32) -> RepositoryResult<Vec<RosterEntry>> {
        let conn = self.get_conn()?;
        let from = format!("{:04}-01-01", year);
        let to = format!("{:04}-12-31", year);

        let mut stmt = conn.prepare(
            r#"
            SELECT person_id, person_kind, entry_date, value, entry_type
            FROM duty_roster
            WHERE entry_date BETWEEN ?1 AND ?2
            ORDER BY entry_date, person_kind, person_id
            "#,
        )?;

        let entries = stmt
            .query_map(params![from, to], Self::map_row)?
            .collect::<SqliteResult<Vec<RosterEntry>>>()?;

        Ok(entries)
    }

    /// 查询单条排班条目
    pub fn find_one(&self, person: PersonRef, date: NaiveDate) -> RepositoryResult<Option<RosterEntry>> {
        let conn = self.get_conn()?;
        let date_str = date.format("%Y-%m-%d").to_string();

        let mut stmt = conn.prepare(
            r#"
            SELECT person_id, person_kind, entry_date, value, entry_type
            FROM duty_roster
            WHERE person_id = ?1 AND person_kind = ?2 AND entry_date = ?3
            "#,
        )?;

        let entry = stmt
            .query_row(params![person.id, person.kind.to_db_str(), date_str], Self::map_row)
            .optional()?;

        Ok(entry)
    }

    /// 查询指定日期持有某班位的人员列表
    ///
    /// 用于班位写入前的占用提示（后写覆盖，不做唯一性约束）。
    pub fn find_slot_holders(
        &self,
        date: NaiveDate,
        slot_type: &str,
    ) -> RepositoryResult<Vec<PersonRef>> {
        let conn = self.get_conn()?;
        let date_str = date.format("%Y-%m-%d").to_string();

        let mut stmt = conn.prepare(
            r#"
            SELECT person_id, person_kind
            FROM duty_roster
            WHERE entry_date = ?1 AND entry_type = ?2
            ORDER BY person_kind, person_id
            "#,
        )?;

        let holders = stmt
            .query_map(params![date_str, slot_type], |row| {
                Ok(PersonRef {
                    id: row.get(0)?,
                    kind: PersonKind::from_str(&row.get::<_, String>(1)?),
                })
            })?
            .collect::<SqliteResult<Vec<PersonRef>>>()?;

        Ok(holders)
    }

    /// 值班代码 upsert（保留 entry_type）
    ///
    /// 已有记录只更新 value；无记录则插入，entry_type 置空。
    pub fn upsert_duty_code(
        &self,
        person: PersonRef,
        date: NaiveDate,
        value: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let date_str = date.format("%Y-%m-%d").to_string();

        conn.execute(
            r#"
            INSERT INTO duty_roster (person_id, person_kind, entry_date, value, entry_type)
            VALUES (?1, ?2, ?3, ?4, '')
            ON CONFLICT(person_id, person_kind, entry_date)
            DO UPDATE SET value = excluded.value
            "#,
            params![person.id, person.kind.to_db_str(), date_str, value],
        )?;

        Ok(())
    }

    /// 班位 upsert（保留 value）
    ///
    /// 已有记录只更新 entry_type；无记录则插入，value 置空。
    /// slot_type 为空串即清除班位（记录保留，值班代码不丢失）。
    pub fn upsert_slot(
        &self,
        person: PersonRef,
        date: NaiveDate,
        slot_type: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let date_str = date.format("%Y-%m-%d").to_string();

        conn.execute(
            r#"
            INSERT INTO duty_roster (person_id, person_kind, entry_date, value, entry_type)
            VALUES (?1, ?2, ?3, '', ?4)
            ON CONFLICT(person_id, person_kind, entry_date)
            DO UPDATE SET entry_type = excluded.entry_type
            "#,
            params![person.id, person.kind.to_db_str(), date_str, slot_type],
        )?;

        Ok(())
    }

    /// 按年份/月份区间批量清除排班条目
    ///
    /// # 参数
    /// - year: 年份
    /// - month_from / month_to: 月份区间 (1..=12, 含端点)
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数
    pub fn delete_range(
        &self,
        year: i32,
        month_from: u32,
        month_to: u32,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let from = format!("{:04}-{:02}-01", year, month_from);
        // 月末用下月首日的开区间表示，避免手写各月天数
        let (to_year, to_month) = if month_to == 12 {
            (year + 1, 1)
        } else {
            (year, month_to + 1)
        };
        let to = format!("{:04}-{:02}-01", to_year, to_month);

        let deleted = conn.execute(
            "DELETE FROM duty_roster WHERE entry_date >= ?1 AND entry_date < ?2",
            params![from, to],
        )?;

        Ok(deleted)
    }
}
