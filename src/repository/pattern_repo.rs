// ==========================================
// 救援站勤务排班系统 - 班制序列仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 生命周期约束: 保存即整体替换（先删后插，单事务），
// 不做部分更新；读取总是面向完整当前集合。
// ==========================================

use crate::domain::pattern::PatternSequence;
use crate::domain::types::PatternScope;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// PatternRepository - 班制序列仓储
// ==========================================

/// 班制序列仓储
/// 职责: 管理 duty_patterns 表（pattern 以 JSON 列存储）
pub struct PatternRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PatternRepository {
    /// 创建新的班制仓储实例
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

    /// 查询某范围的全部班制序列（按生效日期升序）
    ///
    /// 读取时再次归一化，保证旧数据也满足固定长度约定。
    pub fn list(&self, scope: PatternScope) -> RepositoryResult<Vec<PatternSequence>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT start_date, pattern_json
            FROM duty_patterns
            WHERE scope = ?1
            ORDER BY start_date
            "#,
        )?;

        let rows = stmt
            .query_map(params![scope.to_db_str()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<SqliteResult<Vec<(String, String)>>>()?;

        let mut sequences = Vec::with_capacity(rows.len());
        for (date_str, pattern_json) in rows {
            let start_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| RepositoryError::FieldValueError {
                    field: "start_date".to_string(),
                    message: e.to_string(),
                })?;
            let cells: Vec<String> = serde_json::from_str(&pattern_json)
                .map_err(|e| RepositoryError::FieldValueError {
                    field: "pattern_json".to_string(),
                    message: e.to_string(),
                })?;
            sequences.push(PatternSequence::new(start_date, cells, scope));
        }

        Ok(sequences)
    }

    /// 整体替换某范围的班制序列集合（单事务: 先删后插）
    ///
    /// # 返回
    /// - Ok(usize): 写入的序列数
    pub fn replace_all(
        &self,
        scope: PatternScope,
        sequences: &[PatternSequence],
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            "DELETE FROM duty_patterns WHERE scope = ?1",
            params![scope.to_db_str()],
        )?;

        let mut inserted = 0;
        for seq in sequences {
            let pattern_json = serde_json::to_string(&seq.pattern)
                .map_err(|e| RepositoryError::InternalError(e.to_string()))?;
            inserted += tx.execute(
                r#"
                INSERT INTO duty_patterns (scope, start_date, pattern_json)
                VALUES (?1, ?2, ?3)
                "#,
                params![
                    scope.to_db_str(),
                    seq.start_date.format("%Y-%m-%d").to_string(),
                    pattern_json,
                ],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(inserted)
    }
}
