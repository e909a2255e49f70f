// ==========================================
// 救援站勤务排班系统 - 车辆仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::types::VehicleKind;
use crate::domain::vehicle::{Vehicle, VehicleActivation};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// VehicleRepository - 车辆仓储
// ==========================================

/// 车辆仓储
/// 职责: 管理 vehicles / vehicle_activation 表的 CRUD 操作
pub struct VehicleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl VehicleRepository {
    /// 创建新的车辆仓储实例
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

    fn map_vehicle(row: &Row) -> SqliteResult<Vehicle> {
        let kind_str: String = row.get(1)?;
        Ok(Vehicle {
            id: row.get(0)?,
            // 未知类别按 RTW 处理（宽容读取，不让脏数据打断统计）
            kind: VehicleKind::from_str(&kind_str).unwrap_or(VehicleKind::Rtw),
            name: row.get(2)?,
            archived: row.get::<_, i64>(3)? != 0,
        })
    }

    /// 按类别查询车辆（含归档车辆，调用方按需过滤）
    pub fn list(&self, kind: VehicleKind) -> RepositoryResult<Vec<Vehicle>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, kind, name, archived
            FROM vehicles
            WHERE kind = ?1
            ORDER BY id
            "#,
        )?;
        let list = stmt
            .query_map(params![kind.to_db_str()], Self::map_vehicle)?
            .collect::<SqliteResult<Vec<Vehicle>>>()?;
        Ok(list)
    }

    /// 插入或更新车辆
    pub fn upsert(&self, vehicle: &Vehicle) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO vehicles (id, kind, name, archived)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                vehicle.id,
                vehicle.kind.to_db_str(),
                vehicle.name,
                vehicle.archived as i64,
            ],
        )?;
        Ok(())
    }

    /// 设置车辆归档标记
    pub fn set_archived(&self, vehicle_id: i64, archived: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let n = conn.execute(
            "UPDATE vehicles SET archived = ?2 WHERE id = ?1",
            params![vehicle_id, archived as i64],
        )?;
        if n == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Vehicle".to_string(),
                id: vehicle_id.to_string(),
            });
        }
        Ok(())
    }

    /// 查询某类别车辆指定年份的启用标记
    ///
    /// 未配置的 (车辆, 月) 不返回记录，语义为默认启用。
    pub fn activations(
        &self,
        kind: VehicleKind,
        year: i32,
    ) -> RepositoryResult<Vec<VehicleActivation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT a.vehicle_id, a.year, a.month, a.enabled
            FROM vehicle_activation a
            JOIN vehicles v ON v.id = a.vehicle_id
            WHERE v.kind = ?1 AND a.year = ?2
            ORDER BY a.vehicle_id, a.month
            "#,
        )?;
        let list = stmt
            .query_map(params![kind.to_db_str(), year], |row| {
                Ok(VehicleActivation {
                    vehicle_id: row.get(0)?,
                    year: row.get(1)?,
                    month: row.get(2)?,
                    enabled: row.get::<_, i64>(3)? != 0,
                })
            })?
            .collect::<SqliteResult<Vec<VehicleActivation>>>()?;
        Ok(list)
    }

    /// 设置车辆月度启用标记（upsert）
    pub fn set_activation(
        &self,
        vehicle_id: i64,
        year: i32,
        month: u32,
        enabled: bool,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO vehicle_activation (vehicle_id, year, month, enabled)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(vehicle_id, year, month)
            DO UPDATE SET enabled = excluded.enabled
            "#,
            params![vehicle_id, year, month, enabled as i64],
        )?;
        Ok(())
    }
}
