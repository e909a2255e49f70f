// ==========================================
// 救援站勤务排班系统 - 主数据 API
// ==========================================
// 职责: 人员/学员/车辆/值班类型/节假日的主数据维护
// 核心统计只读这些表；增删改全部走此 API
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::holiday::Holiday;
use crate::domain::staff::{Apprentice, Personnel, ShiftType};
use crate::domain::types::{EvaluationMode, VehicleKind};
use crate::domain::vehicle::{Vehicle, VehicleActivation};
use crate::repository::holiday_repo::HolidayRepository;
use crate::repository::shift_type_repo::ShiftTypeRepository;
use crate::repository::staff_repo::StaffRepository;
use crate::repository::vehicle_repo::VehicleRepository;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

// ==========================================
// MasterDataApi - 主数据 API
// ==========================================
pub struct MasterDataApi {
    staff_repo: Arc<StaffRepository>,
    vehicle_repo: Arc<VehicleRepository>,
    shift_type_repo: Arc<ShiftTypeRepository>,
    holiday_repo: Arc<HolidayRepository>,
}

impl MasterDataApi {
    /// 创建新的主数据 API 实例
    pub fn new(
        staff_repo: Arc<StaffRepository>,
        vehicle_repo: Arc<VehicleRepository>,
        shift_type_repo: Arc<ShiftTypeRepository>,
        holiday_repo: Arc<HolidayRepository>,
    ) -> Self {
        Self {
            staff_repo,
            vehicle_repo,
            shift_type_repo,
            holiday_repo,
        }
    }

    // ==========================================
    // 人员 / 学员
    // ==========================================

    /// 查询全部正式人员（规范顺序）
    pub fn list_personnel(&self) -> ApiResult<Vec<Personnel>> {
        Ok(self.staff_repo.list_personnel()?)
    }

    /// 查询全部学员（规范顺序）
    pub fn list_apprentices(&self) -> ApiResult<Vec<Apprentice>> {
        Ok(self.staff_repo.list_apprentices()?)
    }

    /// 插入或更新正式人员
    pub fn upsert_personnel(&self, person: Personnel) -> ApiResult<()> {
        if person.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("人员姓名不能为空".to_string()));
        }
        Ok(self.staff_repo.upsert_personnel(&person)?)
    }

    /// 插入或更新学员
    pub fn upsert_apprentice(&self, apprentice: Apprentice) -> ApiResult<()> {
        if apprentice.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("学员姓名不能为空".to_string()));
        }
        Ok(self.staff_repo.upsert_apprentice(&apprentice)?)
    }

    /// 删除正式人员
    pub fn delete_personnel(&self, id: i64) -> ApiResult<usize> {
        Ok(self.staff_repo.delete_personnel(id)?)
    }

    /// 删除学员
    pub fn delete_apprentice(&self, id: i64) -> ApiResult<usize> {
        Ok(self.staff_repo.delete_apprentice(id)?)
    }

    // ==========================================
    // 车辆
    // ==========================================

    /// 按类别查询车辆
    pub fn list_vehicles(&self, kind: VehicleKind) -> ApiResult<Vec<Vehicle>> {
        Ok(self.vehicle_repo.list(kind)?)
    }

    /// 插入或更新车辆
    pub fn upsert_vehicle(&self, vehicle: Vehicle) -> ApiResult<()> {
        if vehicle.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("车辆名称不能为空".to_string()));
        }
        Ok(self.vehicle_repo.upsert(&vehicle)?)
    }

    /// 设置车辆归档标记
    pub fn set_vehicle_archived(&self, vehicle_id: i64, archived: bool) -> ApiResult<()> {
        Ok(self.vehicle_repo.set_archived(vehicle_id, archived)?)
    }

    /// 查询某类别车辆的年度启用标记
    pub fn vehicle_activations(
        &self,
        kind: VehicleKind,
        year: i32,
    ) -> ApiResult<Vec<VehicleActivation>> {
        Ok(self.vehicle_repo.activations(kind, year)?)
    }

    /// 设置车辆月度启用标记
    pub fn set_vehicle_activation(
        &self,
        vehicle_id: i64,
        year: i32,
        month: u32,
        enabled: bool,
    ) -> ApiResult<()> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!("月份超出范围: {}", month)));
        }
        Ok(self
            .vehicle_repo
            .set_activation(vehicle_id, year, month, enabled)?)
    }

    // ==========================================
    // 值班类型与统计口径
    // ==========================================

    /// 查询全部值班类型
    pub fn list_shift_types(&self) -> ApiResult<Vec<ShiftType>> {
        Ok(self.shift_type_repo.list()?)
    }

    /// 插入或更新值班类型
    pub fn upsert_shift_type(&self, shift_type: ShiftType) -> ApiResult<()> {
        if shift_type.code.trim().is_empty() {
            return Err(ApiError::InvalidInput("值班代码不能为空".to_string()));
        }
        Ok(self.shift_type_repo.upsert(&shift_type)?)
    }

    /// 删除值班类型（统计口径配置一并删除）
    pub fn delete_shift_type(&self, code: &str) -> ApiResult<usize> {
        Ok(self.shift_type_repo.delete(code)?)
    }

    /// 查询全部统计口径配置（未出现的代码语义为 off）
    pub fn evaluation_modes(&self) -> ApiResult<HashMap<String, EvaluationMode>> {
        Ok(self.shift_type_repo.evaluation_modes()?)
    }

    /// 设置单个代码的统计口径
    ///
    /// 未知口径字符串按 off 处理（宽容，不报错）。
    pub fn set_evaluation_mode(&self, code: &str, mode: &str) -> ApiResult<()> {
        if code.trim().is_empty() {
            return Err(ApiError::InvalidInput("值班代码不能为空".to_string()));
        }
        let mode = EvaluationMode::from_str(mode);
        Ok(self.shift_type_repo.set_evaluation_mode(code.trim(), mode)?)
    }

    // ==========================================
    // 节假日
    // ==========================================

    /// 查询指定年份的节假日
    pub fn list_holidays(&self, year: i32) -> ApiResult<Vec<Holiday>> {
        Ok(self.holiday_repo.list_for_year(year)?)
    }

    /// 插入或更新节假日
    pub fn upsert_holiday(&self, holiday: Holiday) -> ApiResult<()> {
        Ok(self.holiday_repo.upsert(&holiday)?)
    }

    /// 删除节假日
    pub fn delete_holiday(&self, date: NaiveDate) -> ApiResult<usize> {
        Ok(self.holiday_repo.delete(date)?)
    }
}
