// ==========================================
// 救援站勤务排班系统 - 统计 API
// ==========================================
// 职责: 组装聚合配置快照，调用聚合/明细引擎
// 架构: API 层 → 引擎层（纯函数）+ 仓储层（快照读取）
// ==========================================

use crate::api::error::{map_config_error, ApiResult};
use crate::config::ConfigManager;
use crate::domain::stats::{MonthlySeries, PersonMonthly};
use crate::domain::types::{BreakdownFilter, PatternScope, VehicleKind};
use crate::engine::aggregator::{RosterAggregator, RosterStatsConfig};
use crate::engine::breakdown::BreakdownEngine;
use crate::repository::pattern_repo::PatternRepository;
use crate::repository::roster_repo::RosterRepository;
use crate::repository::shift_type_repo::ShiftTypeRepository;
use crate::repository::staff_repo::StaffRepository;
use crate::repository::vehicle_repo::VehicleRepository;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// StatsApi - 统计 API
// ==========================================
pub struct StatsApi {
    roster_repo: Arc<RosterRepository>,
    staff_repo: Arc<StaffRepository>,
    vehicle_repo: Arc<VehicleRepository>,
    pattern_repo: Arc<PatternRepository>,
    shift_type_repo: Arc<ShiftTypeRepository>,
    config_manager: Arc<ConfigManager>,
    aggregator: RosterAggregator,
    breakdown: BreakdownEngine,
}

impl StatsApi {
    /// 创建新的统计 API 实例
    pub fn new(
        roster_repo: Arc<RosterRepository>,
        staff_repo: Arc<StaffRepository>,
        vehicle_repo: Arc<VehicleRepository>,
        pattern_repo: Arc<PatternRepository>,
        shift_type_repo: Arc<ShiftTypeRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            roster_repo,
            staff_repo,
            vehicle_repo,
            pattern_repo,
            shift_type_repo,
            config_manager,
            aggregator: RosterAggregator::new(),
            breakdown: BreakdownEngine::new(),
        }
    }

    /// 组装聚合配置快照
    ///
    /// 一次统计调用内的配置视为一致快照；计算期间的并发
    /// 配置变更不做同步。
    fn build_stats_config(&self, year: i32) -> ApiResult<RosterStatsConfig> {
        let department_code = self
            .config_manager
            .active_department()
            .map_err(map_config_error)?
            .unwrap_or_default();

        Ok(RosterStatsConfig {
            personnel: self.staff_repo.list_personnel()?,
            apprentices: self.staff_repo.list_apprentices()?,
            rtw_vehicles: self.vehicle_repo.list(VehicleKind::Rtw)?,
            nef_vehicles: self.vehicle_repo.list(VehicleKind::Nef)?,
            rtw_activations: self.vehicle_repo.activations(VehicleKind::Rtw, year)?,
            nef_activations: self.vehicle_repo.activations(VehicleKind::Nef, year)?,
            evaluation_modes: self.shift_type_repo.evaluation_modes()?,
            department_code,
            department_sequences: self.pattern_repo.list(PatternScope::Department)?,
        })
    }

    /// 计算指定年份的月度统计序列
    #[instrument(skip(self))]
    pub fn monthly_series(&self, year: i32) -> ApiResult<MonthlySeries> {
        let config = self.build_stats_config(year)?;
        let entries = self.roster_repo.find_by_year(year)?;
        Ok(self.aggregator.compute_monthly_series(year, &entries, &config))
    }

    /// 正式人员明细（H24 / Itw 口径）
    #[instrument(skip(self))]
    pub fn person_breakdown(
        &self,
        year: i32,
        filter: BreakdownFilter,
    ) -> ApiResult<Vec<PersonMonthly>> {
        let entries = self.roster_repo.find_by_year(year)?;
        match filter {
            BreakdownFilter::ApprenticeOperator => {
                let apprentices = self.staff_repo.list_apprentices()?;
                Ok(self.breakdown.apprentice_breakdown(&entries, &apprentices))
            }
            _ => {
                let personnel = self.staff_repo.list_personnel()?;
                let modes = self.shift_type_repo.evaluation_modes()?;
                Ok(self
                    .breakdown
                    .person_breakdown(&entries, &personnel, filter, &modes))
            }
        }
    }

    /// 正式人员综合明细（24h 当量 + ITW 按人合并）
    #[instrument(skip(self))]
    pub fn combined_breakdown(&self, year: i32) -> ApiResult<Vec<PersonMonthly>> {
        let entries = self.roster_repo.find_by_year(year)?;
        let personnel = self.staff_repo.list_personnel()?;
        let modes = self.shift_type_repo.evaluation_modes()?;
        Ok(self.breakdown.combined_breakdown(&entries, &personnel, &modes))
    }
}
