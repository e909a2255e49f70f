// ==========================================
// 救援站勤务排班系统 - 排班 API
// ==========================================
// 职责: 排班条目读写、班位写入、区间清除、
// 班位候选人查询
// 架构: API 层 → 引擎层 / 仓储层
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::roster::{PersonRef, RosterEntry};
use crate::domain::slot::SlotTag;
use crate::domain::staff::Personnel;
use crate::domain::types::PersonKind;
use crate::engine::eligibility::EligibilityEngine;
use crate::engine::slot_writer::SlotAssignmentWriter;
use crate::repository::roster_repo::RosterRepository;
use crate::repository::shift_type_repo::ShiftTypeRepository;
use crate::repository::staff_repo::StaffRepository;
use chrono::NaiveDate;
use std::sync::Arc;

/// 可接受的年份范围（防御非法表单输入）
const YEAR_MIN: i32 = 1970;
const YEAR_MAX: i32 = 2100;

// ==========================================
// RosterApi - 排班 API
// ==========================================
pub struct RosterApi {
    roster_repo: Arc<RosterRepository>,
    staff_repo: Arc<StaffRepository>,
    shift_type_repo: Arc<ShiftTypeRepository>,
    slot_writer: SlotAssignmentWriter,
    eligibility: EligibilityEngine,
}

impl RosterApi {
    /// 创建新的排班 API 实例
    pub fn new(
        roster_repo: Arc<RosterRepository>,
        staff_repo: Arc<StaffRepository>,
        shift_type_repo: Arc<ShiftTypeRepository>,
    ) -> Self {
        let slot_writer = SlotAssignmentWriter::new(roster_repo.clone());
        Self {
            roster_repo,
            staff_repo,
            shift_type_repo,
            slot_writer,
            eligibility: EligibilityEngine::new(),
        }
    }

    fn validate_year(year: i32) -> ApiResult<()> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(ApiError::InvalidInput(format!("年份超出范围: {}", year)));
        }
        Ok(())
    }

    /// 查询指定年份的全部排班条目
    pub fn get_duty_roster(&self, year: i32) -> ApiResult<Vec<RosterEntry>> {
        Self::validate_year(year)?;
        Ok(self.roster_repo.find_by_year(year)?)
    }

    /// 查询单条排班条目
    pub fn get_entry(
        &self,
        person_id: i64,
        person_kind: PersonKind,
        date: NaiveDate,
    ) -> ApiResult<Option<RosterEntry>> {
        let person = PersonRef {
            id: person_id,
            kind: person_kind,
        };
        Ok(self.roster_repo.find_one(person, date)?)
    }

    /// 值班代码 upsert（保留班位标签）
    pub fn set_duty_entry(
        &self,
        person_id: i64,
        person_kind: PersonKind,
        date: NaiveDate,
        value: &str,
    ) -> ApiResult<()> {
        let person = PersonRef {
            id: person_id,
            kind: person_kind,
        };
        Ok(self.roster_repo.upsert_duty_code(person, date, value.trim())?)
    }

    /// 班位写入（保留值班代码；空串即清除班位）
    pub fn assign_slot(
        &self,
        person_id: i64,
        person_kind: PersonKind,
        date: NaiveDate,
        slot_type: &str,
    ) -> ApiResult<()> {
        let person = PersonRef {
            id: person_id,
            kind: person_kind,
        };
        Ok(self.slot_writer.assign_slot(person, date, slot_type)?)
    }

    /// 按年份/月份区间批量清除排班条目
    pub fn clear_range(&self, year: i32, month_from: u32, month_to: u32) -> ApiResult<usize> {
        Self::validate_year(year)?;
        if !(1..=12).contains(&month_from) || !(1..=12).contains(&month_to) {
            return Err(ApiError::InvalidInput(format!(
                "月份超出范围: {}..{}",
                month_from, month_to
            )));
        }
        if month_from > month_to {
            return Err(ApiError::InvalidInput(format!(
                "月份区间颠倒: {} > {}",
                month_from, month_to
            )));
        }
        Ok(self.roster_repo.delete_range(year, month_from, month_to)?)
    }

    /// 查询指定日期某班位的候选正式人员
    ///
    /// 候选条件:
    /// 1. 能力标记满足班位门槛（司机位/NEF 位）
    /// 2. 当日值班代码的统计口径能覆盖该班位
    ///    （24h 覆盖白夜班位；itw 班位仅 itw 口径）
    pub fn eligible_persons_for_slot(
        &self,
        date: NaiveDate,
        slot_type: &str,
    ) -> ApiResult<Vec<Personnel>> {
        let slot = SlotTag::parse(slot_type)
            .ok_or_else(|| ApiError::InvalidInput(format!("非法班位标签: {}", slot_type)))?;

        let personnel = self.staff_repo.list_personnel()?;
        let modes = self.shift_type_repo.evaluation_modes()?;

        let mut eligible = Vec::new();
        for person in personnel {
            if !self.eligibility.person_qualified(&person, &slot) {
                continue;
            }
            let entry = self
                .roster_repo
                .find_one(PersonRef::person(person.id), date)?;
            let mode = match entry {
                Some(e) => e.evaluation_mode(&modes),
                None => continue, // 当日无排班即不候选
            };
            if self.eligibility.allowed_by_evaluation(mode, &slot) {
                eligible.push(person);
            }
        }

        Ok(eligible)
    }
}
