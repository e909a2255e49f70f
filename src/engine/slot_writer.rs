// ==========================================
// 救援站勤务排班系统 - 班位写入引擎
// ==========================================
// 职责: 以 (人员, 日期) 为键 upsert 轮值班位，
// 不触碰该人员当日的值班代码。
// 文法校验只在此边界做一次: 非空班位必须可解析为
// SlotTag，否则拒绝写入。
// ==========================================
// 已知设计缺口: 同一班位/日期可被不同人员先后占用，
// 后写覆盖，无并发仲裁；写入前仅做占用告警。
// ==========================================

use crate::domain::roster::PersonRef;
use crate::domain::slot::SlotTag;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::roster_repo::RosterRepository;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{instrument, warn};

// ==========================================
// SlotAssignmentWriter - 班位写入引擎
// ==========================================
pub struct SlotAssignmentWriter {
    roster_repo: Arc<RosterRepository>,
}

impl SlotAssignmentWriter {
    /// 创建新的班位写入引擎
    pub fn new(roster_repo: Arc<RosterRepository>) -> Self {
        Self { roster_repo }
    }

    /// 为人员在指定日期写入轮值班位
    ///
    /// 语义:
    /// - 已有记录 → 仅更新 entry_type，value 保持不变
    /// - 无记录 → 插入新记录，value 置空
    /// - slot_type 为空串 → 清除班位（记录保留，值班代码不丢失）
    ///
    /// # 错误
    /// - ValidationError: 非空 slot_type 不符合班位文法
    #[instrument(skip(self))]
    pub fn assign_slot(
        &self,
        person: PersonRef,
        date: NaiveDate,
        slot_type: &str,
    ) -> RepositoryResult<()> {
        let trimmed = slot_type.trim();

        if !trimmed.is_empty() {
            if SlotTag::parse(trimmed).is_none() {
                return Err(RepositoryError::ValidationError(format!(
                    "非法班位标签: {}",
                    trimmed
                )));
            }

            // 占用提示: 同一班位/日期后写覆盖
            let holders = self.roster_repo.find_slot_holders(date, trimmed)?;
            if holders.iter().any(|h| *h != person) {
                warn!(
                    slot = trimmed,
                    date = %date,
                    "班位已被其他人员占用，后写覆盖"
                );
            }
        }

        self.roster_repo.upsert_slot(person, date, trimmed)
    }

    /// 清除人员在指定日期的班位
    pub fn clear_slot(&self, person: PersonRef, date: NaiveDate) -> RepositoryResult<()> {
        self.assign_slot(person, date, "")
    }
}
