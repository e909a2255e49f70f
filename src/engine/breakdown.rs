// ==========================================
// 救援站勤务排班系统 - 人员明细统计引擎
// ==========================================
// 职责: 将同一份排班条目按不同口径重聚合为
// 人员 × 月份 的计数矩阵。
// 口径约定:
// - 每个配置的实体都出现在输出中（全零行不省略），
//   顺序为实体列表的规范顺序
// - H24 / Itw 口径面向正式人员，ApprenticeOperator
//   口径面向学员
// ==========================================

use crate::domain::roster::RosterEntry;
use crate::domain::staff::{Apprentice, Personnel};
use crate::domain::stats::PersonMonthly;
use crate::domain::types::{BreakdownFilter, EvaluationMode, PersonKind};
use std::collections::HashMap;
use tracing::instrument;

// ==========================================
// BreakdownEngine - 人员明细统计引擎
// ==========================================
pub struct BreakdownEngine;

impl BreakdownEngine {
    /// 创建新的明细统计引擎
    pub fn new() -> Self {
        Self
    }

    /// 正式人员明细（H24 或 Itw 口径）
    #[instrument(skip(self, entries, personnel, modes), fields(entry_count = entries.len()))]
    pub fn person_breakdown(
        &self,
        entries: &[RosterEntry],
        personnel: &[Personnel],
        filter: BreakdownFilter,
        modes: &HashMap<String, EvaluationMode>,
    ) -> Vec<PersonMonthly> {
        let entities: Vec<(i64, String)> = personnel
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect();
        self.per_entity_monthly(entries, &entities, PersonKind::Person, filter, modes)
    }

    /// 学员明细（ApprenticeOperator 口径）
    #[instrument(skip(self, entries, apprentices), fields(entry_count = entries.len()))]
    pub fn apprentice_breakdown(
        &self,
        entries: &[RosterEntry],
        apprentices: &[Apprentice],
    ) -> Vec<PersonMonthly> {
        let entities: Vec<(i64, String)> = apprentices
            .iter()
            .map(|a| (a.id, a.name.clone()))
            .collect();
        self.per_entity_monthly(
            entries,
            &entities,
            PersonKind::Apprentice,
            BreakdownFilter::ApprenticeOperator,
            &HashMap::new(),
        )
    }

    /// 综合明细: H24 与 Itw 两份明细按人员逐月相加
    pub fn combined_breakdown(
        &self,
        entries: &[RosterEntry],
        personnel: &[Personnel],
        modes: &HashMap<String, EvaluationMode>,
    ) -> Vec<PersonMonthly> {
        let h24 = self.person_breakdown(entries, personnel, BreakdownFilter::H24, modes);
        let itw = self.person_breakdown(entries, personnel, BreakdownFilter::Itw, modes);

        // 两份明细实体集合与顺序一致，可按下标合并
        h24.into_iter()
            .zip(itw)
            .map(|(mut row, itw_row)| {
                for m in 0..12 {
                    row.counts[m] += itw_row.counts[m];
                }
                row
            })
            .collect()
    }

    /// 按口径重聚合为实体 × 月份计数
    fn per_entity_monthly(
        &self,
        entries: &[RosterEntry],
        entities: &[(i64, String)],
        kind: PersonKind,
        filter: BreakdownFilter,
        modes: &HashMap<String, EvaluationMode>,
    ) -> Vec<PersonMonthly> {
        // 先为每个实体建零行，保证无活动实体也出现
        let mut rows: Vec<PersonMonthly> = entities
            .iter()
            .map(|(id, name)| PersonMonthly::zero(*id, name.clone()))
            .collect();
        let index_by_id: HashMap<i64, usize> = entities
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (*id, i))
            .collect();

        for entry in entries {
            if entry.person_kind != kind {
                continue;
            }
            if !Self::entry_matches(entry, filter, modes) {
                continue;
            }
            if let Some(&i) = index_by_id.get(&entry.person_id) {
                rows[i].counts[entry.month0()] += 1;
            }
        }

        rows
    }

    /// 条目是否命中口径
    fn entry_matches(
        entry: &RosterEntry,
        filter: BreakdownFilter,
        modes: &HashMap<String, EvaluationMode>,
    ) -> bool {
        match filter {
            BreakdownFilter::H24 => entry.evaluation_mode(modes) == EvaluationMode::H24,
            BreakdownFilter::Itw => {
                entry.slot_tag().map_or(false, |tag| tag.is_itw())
                    || entry.evaluation_mode(modes) == EvaluationMode::Itw
            }
            BreakdownFilter::ApprenticeOperator => {
                entry.slot_tag().map_or(false, |tag| tag.is_operator())
            }
        }
    }
}

impl Default for BreakdownEngine {
    fn default() -> Self {
        Self::new()
    }
}
