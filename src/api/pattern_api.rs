// ==========================================
// 救援站勤务排班系统 - 班制 API
// ==========================================
// 职责: 班制序列配置（整体替换式保存）、
// 日期类别解析、值勤日查询
// ==========================================

use crate::api::error::{map_config_error, ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::pattern::{PatternSequence, ITW_CATEGORY};
use crate::domain::stats::DutyDay;
use crate::domain::types::PatternScope;
use crate::engine::duty_days::DutyDayCalculator;
use crate::engine::pattern_resolver::PatternResolver;
use crate::repository::pattern_repo::PatternRepository;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

// ==========================================
// PatternSequenceInput - 保存请求载荷
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSequenceInput {
    /// 生效日期 (YYYY-MM-DD)
    pub start_date: String,

    /// 循环数组原始单元格（长度不限，保存时归一化到 21）
    pub cells: Vec<String>,
}

// ==========================================
// PatternApi - 班制 API
// ==========================================
pub struct PatternApi {
    pattern_repo: Arc<PatternRepository>,
    config_manager: Arc<ConfigManager>,
    resolver: PatternResolver,
    calculator: DutyDayCalculator,
}

impl PatternApi {
    /// 创建新的班制 API 实例
    pub fn new(pattern_repo: Arc<PatternRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            pattern_repo,
            config_manager,
            resolver: PatternResolver::new(),
            calculator: DutyDayCalculator::new(),
        }
    }

    /// 查询某范围的全部班制序列
    pub fn list_patterns(&self, scope: PatternScope) -> ApiResult<Vec<PatternSequence>> {
        Ok(self.pattern_repo.list(scope)?)
    }

    /// 整体替换某范围的班制序列集合
    ///
    /// 约束: 生效日期在集合内唯一；单元格归一化
    /// （补空/截断/类别码校验）在保存时完成。
    pub fn save_patterns(
        &self,
        scope: PatternScope,
        inputs: Vec<PatternSequenceInput>,
    ) -> ApiResult<usize> {
        let mut seen_dates: HashSet<NaiveDate> = HashSet::new();
        let mut sequences = Vec::with_capacity(inputs.len());

        for input in inputs {
            let start_date = NaiveDate::parse_from_str(&input.start_date, "%Y-%m-%d")
                .map_err(|e| {
                    ApiError::InvalidInput(format!(
                        "生效日期格式错误（应为YYYY-MM-DD）: {} ({})",
                        input.start_date, e
                    ))
                })?;
            if !seen_dates.insert(start_date) {
                return Err(ApiError::InvalidInput(format!(
                    "生效日期重复: {}",
                    start_date
                )));
            }
            sequences.push(PatternSequence::new(start_date, input.cells, scope));
        }

        Ok(self.pattern_repo.replace_all(scope, &sequences)?)
    }

    /// 解析指定日期的班制类别码
    pub fn resolve_category(&self, scope: PatternScope, date: NaiveDate) -> ApiResult<Option<String>> {
        let sequences = self.pattern_repo.list(scope)?;
        Ok(self.resolver.resolve_category(date, &sequences))
    }

    /// 当前部门的全年值勤日（按月份分组）
    ///
    /// 未配置部门编号时返回 12 个空桶（零贡献，不报错）。
    pub fn duty_days_for_year(&self, year: i32) -> ApiResult<Vec<Vec<DutyDay>>> {
        let department = self
            .config_manager
            .active_department()
            .map_err(map_config_error)?
            .unwrap_or_default();
        let sequences = self.pattern_repo.list(PatternScope::Department)?;
        Ok(self
            .calculator
            .duty_days_for_year(year, &department, &sequences))
    }

    /// ITW 全年值勤日（按月份分组）
    pub fn itw_duty_days_for_year(&self, year: i32) -> ApiResult<Vec<Vec<DutyDay>>> {
        let sequences = self.pattern_repo.list(PatternScope::Itw)?;
        Ok(self
            .calculator
            .duty_days_for_year(year, ITW_CATEGORY, &sequences))
    }
}
