// ==========================================
// 救援站勤务排班系统 - 值勤日推导引擎
// ==========================================
// 职责: 对指定年份逐日解析班制，按月份分组
// 输出与指定类别码匹配的值勤日。
// 纯函数: 同一 (年份, 类别码, 序列集合) 输出恒定，无 I/O。
// ==========================================

use crate::domain::pattern::PatternSequence;
use crate::domain::stats::DutyDay;
use crate::engine::pattern_resolver::PatternResolver;
use chrono::{Datelike, NaiveDate};
use tracing::instrument;

// ==========================================
// DutyDayCalculator - 值勤日推导引擎
// ==========================================
pub struct DutyDayCalculator {
    resolver: PatternResolver,
}

impl DutyDayCalculator {
    /// 创建新的值勤日推导引擎
    pub fn new() -> Self {
        Self {
            resolver: PatternResolver::new(),
        }
    }

    /// 推导指定年份的值勤日，按月份分组
    ///
    /// # 参数
    /// - year: 年份 (1 月 1 日至 12 月 31 日，闰年由 chrono 日历处理)
    /// - category_code: 目标类别码（部门编号或 ITW 标记）
    /// - sequences: 班制序列集合
    ///
    /// # 返回
    /// 12 个月份桶 (下标 0 = 一月)；每个日期至多出现在一个桶中。
    #[instrument(skip(self, sequences), fields(seq_count = sequences.len()))]
    pub fn duty_days_for_year(
        &self,
        year: i32,
        category_code: &str,
        sequences: &[PatternSequence],
    ) -> Vec<Vec<DutyDay>> {
        let mut months: Vec<Vec<DutyDay>> = vec![Vec::new(); 12];

        if category_code.is_empty() || sequences.is_empty() {
            return months;
        }

        for month in 1..=12u32 {
            let mut day = 1u32;
            while let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                if let Some(resolved) = self.resolver.resolve_category(date, sequences) {
                    if resolved == category_code {
                        months[(month - 1) as usize].push(DutyDay {
                            day,
                            weekday: date.weekday().to_string(),
                        });
                    }
                }
                day += 1;
            }
        }

        months
    }

    /// 各月值勤日数
    pub fn duty_day_counts(months: &[Vec<DutyDay>]) -> [u32; 12] {
        let mut counts = [0u32; 12];
        for (i, bucket) in months.iter().take(12).enumerate() {
            counts[i] = bucket.len() as u32;
        }
        counts
    }
}

impl Default for DutyDayCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pattern::{PATTERN_LENGTH, ITW_CATEGORY};
    use crate::domain::types::PatternScope;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 1970-01-01 起的 21 槽序列: "1","2","3","1","2","3",...
    fn epoch_sequence() -> PatternSequence {
        let cells: Vec<String> = (0..PATTERN_LENGTH)
            .map(|i| ((i % 3) + 1).to_string())
            .collect();
        PatternSequence::new(date(1970, 1, 1), cells, PatternScope::Department)
    }

    #[test]
    fn test_partition_property() {
        // 分组是一个划分：各月桶内日期互不重复，
        // 总数等于全年命中该类别码的日期数
        let calc = DutyDayCalculator::new();
        let seqs = vec![epoch_sequence()];
        let months = calc.duty_days_for_year(2025, "2", &seqs);

        assert_eq!(months.len(), 12);

        let resolver = PatternResolver::new();
        let mut expected = 0u32;
        let mut d = date(2025, 1, 1);
        while d <= date(2025, 12, 31) {
            if resolver.resolve_category(d, &seqs).as_deref() == Some("2") {
                expected += 1;
            }
            d = d.succ_opt().unwrap();
        }

        let total: u32 = DutyDayCalculator::duty_day_counts(&months).iter().sum();
        assert_eq!(total, expected);

        // 桶内日号唯一
        for bucket in &months {
            let mut days: Vec<u32> = bucket.iter().map(|d| d.day).collect();
            let before = days.len();
            days.dedup();
            assert_eq!(days.len(), before);
        }
    }

    #[test]
    fn test_january_matches_modular_arithmetic() {
        // 场景: 1970-01-01 起的 21 循环，部门 "2"，2025 年 1 月
        // 命中数必须等于 (自序列起始的天数 mod 21) 槽位为 "2" 的 1 月日期数
        let calc = DutyDayCalculator::new();
        let seqs = vec![epoch_sequence()];
        let months = calc.duty_days_for_year(2025, "2", &seqs);

        let epoch = date(1970, 1, 1);
        let mut expected = 0usize;
        for day in 1..=31u32 {
            let d = date(2025, 1, day);
            let offset = d.signed_duration_since(epoch).num_days();
            let idx = offset.rem_euclid(PATTERN_LENGTH as i64) as usize;
            if (idx % 3) + 1 == 2 {
                expected += 1;
            }
        }

        assert_eq!(months[0].len(), expected);
    }

    #[test]
    fn test_leap_year_february() {
        // 全类别命中时 2 月桶应为 29 天（2024 为闰年）
        let cells: Vec<String> = vec!["5".to_string(); PATTERN_LENGTH];
        let seqs = vec![PatternSequence::new(
            date(1970, 1, 1),
            cells,
            PatternScope::Department,
        )];
        let calc = DutyDayCalculator::new();

        let months = calc.duty_days_for_year(2024, "5", &seqs);
        assert_eq!(months[1].len(), 29);

        let months = calc.duty_days_for_year(2025, "5", &seqs);
        assert_eq!(months[1].len(), 28);
    }

    #[test]
    fn test_empty_inputs_yield_empty_buckets() {
        let calc = DutyDayCalculator::new();

        let months = calc.duty_days_for_year(2025, "2", &[]);
        assert!(months.iter().all(|m| m.is_empty()));

        let months = calc.duty_days_for_year(2025, "", &[epoch_sequence()]);
        assert!(months.iter().all(|m| m.is_empty()));
    }

    #[test]
    fn test_itw_scope_days() {
        // ITW 序列: 每 3 天一个 ITW 槽
        let cells: Vec<String> = (0..PATTERN_LENGTH)
            .map(|i| if i % 3 == 0 { "ITW".to_string() } else { String::new() })
            .collect();
        let seqs = vec![PatternSequence::new(date(2025, 1, 1), cells, PatternScope::Itw)];
        let calc = DutyDayCalculator::new();

        let months = calc.duty_days_for_year(2025, ITW_CATEGORY, &seqs);
        // 1 月: 偏移 0,3,6,... → 1,4,7,10,13,16,19,22,25,28,31 共 11 天
        assert_eq!(months[0].len(), 11);
        assert_eq!(months[0][0].day, 1);
        assert_eq!(months[0][0].weekday, "Wed");
    }
}
