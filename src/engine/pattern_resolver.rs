// ==========================================
// 救援站勤务排班系统 - 班制解析引擎
// ==========================================
// 职责: 对任意日期，在多条版本化班制序列中选出
// 生效序列，并按日期偏移对 21 天循环取模得到类别码。
// 输入: 日期 + 班制序列集合（顺序不限）
// 输出: 类别码（空槽/无序列返回 None）
// ==========================================

use crate::domain::pattern::PatternSequence;
use chrono::NaiveDate;

// ==========================================
// PatternResolver - 班制解析引擎
// ==========================================
pub struct PatternResolver;

impl PatternResolver {
    /// 创建新的班制解析引擎
    pub fn new() -> Self {
        Self
    }

    /// 解析指定日期的班制类别码
    ///
    /// 规则:
    /// 1) 按 start_date 升序排序，取最后一条 start_date ≤ date 的序列为生效序列；
    ///    若所有序列都晚于该日期，回退到最早的一条（偏移为负，取模仍有效）。
    /// 2) 偏移 = date - start_date 的整天数；
    ///    下标 = 偏移对序列长度取欧几里得模（等价于双取模公式，
    ///    负偏移同样落入 0..len，属预期行为而非错误）。
    /// 3) 空槽返回 None；序列集合为空返回 None。
    pub fn resolve_category(
        &self,
        date: NaiveDate,
        sequences: &[PatternSequence],
    ) -> Option<String> {
        let active = Self::active_sequence(date, sequences)?;

        let len = active.pattern.len();
        if len == 0 {
            return None;
        }

        let diff_days = date.signed_duration_since(active.start_date).num_days();
        let index = diff_days.rem_euclid(len as i64) as usize;

        let cell = &active.pattern[index];
        if cell.is_empty() {
            None
        } else {
            Some(cell.clone())
        }
    }

    /// 选出指定日期的生效序列
    fn active_sequence<'a>(
        date: NaiveDate,
        sequences: &'a [PatternSequence],
    ) -> Option<&'a PatternSequence> {
        let mut sorted: Vec<&PatternSequence> = sequences.iter().collect();
        sorted.sort_by_key(|seq| seq.start_date);

        let mut active: Option<&PatternSequence> = None;
        for seq in &sorted {
            if seq.start_date <= date {
                active = Some(seq);
            }
        }

        // 日期早于所有序列时回退到最早的一条
        active.or_else(|| sorted.first().copied())
    }
}

impl Default for PatternResolver {
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
    use crate::domain::pattern::PATTERN_LENGTH;
    use crate::domain::types::PatternScope;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 21 槽循环序列: "1","2","3","1","2","3",...
    fn cyclic_sequence(start: NaiveDate) -> PatternSequence {
        let cells: Vec<String> = (0..PATTERN_LENGTH)
            .map(|i| ((i % 3) + 1).to_string())
            .collect();
        PatternSequence::new(start, cells, PatternScope::Department)
    }

    #[test]
    fn test_empty_sequence_set_resolves_to_none() {
        let resolver = PatternResolver::new();
        assert_eq!(resolver.resolve_category(date(2025, 6, 1), &[]), None);
    }

    #[test]
    fn test_cyclic_indexing_from_start() {
        let resolver = PatternResolver::new();
        let seqs = vec![cyclic_sequence(date(2025, 1, 1))];

        assert_eq!(resolver.resolve_category(date(2025, 1, 1), &seqs), Some("1".to_string()));
        assert_eq!(resolver.resolve_category(date(2025, 1, 2), &seqs), Some("2".to_string()));
        assert_eq!(resolver.resolve_category(date(2025, 1, 3), &seqs), Some("3".to_string()));
        // 第 22 天回到循环起点
        assert_eq!(resolver.resolve_category(date(2025, 1, 22), &seqs), Some("1".to_string()));
    }

    #[test]
    fn test_latest_effective_sequence_wins() {
        let resolver = PatternResolver::new();
        let mut old_cells = vec![String::new(); PATTERN_LENGTH];
        old_cells[0] = "9".to_string();
        let seqs = vec![
            cyclic_sequence(date(2025, 3, 1)),
            PatternSequence::new(date(2025, 1, 1), old_cells, PatternScope::Department),
        ];

        // 2025-02-15 仍由旧序列覆盖 (偏移 45, 45 mod 21 = 3 → 空槽)
        assert_eq!(resolver.resolve_category(date(2025, 2, 15), &seqs), None);
        // 2025-03-01 起新序列生效
        assert_eq!(resolver.resolve_category(date(2025, 3, 1), &seqs), Some("1".to_string()));
    }

    #[test]
    fn test_date_before_all_sequences_still_resolves() {
        let resolver = PatternResolver::new();
        let seqs = vec![cyclic_sequence(date(2025, 1, 1))];

        // 2024-12-31: 偏移 -1, rem_euclid(21) = 20 → "3" (20 % 3 = 2 → 第三类)
        let resolved = resolver.resolve_category(date(2024, 12, 31), &seqs);
        assert_eq!(resolved, Some("3".to_string()));
        // 远早于生效日也必须返回确定结果，绝不越界
        assert!(resolver.resolve_category(date(1970, 1, 1), &seqs).is_some());
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let resolver = PatternResolver::new();
        let seqs = vec![
            cyclic_sequence(date(2025, 1, 1)),
            cyclic_sequence(date(2024, 6, 1)),
        ];
        let d = date(2025, 8, 17);

        let first = resolver.resolve_category(d, &seqs);
        for _ in 0..10 {
            assert_eq!(resolver.resolve_category(d, &seqs), first);
        }
    }

    #[test]
    fn test_blank_cell_resolves_to_none() {
        let resolver = PatternResolver::new();
        let mut cells = vec![String::new(); PATTERN_LENGTH];
        cells[0] = "2".to_string();
        let seqs = vec![PatternSequence::new(
            date(2025, 1, 1),
            cells,
            PatternScope::Department,
        )];

        assert_eq!(resolver.resolve_category(date(2025, 1, 1), &seqs), Some("2".to_string()));
        assert_eq!(resolver.resolve_category(date(2025, 1, 2), &seqs), None);
    }
}
