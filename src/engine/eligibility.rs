// ==========================================
// 救援站勤务排班系统 - 班位资格判定引擎
// ==========================================
// 职责: 判定某值班代码口径能否覆盖某班位，
// 以及人员能力标记是否满足班位门槛。
// 口径覆盖规则（固定口径，不得重新诠释）:
// - 白班班位: tag 或 24h
// - 夜班班位: nacht 或 24h
// - ITW 班位: 仅 itw（无白夜区分）
// - off 永不匹配
// ==========================================

use crate::domain::slot::SlotTag;
use crate::domain::staff::Personnel;
use crate::domain::types::{EvaluationMode, ShiftHalf};

// ==========================================
// EligibilityEngine - 班位资格判定引擎
// ==========================================
pub struct EligibilityEngine;

impl EligibilityEngine {
    /// 创建新的资格判定引擎
    pub fn new() -> Self {
        Self
    }

    /// 值班代码口径能否覆盖指定班位
    ///
    /// NEF 固定班位 (assist/azubi) 无白夜区分，任何非 off 口径均可。
    pub fn allowed_by_evaluation(&self, mode: EvaluationMode, slot: &SlotTag) -> bool {
        match slot {
            SlotTag::Crew { half, .. } => match half {
                ShiftHalf::Tag => matches!(mode, EvaluationMode::Tag | EvaluationMode::H24),
                ShiftHalf::Nacht => matches!(mode, EvaluationMode::Nacht | EvaluationMode::H24),
            },
            SlotTag::Itw { .. } => mode == EvaluationMode::Itw,
            SlotTag::NefAssist | SlotTag::NefAzubi => mode != EvaluationMode::Off,
        }
    }

    /// 人员能力标记是否满足班位门槛
    ///
    /// - 司机岗位需要 can_drive
    /// - nef_assist 需要 NEF 资质
    /// - nef_azubi 为学员专属班位，正式人员不占用
    /// - 离岗人员不占用任何班位
    pub fn person_qualified(&self, person: &Personnel, slot: &SlotTag) -> bool {
        if !person.active {
            return false;
        }
        match slot {
            SlotTag::Crew { .. } => {
                if slot.is_driver() {
                    person.can_drive
                } else {
                    true
                }
            }
            SlotTag::NefAssist => person.nef_qualified,
            SlotTag::NefAzubi => false,
            SlotTag::Itw { .. } => true,
        }
    }
}

impl Default for EligibilityEngine {
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

    fn slot(raw: &str) -> SlotTag {
        SlotTag::parse(raw).unwrap()
    }

    fn person(can_drive: bool, nef_qualified: bool, active: bool) -> Personnel {
        Personnel {
            id: 1,
            name: "Testkraft".to_string(),
            sort_key: 1,
            can_drive,
            nef_qualified,
            active,
        }
    }

    #[test]
    fn test_24h_covers_day_and_night() {
        // 固定诠释: 24h 同时覆盖白班与夜班班位
        let engine = EligibilityEngine::new();
        assert!(engine.allowed_by_evaluation(EvaluationMode::H24, &slot("rtw1_tag_1")));
        assert!(engine.allowed_by_evaluation(EvaluationMode::H24, &slot("rtw1_nacht_1")));
    }

    #[test]
    fn test_tag_and_nacht_are_exclusive() {
        let engine = EligibilityEngine::new();
        assert!(engine.allowed_by_evaluation(EvaluationMode::Tag, &slot("rtw1_tag_2")));
        assert!(!engine.allowed_by_evaluation(EvaluationMode::Tag, &slot("rtw1_nacht_2")));
        assert!(engine.allowed_by_evaluation(EvaluationMode::Nacht, &slot("rtw1_nacht_2")));
        assert!(!engine.allowed_by_evaluation(EvaluationMode::Nacht, &slot("rtw1_tag_2")));
    }

    #[test]
    fn test_itw_has_no_day_night_distinction() {
        let engine = EligibilityEngine::new();
        assert!(engine.allowed_by_evaluation(EvaluationMode::Itw, &slot("itw_tag_1")));
        assert!(engine.allowed_by_evaluation(EvaluationMode::Itw, &slot("itw_nacht_1")));
        // 24h 不覆盖 ITW 班位
        assert!(!engine.allowed_by_evaluation(EvaluationMode::H24, &slot("itw_tag_1")));
    }

    #[test]
    fn test_off_never_matches() {
        let engine = EligibilityEngine::new();
        for raw in ["rtw1_tag_1", "rtw1_nacht_2", "itw_tag_1", "nef_assist"] {
            assert!(!engine.allowed_by_evaluation(EvaluationMode::Off, &slot(raw)));
        }
    }

    #[test]
    fn test_driver_slot_requires_can_drive() {
        let engine = EligibilityEngine::new();
        assert!(engine.person_qualified(&person(true, false, true), &slot("rtw1_tag_1")));
        assert!(!engine.person_qualified(&person(false, false, true), &slot("rtw1_tag_1")));
        // 机械师岗位不要求驾驶资质
        assert!(engine.person_qualified(&person(false, false, true), &slot("rtw1_tag_2")));
    }

    #[test]
    fn test_nef_slots() {
        let engine = EligibilityEngine::new();
        assert!(engine.person_qualified(&person(true, true, true), &slot("nef_assist")));
        assert!(!engine.person_qualified(&person(true, false, true), &slot("nef_assist")));
        // 学员专属班位
        assert!(!engine.person_qualified(&person(true, true, true), &slot("nef_azubi")));
    }

    #[test]
    fn test_inactive_person_never_qualifies() {
        let engine = EligibilityEngine::new();
        assert!(!engine.person_qualified(&person(true, true, false), &slot("rtw1_tag_2")));
    }
}
