// ==========================================
// 救援站勤务排班系统 - 班位标签 (Slot Tag)
// ==========================================
// 班位命名文法:
//   <车辆类别><序号>_<tag|nacht>_<岗位号>   例: rtw2_nacht_1
//   nef_assist / nef_azubi                  NEF 固定班位
//   itw_*                                   ITW 班位族
// ==========================================
// 红线: 班位字符串只在此处解析，调用方一律使用枚举，
//       不得在各处散落字符串匹配。
// ==========================================

use crate::domain::types::{ShiftHalf, VehicleKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 司机岗位号
pub const DRIVER_POSITION: u8 = 1;

/// 机械师（操作员）岗位号
///
/// 岗位约定: 1 = 司机, 2 = 机械师, 3 及以上 = 见习岗
pub const MASCHINIST_POSITION: u8 = 2;

// ==========================================
// SlotTag - 轮值班位
// ==========================================
// 排班条目的 entry_type 字段既可承载输入方式标记
// (text/dropdown)，也可承载班位标签；两者语义互斥。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum SlotTag {
    /// 车辆乘组班位（RTW/NEF 乘组，白班或夜班，带岗位号）
    Crew {
        vehicle: VehicleKind,
        vehicle_no: u8,
        half: ShiftHalf,
        position: u8,
    },
    /// NEF 随车急救员
    NefAssist,
    /// NEF 学员随车位
    NefAzubi,
    /// ITW 班位（保留原始后缀，如 "tag_1"）
    Itw { label: String },
}

impl SlotTag {
    /// 从原始字符串解析班位标签
    ///
    /// 解析失败返回 None（包括空串、输入方式标记 text/dropdown、
    /// 以及任何不符合文法的字符串）。
    pub fn parse(raw: &str) -> Option<SlotTag> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        // NEF 固定班位
        match raw {
            "nef_assist" => return Some(SlotTag::NefAssist),
            "nef_azubi" => return Some(SlotTag::NefAzubi),
            _ => {}
        }

        // ITW 班位族: itw_<后缀>
        if let Some(rest) = raw.strip_prefix("itw_") {
            if rest.is_empty() {
                return None;
            }
            return Some(SlotTag::Itw {
                label: rest.to_string(),
            });
        }

        // 乘组班位: <类别><序号>_<tag|nacht>_<岗位号>
        let mut parts = raw.split('_');
        let head = parts.next()?;
        let half_str = parts.next()?;
        let position_str = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let digit_at = head.find(|c: char| c.is_ascii_digit())?;
        let (kind_str, no_str) = head.split_at(digit_at);
        let vehicle = match kind_str {
            "rtw" => VehicleKind::Rtw,
            "nef" => VehicleKind::Nef,
            _ => return None,
        };
        let vehicle_no: u8 = no_str.parse().ok()?;

        let half = match half_str {
            "tag" => ShiftHalf::Tag,
            "nacht" => ShiftHalf::Nacht,
            _ => return None,
        };

        let position: u8 = position_str.parse().ok()?;
        if vehicle_no == 0 || position == 0 {
            return None;
        }

        Some(SlotTag::Crew {
            vehicle,
            vehicle_no,
            half,
            position,
        })
    }

    /// 是否为 ITW 班位
    pub fn is_itw(&self) -> bool {
        matches!(self, SlotTag::Itw { .. })
    }

    /// 是否为车辆机械师班位（白班或夜班均计）
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            SlotTag::Crew {
                position: MASCHINIST_POSITION,
                ..
            }
        )
    }

    /// 是否为司机班位
    pub fn is_driver(&self) -> bool {
        matches!(
            self,
            SlotTag::Crew {
                position: DRIVER_POSITION,
                ..
            }
        )
    }

    /// 班位所属时段（NEF 固定班位与 ITW 班位无白夜区分）
    pub fn half(&self) -> Option<ShiftHalf> {
        match self {
            SlotTag::Crew { half, .. } => Some(*half),
            _ => None,
        }
    }
}

impl fmt::Display for SlotTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotTag::Crew {
                vehicle,
                vehicle_no,
                half,
                position,
            } => write!(f, "{}{}_{}_{}", vehicle, vehicle_no, half, position),
            SlotTag::NefAssist => write!(f, "nef_assist"),
            SlotTag::NefAzubi => write!(f, "nef_azubi"),
            SlotTag::Itw { label } => write!(f, "itw_{}", label),
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crew_slot() {
        let tag = SlotTag::parse("rtw2_nacht_1").expect("应解析成功");
        assert_eq!(
            tag,
            SlotTag::Crew {
                vehicle: VehicleKind::Rtw,
                vehicle_no: 2,
                half: ShiftHalf::Nacht,
                position: 1,
            }
        );
        assert!(tag.is_driver());
        assert!(!tag.is_operator());
        assert_eq!(tag.half(), Some(ShiftHalf::Nacht));
    }

    #[test]
    fn test_parse_operator_slot() {
        let tag = SlotTag::parse("rtw1_tag_2").unwrap();
        assert!(tag.is_operator());
        assert_eq!(tag.half(), Some(ShiftHalf::Tag));
    }

    #[test]
    fn test_parse_nef_fixed_slots() {
        assert_eq!(SlotTag::parse("nef_assist"), Some(SlotTag::NefAssist));
        assert_eq!(SlotTag::parse("nef_azubi"), Some(SlotTag::NefAzubi));
        assert_eq!(SlotTag::parse("nef_assist").unwrap().half(), None);
    }

    #[test]
    fn test_parse_itw_family() {
        let tag = SlotTag::parse("itw_tag_1").unwrap();
        assert!(tag.is_itw());
        assert_eq!(tag.to_string(), "itw_tag_1");
    }

    #[test]
    fn test_parse_rejects_non_slots() {
        // 输入方式标记不是班位
        assert_eq!(SlotTag::parse("text"), None);
        assert_eq!(SlotTag::parse("dropdown"), None);
        assert_eq!(SlotTag::parse(""), None);
        assert_eq!(SlotTag::parse("rtw_tag_1"), None); // 缺少车辆序号
        assert_eq!(SlotTag::parse("rtw1_mittag_1"), None); // 非法时段
        assert_eq!(SlotTag::parse("rtw1_tag_0"), None); // 岗位号从 1 开始
        assert_eq!(SlotTag::parse("ktw1_tag_1"), None); // 未知车辆类别
        assert_eq!(SlotTag::parse("rtw1_tag_1_x"), None); // 多余段
        assert_eq!(SlotTag::parse("itw_"), None);
    }

    #[test]
    fn test_display_roundtrip() {
        for raw in ["rtw2_nacht_1", "nef1_tag_2", "nef_assist", "nef_azubi", "itw_nacht_3"] {
            let tag = SlotTag::parse(raw).unwrap();
            assert_eq!(tag.to_string(), raw);
            assert_eq!(SlotTag::parse(&tag.to_string()), Some(tag));
        }
    }
}
